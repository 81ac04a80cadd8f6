//! People and the manager relation between them.
//!
//! A person does not own their manager. Graphs are built from shared
//! [`PersonRef`] handles and the manager link is a weak pointer, so two
//! people may manage each other without leaking. Encoding follows the link
//! under the configured cycle policy; decoding never restores it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use chrono::NaiveDateTime;
use jsoncmp_codec::{Decode, DecodeError, Decoder, Encode, EncodeError, Encoder};
use jsoncmp_value::{Decimal, Value};

use crate::address::Address;

pub type PersonRef = Rc<RefCell<Person>>;

#[derive(Debug, Clone, Default)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDateTime,
    pub is_active: bool,
    pub salary: Option<Decimal>,
    pub skills: Vec<String>,
    pub address: Option<Address>,
    /// Non-owning link; see [`Person::set_manager`].
    pub manager: Option<Weak<RefCell<Person>>>,
}

impl Person {
    pub fn into_ref(self) -> PersonRef {
        Rc::new(RefCell::new(self))
    }

    /// The manager, if one is set and still alive.
    pub fn manager(&self) -> Option<PersonRef> {
        self.manager.as_ref().and_then(Weak::upgrade)
    }

    pub fn set_manager(&mut self, manager: Option<&PersonRef>) {
        self.manager = manager.map(Rc::downgrade);
    }

    pub fn has_manager(&self) -> bool {
        self.manager.is_some()
    }

    fn identity(&self) -> usize {
        self as *const Person as usize
    }
}

/// Field-wise equality; the manager link compares by identity.
impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        let same_manager = match (&self.manager, &other.manager) {
            (None, None) => true,
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            _ => false,
        };
        self.id == other.id
            && self.name == other.name
            && self.email == other.email
            && self.birth_date == other.birth_date
            && self.is_active == other.is_active
            && self.salary == other.salary
            && self.skills == other.skills
            && self.address == other.address
            && same_manager
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}) - Active: {}",
            self.id, self.name, self.email, self.is_active
        )
    }
}

impl Encode for Person {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        let manager = self.manager();
        enc.tracked(self.identity(), |enc| {
            enc.object(|obj| {
                obj.field("Id", &self.id)?;
                obj.field("Name", &self.name)?;
                obj.field("Email", &self.email)?;
                obj.field("BirthDate", &self.birth_date)?;
                obj.field("IsActive", &self.is_active)?;
                obj.field("Salary", &self.salary)?;
                obj.field("Skills", &self.skills)?;
                obj.field("Address", &self.address)?;
                obj.back_reference("Manager", manager.as_ref())
            })
        })
    }
}

impl Decode for Person {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let obj = dec.object(value)?;
        Ok(Person {
            id: obj.field(dec, "Id")?,
            name: obj.field(dec, "Name")?,
            email: obj.field(dec, "Email")?,
            birth_date: obj.field(dec, "BirthDate")?,
            is_active: obj.field(dec, "IsActive")?,
            salary: obj.field(dec, "Salary")?,
            skills: obj.field(dec, "Skills")?,
            address: obj.field(dec, "Address")?,
            manager: None,
        })
    }
}
