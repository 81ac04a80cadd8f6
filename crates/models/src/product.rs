use std::fmt;

use chrono::NaiveDateTime;
use jsoncmp_codec::{Decode, DecodeError, Decoder, Encode, EncodeError, Encoder, EnumRepr};
use jsoncmp_value::{Decimal, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductCategory {
    #[default]
    Electronics,
    Clothing,
    Books,
    Food,
    Toys,
    Sports,
    Home,
    /// An ordinal with no declared name. Written as a number; cannot be
    /// written symbolically.
    Undeclared(i32),
}

impl ProductCategory {
    /// Category for any ordinal, declared or not.
    pub fn from_raw(ordinal: i32) -> Self {
        Self::from_ordinal(i64::from(ordinal)).unwrap_or(ProductCategory::Undeclared(ordinal))
    }
}

impl EnumRepr for ProductCategory {
    const TYPE_NAME: &'static str = "ProductCategory";
    const VARIANTS: &'static [(&'static str, i64)] = &[
        ("Electronics", 0),
        ("Clothing", 1),
        ("Books", 2),
        ("Food", 3),
        ("Toys", 4),
        ("Sports", 5),
        ("Home", 6),
    ];

    fn ordinal(&self) -> i64 {
        match self {
            ProductCategory::Electronics => 0,
            ProductCategory::Clothing => 1,
            ProductCategory::Books => 2,
            ProductCategory::Food => 3,
            ProductCategory::Toys => 4,
            ProductCategory::Sports => 5,
            ProductCategory::Home => 6,
            ProductCategory::Undeclared(n) => i64::from(*n),
        }
    }

    fn from_ordinal(ordinal: i64) -> Option<Self> {
        Some(match ordinal {
            0 => ProductCategory::Electronics,
            1 => ProductCategory::Clothing,
            2 => ProductCategory::Books,
            3 => ProductCategory::Food,
            4 => ProductCategory::Toys,
            5 => ProductCategory::Sports,
            6 => ProductCategory::Home,
            _ => return None,
        })
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.ordinal()),
        }
    }
}

impl Encode for ProductCategory {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        enc.enum_value(self)
    }
}

impl Decode for ProductCategory {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        dec.enum_value(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub category: ProductCategory,
    /// Free-form attributes; keys are written as given.
    pub metadata: Map,
    pub created_date: NaiveDateTime,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {} ({})",
            self.id, self.name, self.price, self.category
        )
    }
}

impl Encode for Product {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        enc.object(|obj| {
            obj.field("Id", &self.id)?;
            obj.field("Name", &self.name)?;
            obj.field("Price", &self.price)?;
            obj.field("Category", &self.category)?;
            obj.field("Metadata", &self.metadata)?;
            obj.field("CreatedDate", &self.created_date)
        })
    }
}

impl Decode for Product {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let obj = dec.object(value)?;
        Ok(Product {
            id: obj.field(dec, "Id")?,
            name: obj.field(dec, "Name")?,
            price: obj.field(dec, "Price")?,
            category: obj.field(dec, "Category")?,
            metadata: obj.field(dec, "Metadata")?,
            created_date: obj.field(dec, "CreatedDate")?,
        })
    }
}
