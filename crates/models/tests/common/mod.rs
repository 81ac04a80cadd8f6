#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use jsoncmp_codec::{CyclePolicy, EncodingConfig};
use jsoncmp_models::{Address, DataWrapper, Person, PersonRef, Product, ProductCategory};
use jsoncmp_value::{Decimal, Map, Value};

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .unwrap()
}

/// 1995-07-20T14:30:00, the reference timestamp for date formatting.
pub fn reference_instant() -> NaiveDateTime {
    at(1995, 7, 20, 14, 30, 0)
}

pub fn dec(text: &str) -> Decimal {
    text.parse().unwrap()
}

pub fn person(id: i32) -> Person {
    Person {
        id,
        name: format!("Person {id}"),
        email: format!("person{id}@example.com"),
        birth_date: reference_instant(),
        is_active: id % 2 == 1,
        salary: Some(dec("5000.00")),
        skills: vec!["C#".to_string(), "SQL".to_string()],
        address: Some(Address {
            street: format!("{id} Main St"),
            city: "Springfield".to_string(),
            country: "USA".to_string(),
            postal_code: Some("12345".to_string()),
        }),
        manager: None,
    }
}

/// A person with every optional field empty.
pub fn sparse_person(id: i32) -> Person {
    Person {
        salary: None,
        address: None,
        ..person(id)
    }
}

pub fn product(id: i32, category: ProductCategory) -> Product {
    let mut metadata = Map::new();
    metadata.insert("Brand".to_string(), Value::from("Acme"));
    metadata.insert("InStock".to_string(), Value::Bool(true));
    metadata.insert("Rating".to_string(), Value::from(dec("4.5")));
    metadata.insert(
        "Dimensions".to_string(),
        [("w", Value::from(30)), ("h", Value::from(2))].into_iter().collect(),
    );
    Product {
        id,
        name: format!("Product {id}"),
        price: dec("1299.99"),
        category,
        metadata,
        created_date: at(2024, 1, 15, 9, 0, 0),
    }
}

pub fn wrapper() -> DataWrapper {
    DataWrapper {
        persons: vec![person(1).into_ref(), sparse_person(2).into_ref()],
        products: vec![
            product(1, ProductCategory::Electronics),
            product(2, ProductCategory::Books),
        ],
        generated_at: at(2024, 3, 1, 12, 0, 0),
        version: "2.1".to_string(),
    }
}

/// Two people who manage each other.
pub fn cyclic_pair() -> (PersonRef, PersonRef) {
    let p1 = sparse_person(1).into_ref();
    let p2 = sparse_person(2).into_ref();
    p1.borrow_mut().set_manager(Some(&p2));
    p2.borrow_mut().set_manager(Some(&p1));
    (p1, p2)
}

pub fn cycles(policy: CyclePolicy) -> EncodingConfig {
    EncodingConfig {
        cycle_policy: policy,
        ..EncodingConfig::default()
    }
}

/// Number of `"Manager"` keys in encoded text.
pub fn manager_keys(text: &str) -> usize {
    text.matches(r#""Manager":"#).count()
}
