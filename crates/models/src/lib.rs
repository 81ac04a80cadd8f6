//! Domain models exchanged through the jsoncmp codec.

pub mod address;
pub mod data_wrapper;
pub mod person;
pub mod product;

pub use address::Address;
pub use data_wrapper::{DataWrapper, DEFAULT_VERSION};
pub use person::{Person, PersonRef};
pub use product::{Product, ProductCategory};
