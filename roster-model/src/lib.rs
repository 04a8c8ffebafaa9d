//! Data model definitions shared across roster crates.
#![allow(missing_docs)]

pub mod character;
pub mod error;
pub mod numbers;
pub mod page;
pub mod sort;

pub use character::{Character, LinkGroup};
pub use error::{ModelError, Result as ModelResult};
pub use numbers::parse_measure;
pub use page::PeoplePage;
pub use sort::{NumericField, SortDirection};
