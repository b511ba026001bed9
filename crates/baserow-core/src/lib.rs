#[macro_use]
mod macros;

pub mod client;
pub use client::{Client, ListRows};

mod error;
pub use error::{Error, IntoError, SchemaObject};

pub mod filter;
pub use filter::{Filter, FilterMode, FilterType, FilterValue};

pub mod types;
pub use types::{Application, FieldType, Group, Page, Ref, Row, Table, TableField, User};

/// A Result type alias that uses the crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
