// Lets `#[derive(Model)]` resolve `baserow_orm` paths inside this crate's own tests.
extern crate self as baserow_orm;

pub mod column;
pub use column::{Column, ColumnKind, ModelRef};

pub mod db;
pub use db::Database;

mod field;
pub use field::{Assign, Field};

mod linked_row;
pub use linked_row::LinkedRow;

pub mod mapping;
pub use mapping::{generate_mapping, ModelMapping, SchemaMapping};

mod model;
pub use model::{Model, Record};

pub mod query;
pub use query::Query;

pub mod schema;
pub use schema::{ModelDescription, ModelSchema};

pub use baserow_macros::Model;

pub use baserow_core::{
    bail, err, filter, types, Client, Error, Filter, FilterMode, FilterType, FilterValue,
    ListRows, Page, Ref, Result, Row,
};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        field::LinkField, model::load_field, model::merge_inherited, Assign, Column, Database,
        Error, Field, LinkedRow, Model, ModelRef, ModelSchema, Record, Result,
    };
    pub use serde_json::Value;
    pub use std::{option::Option, sync::OnceLock};
}
