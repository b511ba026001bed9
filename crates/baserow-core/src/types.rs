//! Wire types exchanged with the Baserow REST API.

use serde::{Deserialize, Serialize};

/// A raw table row as returned by the API: `id`, optional `order` and one
/// `field_<id>` key per backend field.
pub type Row = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub username: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    pub database_id: u64,
}

/// An application (a database) together with its tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(rename = "type", default = "default_application_type")]
    pub ty: String,
    pub group: Option<Group>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

fn default_application_type() -> String {
    "database".to_string()
}

/// A field (column) of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableField {
    pub id: u64,
    pub table_id: u64,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub primary: bool,

    /// Type specific attributes, tagged by the `type` key.
    #[serde(flatten)]
    pub ty: FieldType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NumberType {
    Integer,
    Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: u64,
    pub value: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    Text {
        #[serde(default)]
        text_default: String,
    },
    LongText,
    Number {
        #[serde(default)]
        number_decimal_places: u32,
        #[serde(default)]
        number_negative: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        number_type: Option<NumberType>,
    },
    SingleSelect {
        #[serde(default)]
        select_options: Vec<SelectOption>,
    },
    Url,
    LinkRow {
        link_row_table: u64,
        #[serde(default)]
        link_row_related_field: Option<u64>,
    },
    Boolean,
    File,
    /// Any field type this crate has no dedicated representation for.
    #[serde(other)]
    Other,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: u64,

    /// Number of the previous page, if any
    pub previous: Option<u32>,

    /// Number of the next page, if any
    pub next: Option<u32>,

    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A link target as returned inline for link fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ref {
    pub id: u64,
    #[serde(default)]
    pub value: serde_json::Value,
}
