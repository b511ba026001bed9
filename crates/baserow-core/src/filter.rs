//! Row filter expressions and their query-string encoding.

use jiff::{civil::Date, Zoned};

use std::fmt;

/// How multiple filters of one listing are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    #[default]
    And,
    Or,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::And => "AND",
            FilterType::Or => "OR",
        }
    }
}

/// The comparison a filter applies to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Equal,
    NotEqual,
    FilenameContains,
    Contains,
    ContainsNot,
    HigherThan,
    LowerThan,
    DateEqual,
    DateBefore,
    DateAfter,
    DateNotEqual,
    DateEqualsToday,
    DateEqualsMonth,
    DateEqualsYear,
    SingleSelectEqual,
    SingleSelectNotEqual,
    LinkRowHas,
    LinkRowHasNot,
    Boolean,
    Empty,
    NotEmpty,
}

impl FilterMode {
    /// The name used in the `filter__<field>__<mode>` query parameter.
    pub fn as_str(&self) -> &'static str {
        use FilterMode::*;

        match self {
            Equal => "equal",
            NotEqual => "not_equal",
            FilenameContains => "filename_contains",
            Contains => "contains",
            ContainsNot => "contains_not",
            HigherThan => "higher_than",
            LowerThan => "lower_than",
            DateEqual => "date_equal",
            DateBefore => "date_before",
            DateAfter => "date_after",
            DateNotEqual => "date_not_equal",
            DateEqualsToday => "date_equals_today",
            DateEqualsMonth => "date_equals_month",
            DateEqualsYear => "date_equals_year",
            SingleSelectEqual => "single_select_equal",
            SingleSelectNotEqual => "single_select_not_equal",
            LinkRowHas => "link_row_has",
            LinkRowHasNot => "link_row_has_not",
            Boolean => "boolean",
            Empty => "empty",
            NotEmpty => "not_empty",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value compared against a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    Date(Date),
    DateTime(Zoned),
}

impl FilterValue {
    /// Encodes the value the way the API expects it in a query string.
    pub fn encode(&self) -> String {
        match self {
            FilterValue::Bool(v) => v.to_string(),
            FilterValue::I64(v) => v.to_string(),
            FilterValue::F64(v) => v.to_string(),
            FilterValue::String(v) => v.clone(),
            FilterValue::Date(v) => v.strftime("%Y-%m-%d").to_string(),
            FilterValue::DateTime(v) => v.strftime("%Y-%m-%dT%H:%M:%S%z").to_string(),
        }
    }
}

macro_rules! impl_from {
    ($( $ty:ty => $variant:ident ),* $(,)?) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    FilterValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i32 => I64,
    i64 => I64,
    u32 => I64,
    f32 => F64,
    f64 => F64,
    String => String,
    &str => String,
    Date => Date,
    Zoned => DateTime,
}

/// A single filter on a listing.
///
/// `field` is either a backend field reference (`field_<id>`) or a column
/// placeholder that the database rewrites before the request is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub mode: FilterMode,
    pub value: Option<FilterValue>,
}

impl Filter {
    pub fn new(field: impl Into<String>, mode: FilterMode, value: Option<FilterValue>) -> Self {
        Self {
            field: field.into(),
            mode,
            value,
        }
    }

    /// Returns a copy of this filter targeting another field.
    pub fn with_field(&self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            mode: self.mode,
            value: self.value.clone(),
        }
    }

    /// Returns the `(key, value)` query parameter for this filter.
    pub fn to_query_parameter(&self) -> (String, Option<String>) {
        (
            format!("filter__{}__{}", self.field, self.mode),
            self.value.as_ref().map(FilterValue::encode),
        )
    }
}
