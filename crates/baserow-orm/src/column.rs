//! Column descriptors and the filters built from them.

use crate::ModelSchema;

use baserow_core::{Filter, FilterMode, FilterValue};

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

/// A model attribute bound to a remote field.
///
/// Every column carries a placeholder id, `"<name>.<uuid>"`, unique per
/// constructed column. Filters built from a column reference the placeholder;
/// the [`Database`](crate::Database) rewrites it to the concrete remote field
/// before the request leaves the process.
#[derive(Clone)]
pub struct Column {
    name: String,
    id: String,
    kind: ColumnKind,
}

#[derive(Clone, Debug)]
pub enum ColumnKind {
    /// A scalar value stored in the row.
    Plain,

    /// A link to rows of another table.
    ForeignKey(ModelRef),
}

/// A possibly-forward reference to a model schema.
///
/// The resolver runs at most once; the result is cached and shared by every
/// clone of the reference.
#[derive(Clone)]
pub struct ModelRef {
    resolve: fn() -> &'static ModelSchema,
    target: Arc<OnceLock<&'static ModelSchema>>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Column {
        Column::with_kind(name.into(), ColumnKind::Plain)
    }

    pub fn foreign_key(name: impl Into<String>, model: ModelRef) -> Column {
        Column::with_kind(name.into(), ColumnKind::ForeignKey(model))
    }

    fn with_kind(name: String, kind: ColumnKind) -> Column {
        let id = format!("{name}.{}", uuid::Uuid::new_v4());
        Column { name, id, kind }
    }

    /// The remote field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The placeholder id used in filters.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self.kind, ColumnKind::ForeignKey(_))
    }

    /// The linked model's schema, resolving a forward reference on first use.
    pub fn target(&self) -> Option<&'static ModelSchema> {
        match &self.kind {
            ColumnKind::Plain => None,
            ColumnKind::ForeignKey(model) => Some(model.get()),
        }
    }

    fn filter(&self, mode: FilterMode, value: Option<FilterValue>) -> Filter {
        Filter::new(self.id.clone(), mode, value)
    }

    pub fn equal(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::Equal, Some(value.into()))
    }

    pub fn not_equal(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::NotEqual, Some(value.into()))
    }

    pub fn filename_contains(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::FilenameContains, Some(value.into()))
    }

    pub fn contains(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::Contains, Some(value.into()))
    }

    pub fn contains_not(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::ContainsNot, Some(value.into()))
    }

    pub fn higher_than(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::HigherThan, Some(value.into()))
    }

    pub fn lower_than(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::LowerThan, Some(value.into()))
    }

    pub fn date_equal(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::DateEqual, Some(value.into()))
    }

    pub fn date_before(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::DateBefore, Some(value.into()))
    }

    pub fn date_after(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::DateAfter, Some(value.into()))
    }

    pub fn date_not_equal(&self, value: impl Into<FilterValue>) -> Filter {
        self.filter(FilterMode::DateNotEqual, Some(value.into()))
    }

    /// Matches dates equal to today in the given timezone name.
    pub fn date_equals_today(&self, timezone: impl Into<String>) -> Filter {
        self.filter(
            FilterMode::DateEqualsToday,
            Some(FilterValue::String(timezone.into())),
        )
    }

    pub fn date_equals_month(&self, month: u32) -> Filter {
        self.filter(FilterMode::DateEqualsMonth, Some(month.into()))
    }

    pub fn date_equals_year(&self, year: i32) -> Filter {
        self.filter(FilterMode::DateEqualsYear, Some(year.into()))
    }

    /// Matches a single select field by option id.
    pub fn single_select_equal(&self, option_id: i64) -> Filter {
        self.filter(FilterMode::SingleSelectEqual, Some(option_id.into()))
    }

    pub fn single_select_not_equal(&self, option_id: i64) -> Filter {
        self.filter(FilterMode::SingleSelectNotEqual, Some(option_id.into()))
    }

    /// Matches rows linking to the row with the given id.
    pub fn link_row_has(&self, row_id: i64) -> Filter {
        self.filter(FilterMode::LinkRowHas, Some(row_id.into()))
    }

    pub fn link_row_has_not(&self, row_id: i64) -> Filter {
        self.filter(FilterMode::LinkRowHasNot, Some(row_id.into()))
    }

    pub fn boolean(&self, value: bool) -> Filter {
        self.filter(FilterMode::Boolean, Some(value.into()))
    }

    pub fn empty(&self) -> Filter {
        self.filter(FilterMode::Empty, None)
    }

    pub fn not_empty(&self) -> Filter {
        self.filter(FilterMode::NotEmpty, None)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Column");
        s.field("name", &self.name).field("id", &self.id);
        if let ColumnKind::ForeignKey(model) = &self.kind {
            s.field("model", model);
        }
        s.finish()
    }
}

impl ModelRef {
    /// A reference resolved through `resolve` on first use.
    pub fn lazy(resolve: fn() -> &'static ModelSchema) -> ModelRef {
        ModelRef {
            resolve,
            target: Arc::new(OnceLock::new()),
        }
    }

    /// A reference to the schema of `M`.
    pub fn of<M: crate::Model>() -> ModelRef {
        ModelRef::lazy(M::schema)
    }

    pub fn get(&self) -> &'static ModelSchema {
        self.target.get_or_init(self.resolve)
    }

    pub fn is_resolved(&self) -> bool {
        self.target.get().is_some()
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target.get() {
            Some(schema) => f.write_str(schema.id()),
            None => f.write_str("<unresolved>"),
        }
    }
}
