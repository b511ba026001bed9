use crate::{Column, Database, Field, ModelDescription, ModelSchema, Result};

use baserow_core::{err, Error};
use indexmap::IndexMap;
use serde_json::Value;

/// Attribute values keyed by attribute name.
pub type Record = IndexMap<String, Value>;

/// A typed view over the rows of one remote table.
///
/// Implementations are generated by `#[derive(Model)]`.
pub trait Model: Sized + 'static {
    /// The declared columns of the model, including inherited ones.
    fn schema() -> &'static ModelSchema;

    /// The row id, `None` until the instance has been saved.
    fn id(&self) -> Option<u64>;

    fn set_id(&mut self, id: u64);

    /// Builds an instance from attribute values.
    ///
    /// `record` must hold exactly the declared attributes. Missing and
    /// unrecognized keys are rejected before any value is converted.
    fn load(db: Option<&Database>, id: Option<u64>, record: Record) -> Result<Self>;

    /// Converts every declared attribute to its backend value.
    fn to_record(&self) -> Result<Record>;

    /// Unique identifier of the model, used as key in the schema mapping.
    fn model_id() -> &'static str {
        Self::schema().id()
    }

    fn column(attr: &str) -> Option<&'static Column> {
        Self::schema().column(attr)
    }

    /// Describes the model against the given table name.
    fn of(table_name: impl Into<String>) -> ModelDescription {
        Self::schema().of(table_name)
    }

    /// Describes the model against its declared table name.
    fn description() -> Result<ModelDescription> {
        Self::schema().description()
    }

    /// All attribute values plus the row id.
    fn as_dict(&self) -> Result<Record> {
        let mut record = self.to_record()?;
        record.insert(
            "id".to_string(),
            self.id().map(Value::from).unwrap_or(Value::Null),
        );
        Ok(record)
    }
}

/// Removes `attr` from `record` and converts it.
pub fn load_field<T: Field>(
    db: Option<&Database>,
    record: &mut Record,
    model: &str,
    attr: &str,
) -> Result<T> {
    let value = record
        .swap_remove(attr)
        .ok_or_else(|| Error::missing_attribute(model, attr))?;
    T::from_backend(db, value)
        .map_err(|err| err.context(err!("attribute '{attr}' of {model}")))
}

/// Merges the record of an inherited base into `record`. Attributes the
/// deriving model declares itself take precedence.
pub fn merge_inherited(record: &mut Record, base: Record) {
    for (attr, value) in base {
        record.entry(attr).or_insert(value);
    }
}
