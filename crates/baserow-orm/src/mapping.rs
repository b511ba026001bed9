//! Resolution of model attributes to remote table and field ids.

use crate::{ModelDescription, Result};

use baserow_core::{err, Client, Error, SchemaObject};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use std::{collections::HashMap, fs, path::Path, sync::OnceLock};

/// The remote table and field ids of one model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelMapping {
    pub table_id: u64,
    fields: IndexMap<String, u64>,

    /// Inverse of `fields`; emptied whenever `fields` changes.
    #[serde(skip)]
    reverse: OnceLock<HashMap<u64, String>>,
}

/// The persisted resolution of a set of models against one remote database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaMapping {
    pub database_id: u64,
    pub models: IndexMap<String, ModelMapping>,
}

impl ModelMapping {
    pub fn new(table_id: u64) -> ModelMapping {
        ModelMapping {
            table_id,
            ..ModelMapping::default()
        }
    }

    pub fn with_fields(table_id: u64, fields: impl IntoIterator<Item = (String, u64)>) -> Self {
        ModelMapping {
            table_id,
            fields: fields.into_iter().collect(),
            reverse: OnceLock::new(),
        }
    }

    pub fn fields(&self) -> &IndexMap<String, u64> {
        &self.fields
    }

    pub fn field(&self, attr: &str) -> Option<u64> {
        self.fields.get(attr).copied()
    }

    pub fn insert_field(&mut self, attr: impl Into<String>, field_id: u64) -> Option<u64> {
        self.reverse.take();
        self.fields.insert(attr.into(), field_id)
    }

    pub fn remove_field(&mut self, attr: &str) -> Option<u64> {
        self.reverse.take();
        self.fields.shift_remove(attr)
    }

    /// Maps field ids back to attribute names.
    pub fn reverse_fields(&self) -> &HashMap<u64, String> {
        self.reverse.get_or_init(|| {
            self.fields
                .iter()
                .map(|(attr, field_id)| (*field_id, attr.clone()))
                .collect()
        })
    }
}

impl PartialEq for ModelMapping {
    fn eq(&self, other: &Self) -> bool {
        self.table_id == other.table_id && self.fields == other.fields
    }
}

impl SchemaMapping {
    pub fn new(database_id: u64) -> SchemaMapping {
        SchemaMapping {
            database_id,
            models: IndexMap::new(),
        }
    }

    pub fn model(&self, model_id: &str) -> Result<&ModelMapping> {
        self.models
            .get(model_id)
            .ok_or_else(|| Error::schema_not_found(SchemaObject::Model, format!("'{model_id}'")))
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        Ok(if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        })
    }

    pub fn from_json(json: &str) -> Result<SchemaMapping> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json(pretty)?)
            .map_err(|err| Error::from(err).context(err!("writing {}", path.display())))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<SchemaMapping> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|err| Error::from(err).context(err!("reading {}", path.display())))?;
        SchemaMapping::from_json(&json)
            .map_err(|err| err.context(err!("parsing {}", path.display())))
    }
}

/// Resolves `database_name` and every described model against the backend.
///
/// Names match exactly. The first database, table or field that cannot be
/// found aborts generation.
pub fn generate_mapping(
    client: &dyn Client,
    database_name: &str,
    descriptions: impl IntoIterator<Item = ModelDescription>,
) -> Result<SchemaMapping> {
    let database = client
        .list_applications()?
        .into_iter()
        .find(|app| app.name == database_name)
        .ok_or_else(|| {
            Error::schema_not_found(SchemaObject::Database, format!("'{database_name}'"))
        })?;
    debug!(database = database_name, id = database.id, "resolved database");

    let mut mapping = SchemaMapping::new(database.id);

    for description in descriptions {
        let table_name = description.table_name();
        let table = database
            .tables
            .iter()
            .find(|table| table.name == table_name)
            .ok_or_else(|| {
                Error::schema_not_found(
                    SchemaObject::Table,
                    format!("'{database_name}'/'{table_name}'"),
                )
            })?;

        let fields: HashMap<String, u64> = client
            .list_table_fields(table.id)?
            .into_iter()
            .map(|field| (field.name, field.id))
            .collect();

        let mut model = ModelMapping::new(table.id);
        for (attr, remote_name) in description.remote_names() {
            let field_id = fields.get(remote_name).ok_or_else(|| {
                Error::schema_not_found(
                    SchemaObject::Field,
                    format!("'{database_name}'/'{table_name}'/'{remote_name}'"),
                )
            })?;
            model.insert_field(attr, *field_id);
        }

        debug!(
            model = description.model_id(),
            table = table_name,
            table_id = table.id,
            fields = model.fields.len(),
            "resolved model"
        );
        mapping
            .models
            .insert(description.model_id().to_string(), model);
    }

    Ok(mapping)
}
