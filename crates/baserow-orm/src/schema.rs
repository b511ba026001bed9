//! Declared model schemas.

use crate::{Column, Record, Result};

use baserow_core::Error;
use indexmap::IndexMap;

/// The ordered set of columns a model declares.
#[derive(Debug)]
pub struct ModelSchema {
    id: String,
    table_name: Option<String>,
    columns: IndexMap<String, Column>,
}

/// Assembles a [`ModelSchema`]: local columns first, then inherited ones.
#[derive(Debug)]
pub struct Builder {
    id: String,
    table_name: Option<String>,
    columns: Vec<(String, Column)>,
    inherited: Vec<&'static ModelSchema>,
}

/// A model bound to a table name for mapping generation, with optional
/// per-attribute remote name overrides.
#[derive(Debug, Clone)]
pub struct ModelDescription {
    schema: &'static ModelSchema,
    table_name: String,
    renames: IndexMap<String, String>,
}

impl ModelSchema {
    pub fn builder(id: impl Into<String>) -> Builder {
        Builder {
            id: id.into(),
            table_name: None,
            columns: vec![],
            inherited: vec![],
        }
    }

    /// The key of the model in a schema mapping.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn columns(&self) -> &IndexMap<String, Column> {
        &self.columns
    }

    pub fn column(&self, attr: &str) -> Option<&Column> {
        self.columns.get(attr)
    }

    /// Checks that `record` holds exactly the declared attributes.
    pub fn check_record(&self, record: &Record) -> Result<()> {
        if let Some(attr) = self.columns.keys().find(|attr| !record.contains_key(*attr)) {
            return Err(Error::missing_attribute(&self.id, attr));
        }

        if let Some(key) = record.keys().find(|key| !self.columns.contains_key(*key)) {
            return Err(Error::unrecognized_attribute(&self.id, key));
        }

        Ok(())
    }

    /// Copies the values of the attributes this schema declares out of `record`.
    pub fn project(&self, record: &Record) -> Record {
        self.columns
            .keys()
            .filter_map(|attr| Some((attr.clone(), record.get(attr)?.clone())))
            .collect()
    }

    pub fn of(&'static self, table_name: impl Into<String>) -> ModelDescription {
        ModelDescription {
            schema: self,
            table_name: table_name.into(),
            renames: IndexMap::new(),
        }
    }

    /// Describes the model against its declared table name.
    pub fn description(&'static self) -> Result<ModelDescription> {
        match &self.table_name {
            Some(table_name) => Ok(self.of(table_name.clone())),
            None => Err(Error::invalid_schema(format!(
                "model '{}' declares no table name; describe it with `of`",
                self.id
            ))),
        }
    }
}

impl Builder {
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn column(mut self, attr: impl Into<String>, column: Column) -> Self {
        self.columns.push((attr.into(), column));
        self
    }

    /// Merges the columns of `base` not declared locally.
    pub fn inherit(mut self, base: &'static ModelSchema) -> Self {
        self.inherited.push(base);
        self
    }

    pub fn build(self) -> Result<ModelSchema> {
        let mut columns = IndexMap::new();

        for (attr, column) in self.columns {
            if attr == "id" {
                return Err(Error::invalid_schema(format!(
                    "model '{}' declares reserved attribute 'id'",
                    self.id
                )));
            }

            if columns.insert(attr.clone(), column).is_some() {
                return Err(Error::invalid_schema(format!(
                    "model '{}' declares attribute '{attr}' twice",
                    self.id
                )));
            }
        }

        let mut table_name = self.table_name;

        for base in self.inherited {
            for (attr, column) in &base.columns {
                columns
                    .entry(attr.clone())
                    .or_insert_with(|| column.clone());
            }
            if table_name.is_none() {
                table_name = base.table_name.clone();
            }
        }

        Ok(ModelSchema {
            id: self.id,
            table_name,
            columns,
        })
    }
}

impl ModelDescription {
    pub fn schema(&self) -> &'static ModelSchema {
        self.schema
    }

    pub fn model_id(&self) -> &str {
        self.schema.id()
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Resolves `attr` against `remote_name` instead of its column's name.
    pub fn rename(mut self, attr: impl Into<String>, remote_name: impl Into<String>) -> Self {
        self.renames.insert(attr.into(), remote_name.into());
        self
    }

    /// The remote field name each declared attribute resolves against.
    pub fn remote_names(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.schema.columns.iter().map(|(attr, column)| {
            let remote = self
                .renames
                .get(attr)
                .map(String::as_str)
                .unwrap_or(column.name());
            (attr.as_str(), remote)
        })
    }
}
