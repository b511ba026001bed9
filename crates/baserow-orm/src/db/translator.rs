use crate::{ModelMapping, ModelSchema, Result};

use baserow_core::{Error, Filter, SchemaObject};

use std::collections::{HashMap, HashSet};

/// Rewrites column placeholders to backend field references.
#[derive(Debug, Default)]
pub(crate) struct Translator {
    placeholders: HashMap<String, String>,
    registered: HashSet<String>,
}

impl Translator {
    pub(crate) fn is_registered(&self, model_id: &str) -> bool {
        self.registered.contains(model_id)
    }

    /// Registers the placeholders of every column of `schema`. Registering a
    /// model twice is a no-op.
    pub(crate) fn register(&mut self, schema: &ModelSchema, mapping: &ModelMapping) -> Result<()> {
        if self.is_registered(schema.id()) {
            return Ok(());
        }

        let mut placeholders = Vec::with_capacity(schema.columns().len());
        for (attr, column) in schema.columns() {
            let field_id = mapping.field(attr).ok_or_else(|| {
                Error::schema_not_found(SchemaObject::Field, format!("'{}'/'{attr}'", schema.id()))
            })?;
            placeholders.push((column.id().to_string(), field_reference(field_id)));
        }

        self.placeholders.extend(placeholders);
        self.registered.insert(schema.id().to_string());
        Ok(())
    }

    pub(crate) fn resolve(&self, field: &str) -> Option<&str> {
        self.placeholders.get(field).map(String::as_str)
    }

    pub(crate) fn translate(&self, filter: &Filter) -> Filter {
        match self.resolve(&filter.field) {
            Some(field) => filter.with_field(field),
            None => filter.clone(),
        }
    }
}

pub(crate) fn field_reference(field_id: u64) -> String {
    format!("field_{field_id}")
}
