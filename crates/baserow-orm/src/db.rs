mod translator;
use translator::{field_reference, Translator};

use crate::{Model, ModelMapping, Query, Record, Result, SchemaMapping};

use baserow_core::{Client, Error, Filter, Row, SchemaObject};
use tracing::{debug, trace};

use std::sync::{Arc, PoisonError, RwLock};

/// Binds a [`SchemaMapping`] to a live transport.
///
/// Cloning is cheap; clones share the transport, the mapping and the
/// registered placeholder translations.
#[derive(Clone, Debug)]
pub struct Database {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    client: Arc<dyn Client>,
    mapping: SchemaMapping,
    translator: RwLock<Translator>,
}

impl Database {
    pub fn new(client: Arc<dyn Client>, mapping: SchemaMapping) -> Database {
        Database {
            shared: Arc::new(Shared {
                client,
                mapping,
                translator: RwLock::new(Translator::default()),
            }),
        }
    }

    pub fn client(&self) -> &dyn Client {
        &*self.shared.client
    }

    pub fn mapping(&self) -> &SchemaMapping {
        &self.shared.mapping
    }

    fn model_mapping<M: Model>(&self) -> Result<&ModelMapping> {
        self.shared.mapping.model(M::model_id())
    }

    /// Returns an unexecuted query over every row of `M`'s table.
    pub fn select<M: Model>(&self) -> Result<Query<M>> {
        let mapping = self.model_mapping::<M>()?;
        self.register::<M>(mapping)?;
        Ok(Query::new(self.clone(), mapping.table_id))
    }

    fn register<M: Model>(&self, mapping: &ModelMapping) -> Result<()> {
        let registered = self
            .shared
            .translator
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_registered(M::model_id());
        if registered {
            return Ok(());
        }

        self.shared
            .translator
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(M::schema(), mapping)
    }

    /// Rewrites a filter on a registered column placeholder to the backend
    /// field reference. Any other filter is returned unchanged.
    pub fn translate_filter(&self, filter: &Filter) -> Filter {
        self.shared
            .translator
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .translate(filter)
    }

    /// Rewrites a column placeholder to the backend field reference.
    pub(crate) fn translate_field(&self, field: &str) -> String {
        self.shared
            .translator
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .resolve(field)
            .unwrap_or(field)
            .to_string()
    }

    /// Decodes a raw row into an instance of `M`.
    ///
    /// Backend fields the mapping does not know about are dropped.
    pub fn build_instance<M: Model>(&self, mut row: Row) -> Result<M> {
        let mapping = self.model_mapping::<M>()?;

        row.remove("order");
        let id = row
            .remove("id")
            .and_then(|id| id.as_u64())
            .ok_or_else(|| Error::invalid_result("row without an integer id"))?;

        let reverse = mapping.reverse_fields();
        let mut record = Record::with_capacity(reverse.len());

        for (key, value) in row {
            let field_id = key
                .strip_prefix("field_")
                .and_then(|field_id| field_id.parse::<u64>().ok())
                .ok_or_else(|| {
                    Error::invalid_result(format!("unexpected key '{key}' in row {id}"))
                })?;

            match reverse.get(&field_id) {
                Some(attr) => {
                    record.insert(attr.clone(), value);
                }
                None => trace!(model = M::model_id(), field_id, "dropping unmapped field"),
            }
        }

        M::load(Some(self), Some(id), record)
    }

    /// Fetches and decodes a single row of `M`.
    pub fn load_single<M: Model>(&self, row_id: u64) -> Result<M> {
        let mapping = self.model_mapping::<M>()?;
        debug!(model = M::model_id(), table_id = mapping.table_id, row_id, "loading row");
        let row = self.client().get_table_row(mapping.table_id, row_id)?;
        self.build_instance(row)
    }

    /// Creates the row of an unsaved instance and assigns its id, or updates
    /// the row of a saved one.
    pub fn save<M: Model>(&self, instance: &mut M) -> Result<()> {
        let mapping = self.model_mapping::<M>()?;

        let mut record = Row::new();
        for (attr, value) in instance.to_record()? {
            let field_id = mapping.field(&attr).ok_or_else(|| {
                Error::schema_not_found(
                    SchemaObject::Field,
                    format!("'{}'/'{attr}'", M::model_id()),
                )
            })?;
            record.insert(field_reference(field_id), value);
        }

        match instance.id() {
            None => {
                debug!(model = M::model_id(), table_id = mapping.table_id, "creating row");
                let row = self.client().create_table_row(mapping.table_id, &record)?;
                let id = row
                    .get("id")
                    .and_then(|id| id.as_u64())
                    .ok_or_else(|| Error::invalid_result("created row without an integer id"))?;
                instance.set_id(id);
            }
            Some(id) => {
                debug!(
                    model = M::model_id(),
                    table_id = mapping.table_id,
                    row_id = id,
                    "updating row"
                );
                self.client()
                    .update_table_row(mapping.table_id, id, &record)?;
            }
        }

        Ok(())
    }
}
