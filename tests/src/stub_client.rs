use crate::{Call, ExecLog};

use baserow_orm::{
    types::{Application, FieldType, Table, TableField},
    Client, Error, ListRows, Page, Result, Row,
};
use serde_json::Value;

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

/// In-memory backend that records every call.
///
/// Filters and ordering are recorded but not applied; rows are paged in
/// insertion order.
#[derive(Debug)]
pub struct StubClient {
    applications: Vec<Application>,
    fields: HashMap<u64, Vec<TableField>>,
    rows: Mutex<HashMap<u64, Vec<Row>>>,
    next_id: AtomicU64,
    default_page_size: u32,
    failure: Mutex<Option<Error>>,
    log: ExecLog,
}

impl Default for StubClient {
    fn default() -> Self {
        StubClient {
            applications: vec![],
            fields: HashMap::new(),
            rows: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1000),
            default_page_size: 100,
            failure: Mutex::new(None),
            log: ExecLog::default(),
        }
    }
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &ExecLog {
        &self.log
    }

    pub fn set_default_page_size(&mut self, size: u32) {
        self.default_page_size = size;
    }

    pub fn add_database(&mut self, id: u64, name: &str) {
        self.applications.push(Application {
            id,
            name: name.to_string(),
            order: self.applications.len() as i64,
            ty: "database".to_string(),
            group: None,
            tables: vec![],
        });
    }

    pub fn add_table(&mut self, database_id: u64, id: u64, name: &str) {
        let app = self
            .applications
            .iter_mut()
            .find(|app| app.id == database_id)
            .expect("database added before its tables");
        app.tables.push(Table {
            id,
            name: name.to_string(),
            order: app.tables.len() as i64,
            database_id,
        });
        self.fields.entry(id).or_default();
    }

    pub fn add_field(&mut self, table_id: u64, id: u64, name: &str, ty: FieldType) {
        let fields = self.fields.entry(table_id).or_default();
        fields.push(TableField {
            id,
            table_id,
            name: name.to_string(),
            order: fields.len() as i64,
            primary: fields.is_empty(),
            ty,
        });
    }

    pub fn add_row(&mut self, table_id: u64, row: Value) {
        let Value::Object(row) = row else {
            panic!("rows are JSON objects");
        };
        self.rows
            .get_mut()
            .unwrap()
            .entry(table_id)
            .or_default()
            .push(row);
    }

    /// The stored rows of a table.
    pub fn rows(&self, table_id: u64) -> Vec<Row> {
        self.rows
            .lock()
            .unwrap()
            .get(&table_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Makes the next call fail with `error` after it has been recorded.
    pub fn fail_next(&self, error: Error) {
        *self.failure.lock().unwrap() = Some(error);
    }

    fn record(&self, call: Call) -> Result<()> {
        self.log.push(call);
        match self.failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn row_not_found(row_id: u64) -> Error {
        Error::api(
            "ERROR_ROW_DOES_NOT_EXIST",
            format!("The row {row_id} does not exist."),
        )
    }
}

impl Client for StubClient {
    fn list_applications(&self) -> Result<Vec<Application>> {
        self.record(Call::ListApplications)?;
        Ok(self.applications.clone())
    }

    fn list_table_fields(&self, table_id: u64) -> Result<Vec<TableField>> {
        self.record(Call::ListTableFields { table_id })?;
        self.fields.get(&table_id).cloned().ok_or_else(|| {
            Error::api(
                "ERROR_TABLE_DOES_NOT_EXIST",
                "The requested table does not exist.",
            )
        })
    }

    fn list_table_rows(&self, table_id: u64, request: &ListRows) -> Result<Page<Row>> {
        self.record(Call::ListTableRows {
            table_id,
            request: request.clone(),
        })?;

        let rows = self.rows(table_id);
        let size = request.size.unwrap_or(self.default_page_size).max(1) as usize;
        let page = request.page.unwrap_or(1);
        let start = (page as usize - 1) * size;
        let end = (start + size).min(rows.len());

        Ok(Page {
            count: rows.len() as u64,
            previous: (page > 1).then(|| page - 1),
            next: (end < rows.len()).then(|| page + 1),
            results: rows.get(start..end).map(<[Row]>::to_vec).unwrap_or_default(),
        })
    }

    fn get_table_row(&self, table_id: u64, row_id: u64) -> Result<Row> {
        self.record(Call::GetTableRow { table_id, row_id })?;
        self.rows(table_id)
            .into_iter()
            .find(|row| row.get("id").and_then(Value::as_u64) == Some(row_id))
            .ok_or_else(|| Self::row_not_found(row_id))
    }

    fn create_table_row(&self, table_id: u64, record: &Row) -> Result<Row> {
        self.record(Call::CreateTableRow {
            table_id,
            record: record.clone(),
        })?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut row = record.clone();
        row.insert("id".to_string(), id.into());
        self.rows
            .lock()
            .unwrap()
            .entry(table_id)
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    fn update_table_row(&self, table_id: u64, row_id: u64, record: &Row) -> Result<Row> {
        self.record(Call::UpdateTableRow {
            table_id,
            row_id,
            record: record.clone(),
        })?;

        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .get_mut(&table_id)
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|row| row.get("id").and_then(Value::as_u64) == Some(row_id))
            })
            .ok_or_else(|| Self::row_not_found(row_id))?;

        for (key, value) in record {
            row.insert(key.clone(), value.clone());
        }
        Ok(row.clone())
    }
}
