use crate::{Application, Filter, FilterType, Page, Result, Row, TableField};

use std::fmt::Debug;

/// Row transport used by the ORM.
///
/// Every call is a blocking round trip. Implementations translate failed
/// requests into [`Error::api`](crate::Error::api) or
/// [`Error::transport`](crate::Error::transport) and never retry.
pub trait Client: Debug + Send + Sync + 'static {
    /// List every application (database) visible to the caller, including its tables.
    fn list_applications(&self) -> Result<Vec<Application>>;

    /// List the fields of a table.
    fn list_table_fields(&self, table_id: u64) -> Result<Vec<TableField>>;

    /// Fetch one page of rows of a table.
    fn list_table_rows(&self, table_id: u64, request: &ListRows) -> Result<Page<Row>>;

    /// Fetch a single row.
    fn get_table_row(&self, table_id: u64, row_id: u64) -> Result<Row>;

    /// Create a row and return it as stored.
    fn create_table_row(&self, table_id: u64, record: &Row) -> Result<Row>;

    /// Update a row and return it as stored.
    fn update_table_row(&self, table_id: u64, row_id: u64, record: &Row) -> Result<Row>;
}

/// Parameters of a row listing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListRows {
    pub filters: Vec<Filter>,
    pub filter_type: Option<FilterType>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub order_by: Option<Vec<String>>,
    pub page: Option<u32>,
    pub search: Option<String>,
    pub size: Option<u32>,
    pub user_field_names: bool,
}

impl ListRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes the request as query string pairs. Filters without a value
    /// are sent with an empty value.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![];

        if let Some(exclude) = &self.exclude {
            pairs.push(("exclude".to_string(), exclude.join(",")));
        }

        for filter in &self.filters {
            let (key, value) = filter.to_query_parameter();
            pairs.push((key, value.unwrap_or_default()));
        }

        if let Some(filter_type) = self.filter_type {
            pairs.push(("filter_type".to_string(), filter_type.as_str().to_string()));
        }

        if let Some(include) = &self.include {
            pairs.push(("include".to_string(), include.join(",")));
        }

        if let Some(order_by) = &self.order_by {
            pairs.push(("order_by".to_string(), order_by.join(",")));
        }

        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }

        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }

        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }

        if self.user_field_names {
            pairs.push(("user_field_names".to_string(), "true".to_string()));
        }

        pairs
    }
}
