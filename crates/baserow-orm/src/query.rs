use crate::{Column, Database, Model, Result};

use baserow_core::{Error, Filter, FilterType, ListRows, Row};
use tracing::debug;

use std::{fmt, marker::PhantomData, vec};

/// A lazily paginated query over the rows of one model.
///
/// Builder methods are only accepted before the first row is requested.
/// Iterating fetches one page at a time and stops after the page that
/// reports no successor, or after a failed page fetch.
pub struct Query<M> {
    db: Database,
    table_id: u64,
    request: ListRows,
    state: State,
    _p: PhantomData<fn() -> M>,
}

enum State {
    Unexecuted,
    Buffered {
        rows: vec::IntoIter<Row>,
        next_page: Option<u32>,
    },
    Exhausted,
}

impl<M: Model> Query<M> {
    pub(crate) fn new(db: Database, table_id: u64) -> Query<M> {
        Query {
            db,
            table_id,
            request: ListRows::new(),
            state: State::Unexecuted,
            _p: PhantomData,
        }
    }

    pub fn is_executed(&self) -> bool {
        !matches!(self.state, State::Unexecuted)
    }

    fn check_unexecuted(&self) -> Result<()> {
        if self.is_executed() {
            return Err(Error::query_executed());
        }
        Ok(())
    }

    pub fn filter(self, filter: Filter) -> Result<Self> {
        self.filters([filter])
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Result<Self> {
        self.check_unexecuted()?;
        for filter in filters {
            let filter = self.db.translate_filter(&filter);
            self.request.filters.push(filter);
        }
        Ok(self)
    }

    pub fn filter_type(mut self, filter_type: FilterType) -> Result<Self> {
        self.check_unexecuted()?;
        self.request.filter_type = Some(filter_type);
        Ok(self)
    }

    pub fn page_size(mut self, size: u32) -> Result<Self> {
        self.check_unexecuted()?;
        self.request.size = Some(size);
        Ok(self)
    }

    /// Orders by `column`, ascending. Chained calls add tie breakers.
    pub fn order_by(self, column: &Column) -> Result<Self> {
        self.push_order(column, "")
    }

    pub fn order_by_desc(self, column: &Column) -> Result<Self> {
        self.push_order(column, "-")
    }

    fn push_order(mut self, column: &Column, prefix: &str) -> Result<Self> {
        self.check_unexecuted()?;
        let field = self.db.translate_field(column.id());
        self.request
            .order_by
            .get_or_insert_with(Vec::new)
            .push(format!("{prefix}{field}"));
        Ok(self)
    }

    /// Returns the first matching row, fetching a single-row page.
    pub fn first(self) -> Result<M> {
        let mut query = self.page_size(1)?;
        match query.next() {
            Some(instance) => instance,
            None => Err(Error::no_row_returned()),
        }
    }

    fn fetch(&mut self, page: Option<u32>) -> Result<()> {
        self.request.page = page;
        let page = self.db.client().list_table_rows(self.table_id, &self.request)?;
        debug!(
            table_id = self.table_id,
            page = ?self.request.page,
            rows = page.results.len(),
            next_page = ?page.next,
            "fetched page"
        );
        self.state = State::Buffered {
            rows: page.results.into_iter(),
            next_page: page.next,
        };
        Ok(())
    }
}

impl<M: Model> Iterator for Query<M> {
    type Item = Result<M>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let page = match &mut self.state {
                State::Exhausted => return None,
                State::Unexecuted => None,
                State::Buffered { rows, next_page } => {
                    if let Some(row) = rows.next() {
                        return Some(self.db.build_instance(row));
                    }
                    match next_page.take() {
                        Some(page) => Some(page),
                        None => {
                            self.state = State::Exhausted;
                            return None;
                        }
                    }
                }
            };

            if let Err(err) = self.fetch(page) {
                self.state = State::Exhausted;
                return Some(Err(err));
            }
        }
    }
}

impl<M> fmt::Debug for Query<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Unexecuted => "unexecuted",
            State::Buffered { .. } => "buffered",
            State::Exhausted => "exhausted",
        };
        f.debug_struct("Query")
            .field("table_id", &self.table_id)
            .field("request", &self.request)
            .field("state", &state)
            .finish()
    }
}
