use baserow_core::{Client, ListRows, Page, Result, Row};

/// Iterator over the non-empty pages of a row listing.
///
/// Stops after the page without a successor, or after the first error.
#[derive(Debug)]
pub struct RowPages<'a> {
    client: &'a dyn Client,
    table_id: u64,
    request: ListRows,
    done: bool,
}

impl<'a> RowPages<'a> {
    pub(crate) fn new(client: &'a dyn Client, table_id: u64, request: ListRows) -> Self {
        RowPages {
            client,
            table_id,
            request,
            done: false,
        }
    }
}

/// Iterates over the pages of a row listing through any [`Client`].
pub fn paginated_table_rows(client: &dyn Client, table_id: u64, request: ListRows) -> RowPages<'_> {
    RowPages::new(client, table_id, request)
}

impl Iterator for RowPages<'_> {
    type Item = Result<Page<Row>>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let page = match self.client.list_table_rows(self.table_id, &self.request) {
                Ok(page) => page,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };

            match page.next {
                Some(next) => self.request.page = Some(next),
                None => self.done = true,
            }

            if !page.results.is_empty() {
                return Some(Ok(page));
            }
        }

        None
    }
}
