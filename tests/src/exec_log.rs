use baserow_orm::{ListRows, Row};

use std::sync::{Arc, Mutex};

/// A transport call recorded by [`StubClient`](crate::StubClient).
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListApplications,
    ListTableFields { table_id: u64 },
    ListTableRows { table_id: u64, request: ListRows },
    GetTableRow { table_id: u64, row_id: u64 },
    CreateTableRow { table_id: u64, record: Row },
    UpdateTableRow { table_id: u64, row_id: u64, record: Row },
}

/// Shared view over the calls of a stub client.
#[derive(Debug, Clone, Default)]
pub struct ExecLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ExecLog {
    pub(crate) fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    /// Row listing requests, in order.
    pub fn list_requests(&self) -> Vec<ListRows> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                Call::ListTableRows { request, .. } => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    /// Row ids fetched one by one, in order.
    pub fn row_fetches(&self) -> Vec<u64> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                Call::GetTableRow { row_id, .. } => Some(*row_id),
                _ => None,
            })
            .collect()
    }
}
