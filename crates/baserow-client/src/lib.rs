//! Blocking HTTP transport for the Baserow REST API.

mod client;
pub use client::{Auth, BaserowClient, NewUser};

mod credentials;
pub use credentials::{CredentialCache, DEFAULT_CREDENTIALS_FILE};

mod paginate;
pub use paginate::{paginated_table_rows, RowPages};

mod response;
