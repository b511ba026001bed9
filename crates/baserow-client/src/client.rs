use crate::{
    paginate::RowPages,
    response::{status_error, RawPage},
    CredentialCache,
};

use baserow_core::{
    err, Application, Client, Error, Group, ListRows, Page, Result, Row, Table, TableField, User,
};
use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Deserialize, Serialize,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use std::{fmt, path::Path, time::Duration};

/// Authorization sent with every request.
///
/// A JWT is needed for operations scoped to a user session, such as listing
/// applications. A database token is enough for row operations.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    Token(String),
    Jwt(String),
}

impl Auth {
    fn header(&self) -> String {
        match self {
            Auth::Token(token) => format!("Token {token}"),
            Auth::Jwt(jwt) => format!("JWT {jwt}"),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Token(_) => f.write_str("Token(..)"),
            Auth::Jwt(_) => f.write_str("Jwt(..)"),
        }
    }
}

/// Blocking client for a Baserow server.
#[derive(Debug, Clone)]
pub struct BaserowClient {
    url: String,
    agent: ureq::Agent,
    auth: Option<Auth>,
}

#[derive(Deserialize)]
struct TokenResponse {
    user: User,
    token: String,
}

#[derive(Deserialize)]
struct CreateUserResponse {
    user: User,
    token: Option<String>,
}

/// Registration payload for [`BaserowClient::create_user`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Also return a JWT for the new user.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub authenticate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_invitation_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<u64>,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            ..NewUser::default()
        }
    }
}

impl BaserowClient {
    /// Creates an unauthenticated client for the server at `url`.
    pub fn new(url: &str) -> Result<BaserowClient> {
        BaserowClient::with_timeout(url, Duration::from_secs(30))
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Result<BaserowClient> {
        let url = url.trim_end_matches('/');
        url::Url::parse(url).map_err(|e| err!("invalid Baserow URL '{url}': {e}"))?;

        Ok(BaserowClient {
            url: url.to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            auth: None,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    pub fn jwt(&self) -> Option<&str> {
        match &self.auth {
            Some(Auth::Jwt(jwt)) => Some(jwt),
            _ => None,
        }
    }

    /// Authenticates with a database token, replacing any JWT.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.auth = Some(Auth::Token(token.into()));
    }

    /// Authenticates with a JWT, replacing any database token.
    pub fn set_jwt(&mut self, jwt: impl Into<String>) {
        self.auth = Some(Auth::Jwt(jwt.into()));
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.set_jwt(jwt);
        self
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let request = self
            .agent
            .request(method, &format!("{}/{}", self.url, path.trim_start_matches('/')));
        match &self.auth {
            Some(auth) => request.set("Authorization", &auth.header()),
            None => request,
        }
    }

    fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        debug!(method, path, "request");

        let mut request = self.request(method, path);
        for (key, value) in query {
            request = request.query(key, value);
        }

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(status_error(method, path, code, response))
            }
            Err(err) => return Err(Error::transport(err)),
        };

        response.into_json().map_err(Error::transport)
    }

    /// Creates a JWT from user credentials.
    pub fn token_auth(&self, username: &str, password: &str) -> Result<(User, String)> {
        let response: TokenResponse = self.call(
            "POST",
            "/api/user/token-auth/",
            &[],
            Some(json!({"username": username, "password": password})),
        )?;
        Ok((response.user, response.token))
    }

    /// Exchanges a JWT for a fresh one.
    pub fn token_refresh(&self, jwt: &str) -> Result<(User, String)> {
        let response: TokenResponse = self.call(
            "POST",
            "/api/user/token-refresh/",
            &[],
            Some(json!({"token": jwt})),
        )?;
        Ok((response.user, response.token))
    }

    /// Authenticates as `username`, reusing a cached JWT when `cache` names a
    /// credentials file that holds one for this server.
    ///
    /// A cached JWT is refreshed before use. When it was rejected, or nothing
    /// was cached, a new JWT is created from the password and written back to
    /// the cache.
    pub fn login(&mut self, username: &str, password: &str, cache: Option<&Path>) -> Result<User> {
        if let Some(path) = cache {
            if let Some(user) = self.load_credentials(username, path)? {
                return Ok(user);
            }
        }

        info!(username, "creating new JWT");
        let (user, jwt) = self.token_auth(username, password)?;
        self.set_jwt(jwt);

        if let Some(path) = cache {
            self.save_credentials(username, path)?;
        }
        Ok(user)
    }

    /// Loads and refreshes the cached JWT of `username`. Returns `None` if no
    /// usable JWT was cached.
    pub fn load_credentials(&mut self, username: &str, path: &Path) -> Result<Option<User>> {
        let cache = CredentialCache::load(path)?;
        let Some(jwt) = cache.get(&self.url, username) else {
            return Ok(None);
        };

        info!(username, "refreshing JWT");
        match self.token_refresh(jwt) {
            Ok((user, jwt)) => {
                self.set_jwt(jwt);
                self.save_credentials(username, path)?;
                Ok(Some(user))
            }
            Err(err) if err.is_api() => {
                warn!(username, %err, "cached JWT was rejected");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Stores the current JWT for `username` in the credentials file.
    pub fn save_credentials(&self, username: &str, path: &Path) -> Result<()> {
        let Some(jwt) = self.jwt() else {
            return Err(err!("no JWT to save for '{username}'"));
        };

        let mut cache = CredentialCache::load(path)?;
        cache.insert(&self.url, username, jwt);
        cache.save(path)
    }

    /// Instance-wide settings, as the server returns them.
    pub fn get_settings(&self) -> Result<Value> {
        self.call("GET", "/api/settings/", &[], None)
    }

    /// Updates instance-wide settings. Requires a staff JWT.
    pub fn update_settings(&self, settings: &Value) -> Result<()> {
        let _: IgnoredAny = self.call(
            "PATCH",
            "/api/settings/update/",
            &[],
            Some(settings.clone()),
        )?;
        Ok(())
    }

    /// Registers a user. The JWT is only returned when `authenticate` was set.
    pub fn create_user(&self, user: &NewUser) -> Result<(User, Option<String>)> {
        let response: CreateUserResponse =
            self.call("POST", "/api/user/", &[], Some(serde_json::to_value(user)?))?;
        info!(email = %user.email, "created user");
        Ok((response.user, response.token))
    }

    pub fn list_groups(&self) -> Result<Vec<Group>> {
        self.call("GET", "/api/groups/", &[], None)
    }

    pub fn create_group(&self, name: &str) -> Result<Group> {
        self.call("POST", "/api/groups/", &[], Some(json!({"name": name})))
    }

    pub fn get_table(&self, table_id: u64) -> Result<Table> {
        self.call("GET", &format!("/api/database/tables/{table_id}/"), &[], None)
    }

    /// Renames a table.
    pub fn update_table(&self, table_id: u64, name: &str) -> Result<Table> {
        self.call(
            "PATCH",
            &format!("/api/database/tables/{table_id}/"),
            &[],
            Some(json!({"name": name})),
        )
    }

    pub fn list_tables(&self, database_id: u64) -> Result<Vec<Table>> {
        self.call(
            "GET",
            &format!("/api/database/tables/database/{database_id}/"),
            &[],
            None,
        )
    }

    /// Iterates over the non-empty pages of a row listing.
    pub fn paginated_table_rows(&self, table_id: u64, request: ListRows) -> RowPages<'_> {
        RowPages::new(self, table_id, request)
    }
}

impl Client for BaserowClient {
    fn list_applications(&self) -> Result<Vec<Application>> {
        self.call("GET", "/api/applications/", &[], None)
    }

    fn list_table_fields(&self, table_id: u64) -> Result<Vec<TableField>> {
        self.call(
            "GET",
            &format!("/api/database/fields/table/{table_id}/"),
            &[],
            None,
        )
    }

    fn list_table_rows(&self, table_id: u64, request: &ListRows) -> Result<Page<Row>> {
        let raw: RawPage = self.call(
            "GET",
            &format!("/api/database/rows/table/{table_id}/"),
            &request.to_query_pairs(),
            None,
        )?;
        Ok(raw.into_page(request.page))
    }

    fn get_table_row(&self, table_id: u64, row_id: u64) -> Result<Row> {
        self.call(
            "GET",
            &format!("/api/database/rows/table/{table_id}/{row_id}/"),
            &[],
            None,
        )
    }

    fn create_table_row(&self, table_id: u64, record: &Row) -> Result<Row> {
        self.call(
            "POST",
            &format!("/api/database/rows/table/{table_id}/"),
            &[],
            Some(serde_json::Value::Object(record.clone())),
        )
    }

    fn update_table_row(&self, table_id: u64, row_id: u64, record: &Row) -> Result<Row> {
        self.call(
            "PATCH",
            &format!("/api/database/rows/table/{table_id}/{row_id}/"),
            &[],
            Some(serde_json::Value::Object(record.clone())),
        )
    }
}
