use baserow_core::{err, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use std::{collections::BTreeMap, fs, io, path::Path};

pub const DEFAULT_CREDENTIALS_FILE: &str = ".baserow-creds.json";

/// Cached JWTs keyed by server URL, then username.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialCache {
    servers: BTreeMap<String, BTreeMap<String, String>>,
}

impl CredentialCache {
    /// Reads the cache at `path`. A missing or unreadable file yields an empty cache.
    pub fn load(path: &Path) -> Result<CredentialCache> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(Error::from(err).context(err!("reading {}", path.display())))
            }
        };

        match serde_json::from_str(&json) {
            Ok(cache) => Ok(cache),
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring unparsable credentials file");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|err| Error::from(err).context(err!("writing {}", path.display())))
    }

    pub fn get(&self, url: &str, username: &str) -> Option<&str> {
        self.servers.get(url)?.get(username).map(String::as_str)
    }

    pub fn insert(&mut self, url: &str, username: &str, jwt: &str) {
        self.servers
            .entry(url.to_string())
            .or_default()
            .insert(username.to_string(), jwt.to_string());
    }
}
