use eyre::{Result, bail};
use std::fmt;

pub const URI_VAR: &str = "MONGODB_URI";
pub const DB_NAME_VAR: &str = "MONGODB_DB_NAME";
pub const COLLECTION_NAME_VAR: &str = "MONGODB_COLLECTION_NAME";

/// Where the synced subgraph events live.
#[derive(Clone, PartialEq)]
pub struct MongoConfig {
    pub uri: String,
    pub db_name: String,
    pub collection_name: String,
}
impl MongoConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset and empty variables are both reported as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| {
            let value = lookup(name).filter(|value| !value.is_empty());
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let uri = read(URI_VAR);
        let db_name = read(DB_NAME_VAR);
        let collection_name = read(COLLECTION_NAME_VAR);

        if !missing.is_empty() {
            bail!(
                "Missing required environment variables: {} ({}, {} and {} must all be set)",
                missing.join(", "),
                URI_VAR,
                DB_NAME_VAR,
                COLLECTION_NAME_VAR
            );
        }

        Ok(Self {
            uri,
            db_name,
            collection_name,
        })
    }
}

// The uri usually embeds credentials.
impl fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConfig")
            .field("uri", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("collection_name", &self.collection_name)
            .finish()
    }
}
