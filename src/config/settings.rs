//! Application settings read from the environment.
//!
//! Values are usually provided through a `.env` file loaded by `dotenvy` in
//! `main`; every setting has a default so the binary runs without one.

use super::database::get_database_url;
use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Default location of the catalog seed file
pub const DEFAULT_CATALOG_PATH: &str = "catalog.toml";

/// Runtime settings for the catering backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Connection URL handed to `SeaORM`
    pub database_url: String,
    /// TOML file used to seed an empty store
    pub catalog_path: PathBuf,
    /// Tenant whose view of the catalog is used, None for all articles
    pub tenant_id: Option<i64>,
}

impl AppSettings {
    /// Loads settings from `DATABASE_URL`, `CATALOG_PATH` and `TENANT_ID`.
    ///
    /// # Errors
    /// Returns an error if `TENANT_ID` is set but is not an integer.
    pub fn from_env() -> Result<Self> {
        let catalog_path = std::env::var("CATALOG_PATH")
            .unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string())
            .into();
        let tenant_id = parse_tenant_id(std::env::var("TENANT_ID").ok().as_deref())?;

        Ok(Self {
            database_url: get_database_url(),
            catalog_path,
            tenant_id,
        })
    }
}

fn parse_tenant_id(raw: Option<&str>) -> Result<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|e| Error::Config {
            message: format!("TENANT_ID must be an integer, got {value:?}: {e}"),
        }),
    }
}
