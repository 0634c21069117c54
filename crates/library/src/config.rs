//! Configuration loading for the library stack.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for assembling a [`Library`](crate::Library).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Path of the SQLite database file, or `":memory:"`.
    pub database: PathBuf,
    /// Fixed latency, in milliseconds, injected before every response of
    /// the remote stand-in. Off by default.
    pub remote_latency_ms: Option<u64>,
    /// Bundled seed asset for the remote stand-in; the default catalogue
    /// when unset.
    pub seed: Option<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("shelf.db"),
            remote_latency_ms: None,
            seed: None,
        }
    }
}

impl LibraryConfig {
    /// Load configuration from defaults, then an optional TOML file, then
    /// `SHELF_`-prefixed environment variables. Later providers win.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed("SHELF_")).extract().or_raise(|| ErrorKind::Config)
    }

    /// Configuration for a throwaway, fully in-memory stack.
    pub fn in_memory() -> Self {
        Self {
            database: PathBuf::from(":memory:"),
            ..Self::default()
        }
    }

    pub(crate) fn wants_in_memory(&self) -> bool {
        self.database.as_os_str() == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_providers() {
        figment::Jail::expect_with(|_jail| {
            let config = LibraryConfig::load(None).unwrap();
            assert_eq!(config.database, PathBuf::from("shelf.db"));
            assert!(config.remote_latency_ms.is_none());
            assert!(config.seed.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "shelf.toml",
                r#"
                    database = "books.sqlite"
                    remote_latency_ms = 150
                "#,
            )?;
            let config = LibraryConfig::load(Some(Path::new("shelf.toml"))).unwrap();
            assert_eq!(config.database, PathBuf::from("books.sqlite"));
            assert_eq!(config.remote_latency_ms, Some(150));
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("shelf.toml", r#"database = "from-file.sqlite""#)?;
            jail.set_env("SHELF_DATABASE", "from-env.sqlite");
            jail.set_env("SHELF_SEED", "fixtures.json");
            let config = LibraryConfig::load(Some(Path::new("shelf.toml"))).unwrap();
            assert_eq!(config.database, PathBuf::from("from-env.sqlite"));
            assert_eq!(config.seed.as_deref(), Some("fixtures.json"));
            Ok(())
        });
    }

    #[test]
    fn test_in_memory_marker() {
        assert!(LibraryConfig::in_memory().wants_in_memory());
        assert!(!LibraryConfig::default().wants_in_memory());
    }

    #[test]
    fn test_rejects_malformed_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SHELF_REMOTE_LATENCY_MS", "not-a-number");
            let err = LibraryConfig::load(None).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Config));
            Ok(())
        });
    }
}
