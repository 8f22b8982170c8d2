//! Coursedesk: the managed-resource-list core of an e-learning admin console.
//!
//! Every admin list screen (courses, categories, badges, roles, audit logs,
//! leaderboards) is the same machine bound to a different record type:
//! - Search/filter over a fixed set of display fields
//! - Add/edit/view/delete modal lifecycle
//! - CRUD synchronization against a remote collection, applied only after
//!   the server confirms
//! - Audit log filtering and role permission checks
//! - Pure mapping of backend records into display rows with placeholders

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - ListState, search, modals                        │
//! │  - Event handling and reconciliation                │
//! │  - ManagedList synchronizer                         │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Service Layer │   │ Domain Layer  │
//! │ (ui/)         │   │ (service/)    │   │ (domain/)     │
//! │ - Views       │   │ - CRUD trait  │   │ - Records     │
//! │ - Mappers     │   │ - Dispatch    │   │ - Audit/roles │
//! │ - View models │   │ - JSON store  │   │ - Errors      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure (paths) and Observability (OTLP)    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Per-screen state machine with event/action model
//! - [`domain`]: Records, audit filter, permissions, errors
//! - [`service`]: Remote collaborator trait and its file-backed implementation
//! - [`ui`]: Display shapes, mappers, view models
//! - [`infrastructure`]: Data directory resolution
//! - [`observability`]: OpenTelemetry tracing to a rotating file
//!
//! # Example
//!
//! ```rust
//! use coursedesk::app::{ManagedList, ModalRole, SearchKeys};
//! use coursedesk::domain::{Category, CategoryDraft};
//! use coursedesk::service::JsonFileService;
//! use coursedesk::Config;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> coursedesk::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let service: JsonFileService<Category> = JsonFileService::open(dir.path().join("categories.json"))?;
//! let mut categories = ManagedList::new(
//!     service,
//!     "Categories",
//!     "categories",
//!     SearchKeys::new(["name", "description"]),
//!     &Config::default(),
//! );
//!
//! categories.mount().await?;
//! categories.open_modal(ModalRole::Add, None);
//! categories.handle_add(CategoryDraft { name: "Design".into(), description: None }).await?;
//! assert!(!categories.modal(ModalRole::Add).is_open());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod service;
pub mod ui;

pub use app::{handle_event, Action, Event, ListState, ManagedList, ModalRole, SearchKeys};
pub use domain::{ConsoleError, Result, ServiceError};

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

/// Runtime configuration.
///
/// Loaded from a TOML file or from a flat string map (for example CLI
/// `--set key=value` pairs). Missing keys take their defaults.
///
/// ```toml
/// trace_level = "debug"
/// trace_file = "~/coursedesk-traces.json"
/// error_fallback = "Something went wrong. Please try again."
/// data_dir = "~/coursedesk"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tracing filter directive (`trace`, `debug`, `info`, ...).
    ///
    /// Tracing is only initialized when this is set. Default: unset.
    pub trace_level: Option<String>,

    /// Trace file path. Default: `coursedesk-otlp.json` in the data directory.
    pub trace_file: Option<String>,

    /// Message surfaced when the service fails without one.
    pub error_fallback: String,

    /// Directory holding the JSON stores. See [`infrastructure::data_dir`].
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_level: None,
            trace_file: None,
            error_fallback: domain::GENERIC_ERROR_MESSAGE.to_string(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Builds a configuration from a flat key/value map.
    ///
    /// Unknown keys are ignored. Blank values count as unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use coursedesk::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// assert_eq!(config.error_fallback, Config::default().error_fallback);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            trace_level: get("trace_level"),
            trace_file: get("trace_file"),
            error_fallback: get("error_fallback").unwrap_or_else(|| domain::GENERIC_ERROR_MESSAGE.to_string()),
            data_dir: get("data_dir"),
        }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] on malformed TOML or unknown keys.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConsoleError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConsoleError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Overlays the set fields of `overrides` onto `self`.
    #[must_use]
    pub fn merged_with(self, overrides: &BTreeMap<String, String>) -> Self {
        let patch = Self::from_map(overrides);
        let fallback_overridden = overrides.get("error_fallback").is_some_and(|v| !v.trim().is_empty());

        Self {
            trace_level: patch.trace_level.or(self.trace_level),
            trace_file: patch.trace_file.or(self.trace_file),
            error_fallback: if fallback_overridden { patch.error_fallback } else { self.error_fallback },
            data_dir: patch.data_dir.or(self.data_dir),
        }
    }
}

/// Prepares the process for running list screens.
///
/// Installs the tracing subscriber when `trace_level` is set.
///
/// # Errors
///
/// Returns an error if tracing was requested but its output file cannot be
/// prepared.
pub fn initialize(config: &Config) -> Result<()> {
    if config.trace_level.is_some() {
        observability::init_tracing(config)?;
    }
    tracing::debug!("coursedesk initialized");
    Ok(())
}
