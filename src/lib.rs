//! reqtui: a terminal browser for HTTP request collections.
//!
//! Collections group endpoints (saved requests). Both are shown as
//! paginated, filterable, editable lists; an endpoint opens into a detail
//! view that edits and sends the request.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Terminal runtime (main.rs): crossterm, event loop       │
//! └──────────────────────────────────────────────────────────┘
//!            │ Event                         ▲ Vec<Action>
//! ┌──────────────────────────────────────────────────────────┐
//! │  Application layer (app/)                                │
//! │  NavigationRouter ─ FocusCoordinator                     │
//! │  ResourceListView<S> x2, EndpointDetailView              │
//! └──────────────────────────────────────────────────────────┘
//!       │ UIViewModel          │ WorkerMessage        ▲ WorkerResponse
//! ┌──────────────┐   ┌───────────────────────────────────────┐
//! │ UI (ui/)     │   │ Worker pool (worker/)                 │
//! │ renderer     │   │  └─ sources (source/) ─ storage/      │
//! │ themes       │   │  └─ HTTP executor (http/)             │
//! └──────────────┘   └───────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────────────────────────────────┐
//! │  domain/ (models, errors) · infrastructure/ · observability/
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Views never block. Every storage or network operation is a
//! [`WorkerMessage`](worker::WorkerMessage) whose result comes back tagged
//! with the view, and for fetches a generation so stale results are dropped.
//!
//! # Configuration
//!
//! Defaults, then `config.toml`, then command-line flags:
//!
//! ```toml
//! page_size = 15
//! data_dir = "~/.cache/reqtui"
//! theme = "catppuccin-latte"
//! trace_level = "reqtui=debug"
//! request_timeout_secs = 10
//! worker_threads = 4
//! seed_demo = false
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod http;
pub mod infrastructure;
pub mod observability;
pub mod source;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{Action, Dispatch, Event, InputContext, Key, NavigationRouter, View, ViewId};
pub use domain::{ReqError, Result};
pub use ui::Theme;

use app::{collections_view, endpoints_view, EndpointDetailView, DEFAULT_PAGE_SIZE};
use http::RequestExecutor;
use serde::{Deserialize, Serialize};
use std::num::{NonZeroU64, NonZeroUsize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::{JsonStorage, SharedStorage};

/// Config file looked up in the data directory when `--config` is absent.
pub const CONFIG_FILE: &str = "config.toml";

/// Store file inside the data directory.
pub const STORE_FILE: &str = "reqtui.json";

const DEFAULT_TIMEOUT_SECS: NonZeroU64 = match NonZeroU64::new(30) {
    Some(n) => n,
    None => unreachable!(),
};

const DEFAULT_WORKER_THREADS: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(n) => n,
    None => unreachable!(),
};

/// Runtime configuration.
///
/// Zero page sizes, timeouts or thread counts are rejected while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rows per page in list views.
    pub page_size: NonZeroUsize,

    /// Holds the store, logs, traces and the default `config.toml`.
    pub data_dir: PathBuf,

    /// Built-in theme name. Ignored when `theme_file` is set.
    pub theme: Option<String>,

    /// Custom TOML theme; see [`ui::theme`] for the format.
    pub theme_file: Option<PathBuf>,

    /// `EnvFilter` directive, e.g. `info` or `reqtui=debug`. `RUST_LOG`
    /// overrides it.
    pub trace_level: Option<String>,

    pub request_timeout_secs: NonZeroU64,

    pub worker_threads: NonZeroUsize,

    /// Create the demo collections when the store is empty.
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: infrastructure::default_data_dir(),
            theme: None,
            theme_file: None,
            trace_level: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            worker_threads: DEFAULT_WORKER_THREADS,
            seed_demo: true,
        }
    }
}

/// Command-line values layered over the file configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub page_size: Option<NonZeroUsize>,
    pub theme: Option<String>,
    pub trace_level: Option<String>,
    /// Shorthand for `trace_level = "debug"` when no level is given.
    pub verbose: bool,
    pub no_demo: bool,
}

impl Config {
    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ReqError::Config`] for syntax errors, unknown keys, wrong types,
    /// zero values or an invalid `trace_level`.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(contents).map_err(|e| ReqError::Config(e.to_string()))?;
        config.data_dir = infrastructure::expand_tilde(&config.data_dir);
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`.
    ///
    /// # Errors
    ///
    /// [`ReqError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ReqError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
            .map_err(|e| ReqError::Config(format!("{}: {e}", path.display())))
    }

    /// Resolves the layered configuration.
    ///
    /// An explicit `config_path` must exist. Otherwise `config.toml` in the
    /// overridden (or default) data directory is read if present.
    ///
    /// # Errors
    ///
    /// [`ReqError::Config`] from [`load`](Self::load) or from invalid
    /// overrides.
    pub fn resolve(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let base = match config_path {
            Some(path) => Self::load(path)?,
            None => {
                let dir = overrides
                    .data_dir
                    .as_deref()
                    .map_or_else(infrastructure::default_data_dir, infrastructure::expand_tilde);
                let candidate = dir.join(CONFIG_FILE);
                if candidate.is_file() {
                    Self::load(&candidate)?
                } else {
                    Self::default()
                }
            }
        };
        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line values on top of `self`.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(dir) = overrides.data_dir {
            self.data_dir = infrastructure::expand_tilde(&dir);
        }
        if let Some(page_size) = overrides.page_size {
            self.page_size = page_size;
        }
        if let Some(theme) = overrides.theme {
            self.theme = Some(theme);
            self.theme_file = None;
        }
        match overrides.trace_level {
            Some(level) => self.trace_level = Some(level),
            None if overrides.verbose => self.trace_level = Some("debug".to_string()),
            None => {}
        }
        if overrides.no_demo {
            self.seed_demo = false;
        }
        self
    }

    /// Filter directive handed to `EnvFilter`.
    #[must_use]
    pub fn trace_filter(&self) -> &str {
        self.trace_level.as_deref().unwrap_or("info")
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.get())
    }

    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    fn validate(&self) -> Result<()> {
        if let Some(level) = &self.trace_level {
            tracing_subscriber::EnvFilter::try_new(level)
                .map_err(|e| ReqError::Config(format!("invalid trace_level {level:?}: {e}")))?;
        }
        if let Some(name) = &self.theme {
            if self.theme_file.is_none() && Theme::from_name(name).is_none() {
                return Err(ReqError::Config(format!(
                    "unknown theme {name:?}; expected one of {}",
                    ui::theme::BUILTIN_THEMES.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Opens the JSON store and seeds demo data if enabled.
///
/// Returns the shared store and whether demo data was created.
///
/// # Errors
///
/// Propagates failures to create the data directory, read an existing store
/// or write the demo data.
pub fn open_storage(config: &Config) -> Result<(SharedStorage, bool)> {
    let mut store = JsonStorage::new(config.store_path())?;
    let seeded = if config.seed_demo {
        storage::seed_demo_data(&mut store)?
    } else {
        false
    };
    Ok((storage::shared(store), seeded))
}

/// Wires the three views into a router rooted at the collections list.
#[must_use]
pub fn build_router(
    storage: SharedStorage,
    executor: Arc<dyn RequestExecutor>,
    page_size: NonZeroUsize,
) -> NavigationRouter {
    NavigationRouter::new(Box::new(collections_view(storage.clone(), page_size)))
        .with_view(
            Box::new(endpoints_view(storage.clone(), page_size)),
            ViewId::Collections,
        )
        .with_view(
            Box::new(EndpointDetailView::new(storage, executor)),
            ViewId::Endpoints,
        )
}

/// Resolves the configured theme, falling back to the default with a
/// warning when it cannot be loaded.
#[must_use]
pub fn load_theme(config: &Config) -> Theme {
    if let Some(path) = &config.theme_file {
        return Theme::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to load theme file, using default");
            Theme::default()
        });
    }
    config.theme.as_deref().map_or_else(Theme::default, |name| {
        Theme::from_name(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, "unknown theme, using default");
            Theme::default()
        })
    })
}
