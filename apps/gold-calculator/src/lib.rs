//! # Gold Calculator Library
//!
//! Application layer of the gold jewelry pricing calculator: wires
//! configuration, storage and state together and exposes the commands a UI
//! binding layer calls.
//!
//! ## Module Organization
//! ```text
//! gold_calculator/
//! ├── lib.rs            ◄─── You are here (logging & startup)
//! ├── state/
//! │   ├── mod.rs        ◄─── State type exports
//! │   ├── auth.rs       ◄─── AuthManager + AuthState
//! │   ├── calculator.rs ◄─── PricingEngine behind a Mutex
//! │   └── config.rs     ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs        ◄─── Command exports
//! │   ├── auth.rs       ◄─── register / login / logout / get_session
//! │   ├── calculator.rs ◄─── breakdowns, weights, fees, price, tax
//! │   └── config.rs     ◄─── get_config
//! └── error.rs          ◄─── AuthError + ApiError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()        RUST_LOG or "info,gold=debug"                 │
//! │  2. ConfigState::from_env()                                             │
//! │  3. App::open(config)                                                   │
//! │       • data dir: GOLD_DATA_DIR or the platform data directory          │
//! │         - macOS:   ~/Library/Application Support/com.gold.calculator    │
//! │         - Windows: %APPDATA%\gold\calculator\data                       │
//! │         - Linux:   ~/.local/share/calculator                            │
//! │       • FileStore on <data dir>/storage.json                            │
//! │       • AuthState: users + session loaded from storage                  │
//! │       • CalculatorState: zeroed profiles, configured price and tax      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gold_calculator::{commands, state::ConfigState, App};
//! use gold_store::MemoryStore;
//! use rust_decimal::Decimal;
//!
//! let app = App::with_store(ConfigState::default(), MemoryStore::new());
//!
//! let response = commands::auth::register(&app.auth, "ana@x.com", "secret", "Ana");
//! assert!(response.success);
//!
//! let card = commands::calculator::update_weight(
//!     &app.calculator,
//!     &app.config,
//!     24,
//!     Decimal::from(10),
//! )
//! .unwrap();
//! assert_eq!(card.formatted_total, "₱44800.00");
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gold_store::{FileStore, KeyValueStore, Storage};

use error::{ApiError, ApiResult};
use state::{AuthManager, AuthState, CalculatorState, ConfigState};

/// Everything a UI binding layer needs to hold.
#[derive(Debug)]
pub struct App<S> {
    pub config: ConfigState,
    pub auth: AuthState<S>,
    pub calculator: CalculatorState,
}

impl<S: KeyValueStore> App<S> {
    /// Builds the app state on top of an existing store.
    pub fn with_store(config: ConfigState, store: S) -> Self {
        let auth = AuthState::new(AuthManager::load(
            Storage::new(store),
            config.auth_options(),
        ));
        let calculator = CalculatorState::new(&config);

        App {
            config,
            auth,
            calculator,
        }
    }
}

impl App<FileStore> {
    /// Opens the JSON file store in the configured data directory.
    ///
    /// ## Errors
    /// - `INTERNAL` if no data directory is configured and the platform
    ///   has none
    /// - `STORAGE_ERROR` if an existing storage file cannot be read
    pub fn open(config: ConfigState) -> ApiResult<Self> {
        let data_dir = resolve_data_dir(&config)?;
        info!(?data_dir, "Data directory determined");

        let store = FileStore::in_dir(&data_dir)?;
        info!(path = ?store.path(), "Storage opened");

        Ok(App::with_store(config, store))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=gold=trace` - Show trace for gold crates only
/// - Default: INFO, DEBUG for gold crates
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,gold=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Determines the directory holding `storage.json`.
///
/// ## Development Override
/// Set `GOLD_DATA_DIR` (read into [`ConfigState::data_dir`]) to use a
/// custom directory.
fn resolve_data_dir(config: &ConfigState) -> ApiResult<PathBuf> {
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "gold", "calculator")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    Ok(proj_dirs.data_dir().to_path_buf())
}
