//! # State Module
//!
//! One state type per concern, so each command takes only what it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  AuthState<S>    │  │ CalculatorState  │  │   ConfigState        │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  Mutex<          │  │  Mutex<          │  │  opening price       │  │
//! │  │   AuthManager>   │  │   PricingEngine> │  │  opening tax rate    │  │
//! │  │  users, session  │  │  karat profiles  │  │  data dir, currency  │  │
//! │  └────────┬─────────┘  └──────────────────┘  └──────────────────────┘  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │   Storage<S: KeyValueStore>  (FileStore in the app, MemoryStore in tests)│
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • AuthState / CalculatorState: exclusive access through a Mutex       │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod calculator;
mod config;

pub use auth::{AuthManager, AuthOptions, AuthState};
pub use calculator::CalculatorState;
pub use config::ConfigState;
