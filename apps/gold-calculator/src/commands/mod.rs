//! # Commands Module
//!
//! Every operation the UI binding layer may call.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── auth.rs        ◄─── Register, login, logout, session
//! ├── calculator.rs  ◄─── Breakdowns, weights, fees, price and tax
//! └── config.rs      ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Commands are plain functions. Each takes only the state it needs, so
//! a binding layer can hold the states wherever it likes:
//! ```rust,ignore
//! // Only needs auth
//! fn login(auth: &AuthState<S>, email: &str, password: &str)
//!
//! // Only needs the engine
//! fn get_all_breakdowns(calculator: &CalculatorState)
//!
//! // Needs both engine and config (for currency formatting)
//! fn get_breakdown(calculator: &CalculatorState, config: &ConfigState, karat: u32)
//! ```
//!
//! ## Failure Styles
//! - Auth commands never fail: outcomes travel as `{ success, message }`.
//! - Calculator commands return `ApiResult` and fail for unsupported karats
//!   or amounts too large to price.

pub mod auth;
pub mod calculator;
pub mod config;
