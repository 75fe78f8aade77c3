//! FitTrack - gym membership and workout tracker library
//!
//! This library provides the client side of a gym management backend:
//! member and admin sign-in, registration, profile editing, workout logging
//! and the admin member dashboard.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: REST client for the gym backend behind the `GymApi` trait
//! - `store`: secure session persistence (`SessionStore` over a `SecureStore`)
//! - `models`: sessions, members and workouts, plus their pure derivations
//! - `viewmodel`: per-screen load state machines and mutation guards
//! - `catalog`: membership tiers and diet plans
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli` / `commands`: command-line front end
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use fittrack::{Config, HttpApiClient, SessionStore};
//! use fittrack::store::MemoryStore;
//! use fittrack::viewmodel::LoginViewModel;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let api = Arc::new(HttpApiClient::new(&config.api)?);
//!     let session = SessionStore::new(Arc::new(MemoryStore::new()));
//!     let login = LoginViewModel::new(api, session);
//!     login.submit("9999999999", "secret").await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod viewmodel;

// Re-export commonly used types
pub use api::{GymApi, HttpApiClient};
pub use config::Config;
pub use error::{ClientResult, FittrackError, Result};
pub use store::SessionStore;

#[cfg(test)]
pub mod test_utils;
