//! Ambrien Engine library.
//!
//! The session layer around the Ambrien character sheet domain.
//!
//! ## Structure
//!
//! - `use_cases/` - Character sheet operations, gated on the session and the lock
//! - `stores/` - The in-memory character collection, persisted on every change
//! - `infrastructure/` - Port traits and their adapters (storage, clock, session)
//! - `config` / `telemetry` - Environment configuration and logging setup
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod stores;
pub mod telemetry;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
