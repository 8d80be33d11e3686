//! # sc-protocol
//!
//! Core protocol definitions and data models for sitecraft.
//!
//! This crate defines all shared data structures used for:
//! - The five-stage build pipeline (stages, statuses, runs, artifacts)
//! - Request/response bodies of the `/api` backend
//! - Client configuration and persisted settings
//! - Inter-process communication between the UI and Core
//!
//! ## Modules
//!
//! - [`stage_models`]: Stage identifiers, statuses and backend operations
//! - [`run_models`]: Runtime state of a single build attempt
//! - [`api_models`]: Wire types for the backend HTTP surface
//! - [`terminal_models`]: Command terminal transcript entries
//! - [`config_models`]: Client configuration and persisted settings
//! - [`ipc`]: Operations and Events for Core-UI communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: serde, ts-rs, uuid and chrono
//! - TypeScript generation: all types derive `TS` for browser clients
//! - Independent compilation: no dependencies on other sitecraft crates

pub mod api_models;
pub mod config_models;
pub mod ipc;
pub mod run_models;
pub mod stage_models;
pub mod terminal_models;

// Re-export all public types for convenience
pub use api_models::*;
pub use config_models::*;
pub use ipc::*;
pub use run_models::*;
pub use stage_models::*;
pub use terminal_models::*;
