//! # sc-core
//!
//! Build pipeline orchestration for sitecraft.
//!
//! This crate provides:
//! - Configuration loading from the `.sitecraft/` directory
//! - The backend client abstraction with HTTP and in-process implementations
//! - The pipeline orchestrator joining stage timers with backend calls
//! - Run state transitions and the session actor that owns them
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and settings persistence
//! - [`client`]: BackendClient trait and implementations
//! - [`timer`]: Stage timer and the simulated-work join
//! - [`engine`]: Pipeline orchestrator
//! - [`state`]: Run state transitions
//! - [`terminal`]: Command terminal transcript
//! - [`github`]: GitHub push
//! - [`session`]: Session actor routing UI ops

pub mod client;
pub mod config;
pub mod engine;
pub mod github;
pub mod session;
pub mod state;
pub mod terminal;
pub mod timer;
