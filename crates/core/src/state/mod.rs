//! Run state management.
//!
//! This module provides the run state machine: pure constructors plus async
//! transition functions that mutate a [`PipelineRun`](sc_protocol::run_models::PipelineRun)
//! and emit the matching events.

pub mod run;
