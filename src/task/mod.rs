//! Task lifecycle management for Taskdeck.
//!
//! This module implements the command-driven task tracker core: creating
//! space-scoped task records, listing and inspecting them, merging
//! partial edits with explicit three-state field updates, transitioning
//! status idempotently to `done` and `deleted`, and maintaining the
//! per-space notification configuration. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
