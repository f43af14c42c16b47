//! Taskdeck: command-driven task tracker core for chat-platform bots.
//!
//! This crate provides the task lifecycle and state-transition logic
//! behind a chat bot's task commands: creation, listing, inspection,
//! partial edits, completion, and soft deletion, all scoped to a
//! collaboration space, plus the per-space notification configuration.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//!   (the remote record store, the chat platform, presentation)
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`config`]: Process configuration loaded once at startup
//! - [`task`]: Task lifecycle and space configuration

pub mod config;
pub mod task;
