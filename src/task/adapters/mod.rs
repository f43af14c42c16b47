//! Adapter implementations of the task ports.

pub mod memory;
mod summary;

pub use summary::SummaryPresenter;
