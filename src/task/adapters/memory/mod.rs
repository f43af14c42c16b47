//! In-memory repository adapters.

mod space_config;
mod task;

pub use space_config::InMemorySpaceConfigRepository;
pub use task::InMemoryTaskRepository;
