//! Unit tests for the task module.

mod patch_tests;
mod service_tests;
