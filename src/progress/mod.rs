//! Learner progress tracking module

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::ProgressStorage;
