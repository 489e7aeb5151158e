//! Release coordination
//!
//! [`RunnersManager`] clones the target repository, compares the artifact
//! with the hash recorded there, and only when it differs publishes the
//! artifact and records the new hash.

pub mod manager;

pub use manager::RunnersManager;
