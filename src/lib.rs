//! Config cluster operator
//!
//! Reconciles a multi-service network-control "config" cluster: resolves
//! its configuration, aggregates the dependent database, coordination,
//! broker and identity tiers, renders every per-member configuration
//! artifact and gates member startup and cluster activation.

pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod reconciler;
pub mod storage;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use reconciler::{Reconciler, Repositories};
