//! Core types shared across Condor facilities
//!
//! This crate provides foundational types used by the error, logging and
//! transport layers:
//!
//! - **Correlation types**: OperationId, OperationContext
//! - **Sensitive data**: Sensitive<T> marker for header values and tokens
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{OperationContext, OperationId, ResourceKind};
pub use sensitive::Sensitive;
