//!
//! This is the runtime shared by the Facet executors: values, instances and the message dispatcher.
//!
#![warn(missing_docs)]

/// The coercion protocol used by primitive operators.
pub mod coerce;
/// The errors raised while running Facet code.
pub mod error;
/// Facilities for manipulating object and procedure instances.
pub mod instance;
/// Facilities for invoking methods, primitives and executors.
pub mod invokable;
/// Definitions for all primitive and native method tables.
pub mod primitives;
/// The runtime's main data structure.
pub mod universe;
/// Facilities for manipulating values.
pub mod value;

pub use crate::error::Error;
pub use crate::universe::Universe;
pub use crate::value::Value;
