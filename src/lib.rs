//! Field-assignment generation between two bean-style types.
//!
//! `core` holds the pure engine (naming, matching, statement synthesis,
//! indented insertion); `mapping` wires it to host collaborators.
pub mod core;
pub mod mapping;

pub use crate::core::error::{BridgeError, BufferError, ClipboardError, MissingInput};
pub use crate::core::types::{AccessorStyle, FieldName, FieldSet, GeneratedStatement, MatchResult, ObjectBinding};
pub use crate::mapping::config::BridgeConfig;
pub use crate::mapping::generator::{BridgeAction, Plan, RunReport};
