//! Parameterized SQL for JSONB document collections.

mod builder;
pub use builder::*;
