//! Shared types for the inventory system.
//!
//! Every layer reports malformed primitive input through [`InvalidArgument`],
//! so the type lives here rather than in any single crate.

pub mod types;

pub use types::{InvalidArgument, parse_uuid};
