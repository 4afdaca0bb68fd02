//! # World Model
//!
//! Value types shared by every part of a world atlas: typed entities, the
//! closed relationship catalog, in-world timestamps, and atlas configuration.
//! This crate holds no storage; the registry and graph live in `world_graph`.

pub mod config;
pub mod entities;
pub mod error;
pub mod relationships;
pub mod time;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use relationships::*;
pub use time::*;
