//! # World Graph
//!
//! Storage and queries for the entities of a world atlas and the typed
//! relationships between them.
//!
//! ## Core Components
//!
//! - **store**: the entity registry and the relationship graph, which keeps
//!   inverse edges in step and rejects containment cycles
//! - **hierarchy**: read-only traversals over containment (ancestors,
//!   descendants, events visible at a location, one-hop sub-queries)
//! - **atlas**: the registry and graph behind a single lock
//! - **snapshot**: a durable representation that is re-validated on load

pub mod atlas;
pub mod hierarchy;
pub mod snapshot;
pub mod store;

pub use atlas::*;
pub use hierarchy::*;
pub use snapshot::*;
pub use store::*;
