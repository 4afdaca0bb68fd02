//! Store module - the only owners of entities and edges.
//!
//! - **EntityRegistry**: creates and looks up entities by id
//! - **RelationshipGraph**: directed, typed edges keyed by source entity
//! - **Edge**: one outgoing relationship as seen from its source

mod edge;
mod graph;
mod registry;

pub use edge::*;
pub use graph::*;
pub use registry::*;
