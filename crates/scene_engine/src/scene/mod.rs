//! Scene entity model
//!
//! The mutable set of placed instances and their renderable sub-parts,
//! plus the process-wide environment parameters. Identity is handle
//! based: instances and sub-parts live in slot maps, and every selectable
//! sub-part carries a back-reference to its owning instance rather than a
//! live pointer into a traversal structure.

mod environment;
mod instance;
mod material;
mod store;

pub use environment::EnvironmentParams;
pub use instance::{Instance, InstanceKey, PartKey, SubPart};
pub use material::{Material, PartMaterials};
pub use store::{SceneError, SceneStore};
