//! Domain layer: entities and lineage logic
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod coven;
pub mod entities;
pub mod error;
pub mod render;
pub mod traversal;

pub use coven::Coven;
pub use entities::{AttachPolicy, Vampire, VampireId};
pub use error::{DomainError, DomainResult};
pub use render::MAX_RENDER_DEPTH;
pub use traversal::Descendants;
