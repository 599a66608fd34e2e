//! Vampire lineage trees stored in an arena.
//!
//! A [`Coven`] owns every vampire; creators and offspring refer to each other
//! through [`VampireId`] handles. On top of that structure the coven answers
//! generation depth, seniority and closest-common-ancestor queries.

pub mod config;
pub mod domain;
pub mod errors;
pub mod util;

pub use config::Settings;
pub use domain::{AttachPolicy, Coven, DomainError, DomainResult, Vampire, VampireId};
pub use errors::{CovenError, CovenResult};
