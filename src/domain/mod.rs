//! Domain layer: outline classification, tree construction and tree edits
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Both the classifier and the builder are total: they accept any line and any
//! entry sequence without failing. Edits addressed by [`NodePath`] can fail with
//! a [`DomainError`].

pub mod builder;
pub mod classifier;
pub mod entities;
pub mod error;
pub mod path;

pub use builder::HierarchyBuilder;
pub use classifier::LineClassifier;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use path::NodePath;
