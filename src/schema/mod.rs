//! Declared-attribute discovery.
//!
//! - `declared.rs` - `DeclaredAttributeSet` and the two discovery modes
//! - `annotation.rs` - `@property` tag parsing for annotation-block mode
//! - `registry.rs` - process-wide, per-type memoization

mod annotation;
mod declared;
mod registry;

pub use annotation::{PropertyAccess, PropertyTag, parse_property_tags};
pub use declared::{DEFAULT_ID_ATTRIBUTE, DeclaredAttribute, DeclaredAttributeSet, Discovery};
pub use registry::{declared_attributes, is_cached};
