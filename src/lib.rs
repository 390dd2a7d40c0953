// ============================================================================
// dynrecord: dynamic attribute overlay for document records
// ============================================================================

pub mod config;
pub mod core;
pub mod host;
mod macros;
pub mod prelude;
pub mod record;
pub mod schema;

pub use config::OverlayConfig;
pub use core::{AttributeValue, Document, RecordError, Result, TypeTag, Value};
pub use host::HostRecord;
pub use record::{DynamicAttributeMap, DynamicRecord, DynamicSlot, RecordState};
pub use schema::{DeclaredAttribute, DeclaredAttributeSet, Discovery, declared_attributes};
