//! Recommended API entrypoints grouped by abstraction level.
//!
//! `dx` covers application code working with records.
//! `advanced` is for implementing a host record by hand.

pub mod dx {
    //! Declaring record types and reading/writing their attributes.
    pub use crate::{Document, DynamicRecord, OverlayConfig, RecordError, Value, dynamic_record};
}

pub mod advanced {
    //! Host seam and discovery internals.
    pub use crate::core::AttributeValue;
    pub use crate::host::{HostRecord, assign_row, coerce};
    pub use crate::schema::{
        DEFAULT_ID_ATTRIBUTE, DeclaredAttributeSet, Discovery, declared_attributes, is_cached,
        parse_property_tags,
    };
}
