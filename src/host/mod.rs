//! Seam to the host persistence framework.
//!
//! The host owns the native members of a record type, its lifecycle hooks
//! and the standard "populate from raw row" step. `DynamicRecord` layers the
//! dynamic attribute map on top and falls back to these operations for
//! names it doesn't own.

mod hydrate;

use crate::core::{Document, Result, Value};
use crate::record::DynamicRecord;
use crate::schema::{DEFAULT_ID_ATTRIBUTE, Discovery};

pub use hydrate::{assign_row, coerce};

/// Native attribute surface of a record type.
///
/// Usually generated by [`dynamic_record!`](crate::dynamic_record).
pub trait HostRecord: Sized + 'static {
    /// Type name used in logs and error messages.
    const TYPE_NAME: &'static str;

    /// Where the statically declared attributes of this type come from.
    fn discovery() -> Discovery;

    fn id_attribute() -> &'static str {
        DEFAULT_ID_ATTRIBUTE
    }

    /// Invoked once after construction, before the dynamic map is seeded.
    fn init(&mut self) {}

    fn has_native(&self, name: &str) -> bool;

    /// Fails with [`RecordError::UndefinedAttribute`](crate::RecordError::UndefinedAttribute)
    /// when `name` isn't a native member.
    fn get_native(&self, name: &str) -> Result<Value>;

    fn set_native(&mut self, name: &str, value: Value) -> Result<()>;

    /// Resets a native member to its default value.
    fn unset_native(&mut self, name: &str) -> Result<()>;

    /// Standard hydration. Runs after unknown fields were registered on `record`.
    fn populate(record: &mut DynamicRecord<Self>, row: &Document) -> Result<()> {
        assign_row(record, row)
    }
}
