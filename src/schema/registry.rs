use crate::host::HostRecord;
use crate::schema::DeclaredAttributeSet;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

lazy_static::lazy_static! {
    static ref DECLARED_ATTRIBUTES: RwLock<HashMap<TypeId, Arc<DeclaredAttributeSet>>> =
        RwLock::new(HashMap::new());
}

/// Returns the declared attributes of `T`, discovering them on first use.
///
/// Results are cached per concrete type for the lifetime of the process.
/// Concurrent first calls may each run discovery; the first insert wins and
/// every caller observes the same set.
pub fn declared_attributes<T: HostRecord>() -> Arc<DeclaredAttributeSet> {
    let key = TypeId::of::<T>();

    // The cache only ever holds complete sets, so a poisoned lock is still usable.
    if let Some(set) = DECLARED_ATTRIBUTES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return Arc::clone(set);
    }

    let discovered = Arc::new(T::discovery().discover(T::TYPE_NAME, T::id_attribute()));

    let mut cache = DECLARED_ATTRIBUTES
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let set = cache.entry(key).or_insert_with(|| {
        debug!(
            type_name = T::TYPE_NAME,
            attributes = discovered.len(),
            "cached declared attributes"
        );
        discovered
    });
    Arc::clone(set)
}

/// Whether discovery has already run for `T`.
pub fn is_cached<T: HostRecord>() -> bool {
    DECLARED_ATTRIBUTES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&TypeId::of::<T>())
}
