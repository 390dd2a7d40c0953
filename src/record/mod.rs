//! Dynamic attribute overlay for host records.
//!
//! Every read, write and removal of a named attribute follows one dispatch
//! rule: a name present in the dynamic map is served by the map, anything
//! else is delegated to the host's native accessor.

mod attribute_map;
mod state;

use crate::config::OverlayConfig;
use crate::core::{Document, RecordError, Result, TypeTag, Value};
use crate::host::HostRecord;
use crate::schema::{DeclaredAttributeSet, declared_attributes};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, debug_span, trace, warn};

pub use attribute_map::{DynamicAttributeMap, DynamicSlot};
pub use state::RecordState;

#[derive(Debug, Clone)]
pub struct DynamicRecord<H: HostRecord> {
    host: H,
    declared: Arc<DeclaredAttributeSet>,
    dynamic: DynamicAttributeMap,
    config: OverlayConfig,
    state: RecordState,
}

impl<H: HostRecord> DynamicRecord<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, OverlayConfig::default())
    }

    /// Runs the host `init` hook, then seeds the dynamic map from the
    /// declared attributes of `H`.
    pub fn with_config(mut host: H, config: OverlayConfig) -> Self {
        host.init();
        let declared = declared_attributes::<H>();

        let mut dynamic = DynamicAttributeMap::new();
        for attr in declared.iter() {
            let native = host.has_native(&attr.name);
            if native && !config.seed_declared {
                continue;
            }
            let value = if native {
                match host.get_native(&attr.name) {
                    Ok(value) => value,
                    Err(err) => {
                        warn!(
                            type_name = H::TYPE_NAME,
                            attribute = %attr.name,
                            error = %err,
                            "native read failed while seeding, using null"
                        );
                        Value::Null
                    }
                }
            } else {
                Value::Null
            };
            dynamic.insert(&attr.name, DynamicSlot::new(attr.tag.clone(), value));
        }

        Self {
            host,
            declared,
            dynamic,
            config,
            state: RecordState::Initialized,
        }
    }

    pub fn declared_attributes(&self) -> Arc<DeclaredAttributeSet> {
        Arc::clone(&self.declared)
    }

    /// Whether `name` is a dynamic attribute or, unless `dynamic_only`, a native one.
    pub fn has_attribute(&self, name: &str, dynamic_only: bool) -> bool {
        if self.dynamic.contains(name) {
            return true;
        }
        !dynamic_only && self.host.has_native(name)
    }

    /// Registers `name` as a dynamic attribute holding `default`.
    ///
    /// Names already known to the record, dynamically or natively, are left
    /// as they are.
    pub fn add_attribute(&mut self, name: &str, default: impl Into<Value>) -> Result<()> {
        if self.has_attribute(name, false) {
            return Ok(());
        }

        let tag = self.declared.tag(name).cloned().unwrap_or_default();
        debug!(type_name = H::TYPE_NAME, attribute = name, tag = %tag, "registered dynamic attribute");
        self.dynamic.insert(name, DynamicSlot::new(tag, Value::Null));
        self.set(name, default)
    }

    pub fn add_attributes<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_attribute(name.as_ref(), Value::Null)?;
        }
        Ok(())
    }

    /// Names the record exposes, in order.
    pub fn attributes(&self) -> Vec<String> {
        if self.config.seed_declared {
            return self.dynamic.names().map(str::to_string).collect();
        }

        let mut names: Vec<String> = self.declared.names().map(str::to_string).collect();
        names.extend(
            self.dynamic
                .names()
                .filter(|name| !self.declared.contains(name))
                .map(str::to_string),
        );
        names
    }

    /// Writes `value`, registering `name` as dynamic first if it is unknown.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        if !self.has_attribute(name, false) {
            self.add_attribute(name, Value::Null)?;
        }
        self.set(name, value)
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        if let Some(value) = self.dynamic.value(name) {
            trace!(attribute = name, "dynamic read");
            return Ok(value.clone());
        }
        trace!(attribute = name, "native read");
        self.host.get_native(name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        if self.dynamic.contains(name) {
            trace!(attribute = name, "dynamic write");
            self.dynamic.set_value(name, value);
            return Ok(());
        }
        trace!(attribute = name, "native write");
        self.host.set_native(name, value)
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        if self.dynamic.remove(name).is_some() {
            trace!(attribute = name, "dynamic unset");
            return Ok(());
        }
        trace!(attribute = name, "native unset");
        self.host.unset_native(name)
    }

    /// Tag of the dynamic slot, else the declared tag, else `mixed`.
    pub fn attribute_tag(&self, name: &str) -> TypeTag {
        self.dynamic
            .get(name)
            .map(|slot| &slot.tag)
            .or_else(|| self.declared.tag(name))
            .cloned()
            .unwrap_or_default()
    }

    pub fn dynamic_attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.dynamic.iter().map(|(name, slot)| (name, &slot.value))
    }

    /// Hydrates the record from a raw row.
    ///
    /// Row fields the record doesn't know yet are registered as dynamic
    /// attributes, then the host's standard hydration assigns the values.
    /// `None` and an empty row skip registration but still run the host step.
    pub fn populate_record(&mut self, row: Option<&Document>) -> Result<()> {
        let empty = Document::new();
        let row = row.unwrap_or(&empty);

        let span = debug_span!("populate_record", type_name = H::TYPE_NAME, fields = row.len());
        let _guard = span.enter();
        self.state = RecordState::Hydrating;

        if !row.is_empty() {
            let known: HashSet<String> = self.attributes().into_iter().collect();
            let unknown: Vec<&str> = row
                .keys()
                .map(String::as_str)
                .filter(|name| !known.contains(*name))
                .collect();
            if !unknown.is_empty() {
                debug!(count = unknown.len(), "row carries undeclared fields");
            }
            self.add_attributes(unknown)?;
        }

        H::populate(self, row)?;
        self.state = RecordState::Live;
        Ok(())
    }

    /// Hydrates from a JSON object. `null` counts as an absent row.
    pub fn populate_from_json(&mut self, json: &serde_json::Value) -> Result<()> {
        match json {
            serde_json::Value::Null => self.populate_record(None),
            serde_json::Value::Object(fields) => {
                let row: Document = fields
                    .iter()
                    .map(|(name, value)| (name.clone(), Value::from(value.clone())))
                    .collect();
                self.populate_record(Some(&row))
            }
            other => Err(RecordError::InvalidDocument(format!(
                "expected an object, got {}",
                Value::from(other.clone()).type_name()
            ))),
        }
    }

    /// Reads every exposed attribute into a document.
    pub fn to_document(&self) -> Result<Document> {
        self.attributes()
            .into_iter()
            .map(|name| {
                let value = self.get(&name)?;
                Ok((name, value))
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(Value::Document(self.to_document()?).to_json())
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Direct access to native members, bypassing the dispatch rule.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Releases the host record, first writing back dynamic values whose
    /// names are also native members.
    ///
    /// When a write-back fails, the members already written are restored and
    /// the record is handed back unchanged together with the error.
    pub fn into_host(mut self) -> std::result::Result<H, (RecordError, Self)> {
        let shadowed: Vec<(String, Value)> = self
            .dynamic
            .iter()
            .filter(|(name, _)| self.host.has_native(name))
            .map(|(name, slot)| (name.to_string(), slot.value.clone()))
            .collect();

        let mut previous: Vec<(String, Value)> = Vec::with_capacity(shadowed.len());
        for (name, value) in shadowed {
            let written = self
                .host
                .get_native(&name)
                .and_then(|old| self.host.set_native(&name, value).map(|()| old));
            match written {
                Ok(old) => previous.push((name, old)),
                Err(err) => {
                    for (name, old) in previous.into_iter().rev() {
                        if let Err(restore) = self.host.set_native(&name, old) {
                            warn!(attribute = %name, error = %restore, "failed to restore native member");
                        }
                    }
                    return Err((err, self));
                }
            }
        }

        Ok(self.host)
    }
}
