use dynrecord::host::{HostRecord, assign_row};
use dynrecord::schema::{Discovery, declared_attributes, is_cached};
use dynrecord::{Document, DynamicRecord, RecordError, Result, TypeTag, Value, dynamic_record};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

dynamic_record! {
    pub struct Ledger {
        total: i64,
    }
}

dynamic_record! {
    pub struct Inventory {
        sku: String,
        quantity: i64,
    }
}

dynamic_record! {
    /// @property string $name
    pub struct Profile annotations {}
}

/// Hand-written host keeping native members in a map.
#[derive(Debug, Default)]
struct LegacyRow {
    fields: BTreeMap<String, Value>,
    init_calls: usize,
    populate_calls: usize,
}

impl HostRecord for LegacyRow {
    const TYPE_NAME: &'static str = "LegacyRow";

    fn discovery() -> Discovery {
        Discovery::Annotations("@property string $label\n@property int $uuid")
    }

    fn id_attribute() -> &'static str {
        "uuid"
    }

    fn init(&mut self) {
        self.init_calls += 1;
        self.fields.insert("created_by".to_string(), Value::from("system"));
    }

    fn has_native(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn get_native(&self, name: &str) -> Result<Value> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| RecordError::undefined(Self::TYPE_NAME, name))
    }

    fn set_native(&mut self, name: &str, value: Value) -> Result<()> {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(RecordError::undefined(Self::TYPE_NAME, name)),
        }
    }

    fn unset_native(&mut self, name: &str) -> Result<()> {
        self.fields
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RecordError::undefined(Self::TYPE_NAME, name))
    }

    fn populate(record: &mut DynamicRecord<Self>, row: &Document) -> Result<()> {
        record.host_mut().populate_calls += 1;
        assign_row(record, row)
    }
}

/// Claims a native member it cannot read.
#[derive(Debug, Default)]
struct FlakyHost;

impl HostRecord for FlakyHost {
    const TYPE_NAME: &'static str = "FlakyHost";

    fn discovery() -> Discovery {
        Discovery::Members(&["balance"])
    }

    fn has_native(&self, name: &str) -> bool {
        name == "balance"
    }

    fn get_native(&self, name: &str) -> Result<Value> {
        Err(RecordError::TypeMismatch(format!("{name} is not readable")))
    }

    fn set_native(&mut self, name: &str, _value: Value) -> Result<()> {
        Err(RecordError::undefined(Self::TYPE_NAME, name))
    }

    fn unset_native(&mut self, name: &str) -> Result<()> {
        Err(RecordError::undefined(Self::TYPE_NAME, name))
    }
}

#[test]
fn unreadable_native_member_seeds_null() {
    let record = DynamicRecord::new(FlakyHost);

    assert_eq!(record.attributes(), vec!["_id", "balance"]);
    assert!(record.has_attribute("balance", true));
    assert!(record.get("balance").unwrap().is_null());
}

#[test]
fn discovery_is_cached_and_stable() {
    assert!(!is_cached::<Ledger>());

    let first = declared_attributes::<Ledger>();
    assert!(is_cached::<Ledger>());
    let second = declared_attributes::<Ledger>();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
    assert!(first.contains("_id"));
    assert_eq!(first.names().collect::<Vec<_>>(), vec!["_id", "total"]);
}

#[test]
fn cache_is_keyed_by_concrete_type() {
    let inventory = declared_attributes::<Inventory>();
    let profile = declared_attributes::<Profile>();

    assert_eq!(inventory.type_name(), "Inventory");
    assert_eq!(profile.type_name(), "Profile");
    assert_eq!(profile.tag("name"), Some(&TypeTag::String));
    assert_eq!(profile.tag("_id"), Some(&TypeTag::Identifier));
    assert!(!inventory.contains("name"));
}

#[test]
fn concurrent_first_access_yields_one_set() {
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(declared_attributes::<Inventory>))
        .collect();

    let sets: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let cached = declared_attributes::<Inventory>();
    for set in &sets {
        assert!(Arc::ptr_eq(set, &cached));
    }
    assert_eq!(cached.names().collect::<Vec<_>>(), vec!["_id", "sku", "quantity"]);
}

#[test]
fn custom_host_identifier_and_init_hook() {
    let record = DynamicRecord::new(LegacyRow::default());

    assert_eq!(record.host().init_calls, 1);
    let declared = record.declared_attributes();
    assert_eq!(declared.id_attribute(), "uuid");
    assert_eq!(declared.tag("uuid"), Some(&TypeTag::Integer));
    assert!(!declared.contains("_id"));

    assert_eq!(record.attributes(), vec!["label", "uuid"]);
    assert!(record.has_attribute("created_by", false));
    assert_eq!(record.get("created_by").unwrap(), Value::from("system"));
}

#[test]
fn custom_host_populate_runs_even_for_empty_rows() {
    let mut record = DynamicRecord::new(LegacyRow::default());

    record.populate_record(None).unwrap();
    assert_eq!(record.host().populate_calls, 1);

    record
        .populate_from_json(&serde_json::json!({"uuid": "17", "label": "x", "note": "n"}))
        .unwrap();
    assert_eq!(record.host().populate_calls, 2);
    assert_eq!(record.get("uuid").unwrap(), Value::Integer(17));
    assert_eq!(record.get("note").unwrap(), Value::from("n"));
}
