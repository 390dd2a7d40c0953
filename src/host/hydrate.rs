use crate::core::{Document, RecordError, Result, TypeTag, Value};
use crate::host::HostRecord;
use crate::record::DynamicRecord;
use std::collections::HashSet;

/// Assigns every field of `row` that the record exposes through the
/// uniform setter, coercing to the attribute's tag when configured to.
///
/// Remaining fields that name a native member are assigned to it as they
/// are. Anything else is left alone.
pub fn assign_row<H: HostRecord>(record: &mut DynamicRecord<H>, row: &Document) -> Result<()> {
    let coerce_values = record.config().coerce_on_hydrate;
    let attributes: HashSet<String> = record.attributes().into_iter().collect();

    for (name, raw) in row {
        if attributes.contains(name) {
            let value = if coerce_values {
                coerce(name, &record.attribute_tag(name), raw.clone())?
            } else {
                raw.clone()
            };
            record.set(name, value)?;
        } else if record.host().has_native(name) {
            record.set(name, raw.clone())?;
        }
    }

    Ok(())
}

/// Converts a raw value to the shape `tag` describes.
pub fn coerce(name: &str, tag: &TypeTag, value: Value) -> Result<Value> {
    let coerced = match (tag, value) {
        (_, Value::Null) => Some(Value::Null),
        (TypeTag::Mixed | TypeTag::Other(_), value) => Some(value),

        (TypeTag::Identifier, Value::Document(fields)) => {
            // Extended JSON object id: {"$oid": "..."}
            let oid = match fields.get("$oid") {
                Some(Value::Text(oid)) if fields.len() == 1 => Some(oid.clone()),
                _ => None,
            };
            match oid {
                Some(oid) => Some(Value::Text(oid)),
                None => return Err(mismatch(name, tag, &Value::Document(fields))),
            }
        }
        (TypeTag::Identifier, value @ (Value::Text(_) | Value::Integer(_))) => Some(value),

        (TypeTag::String, Value::Text(s)) => Some(Value::Text(s)),
        (TypeTag::String, value @ (Value::Integer(_) | Value::Float(_) | Value::Boolean(_))) => {
            Some(Value::Text(value.to_string()))
        }

        (TypeTag::Integer, Value::Integer(i)) => Some(Value::Integer(i)),
        (TypeTag::Integer, value @ Value::Float(_)) => value.as_i64().map(Value::Integer),
        (TypeTag::Integer, Value::Text(s)) => s.trim().parse::<i64>().ok().map(Value::Integer),
        (TypeTag::Integer, Value::Boolean(b)) => Some(Value::Integer(i64::from(b))),

        (TypeTag::Float, Value::Float(f)) => Some(Value::Float(f)),
        (TypeTag::Float, Value::Integer(i)) => Some(Value::Float(i as f64)),
        (TypeTag::Float, Value::Text(s)) => s.trim().parse::<f64>().ok().map(Value::Float),

        (TypeTag::Boolean, Value::Boolean(b)) => Some(Value::Boolean(b)),
        (TypeTag::Boolean, Value::Integer(0)) => Some(Value::Boolean(false)),
        (TypeTag::Boolean, Value::Integer(1)) => Some(Value::Boolean(true)),
        (TypeTag::Boolean, Value::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(Value::Boolean(true)),
            "false" | "0" | "" => Some(Value::Boolean(false)),
            _ => return Err(mismatch(name, tag, &Value::Text(s))),
        },

        (TypeTag::Array, Value::Array(items)) => Some(Value::Array(items)),
        (TypeTag::Document, Value::Document(fields)) => Some(Value::Document(fields)),

        (_, value) => return Err(mismatch(name, tag, &value)),
    };

    coerced.ok_or_else(|| {
        RecordError::TypeMismatch(format!(
            "attribute '{}' cannot be read as {}",
            name, tag
        ))
    })
}

fn mismatch(name: &str, tag: &TypeTag, value: &Value) -> RecordError {
    RecordError::TypeMismatch(format!(
        "attribute '{}' is declared {} but the row holds {}",
        name,
        tag,
        value.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_scalars_to_declared_tags() {
        assert_eq!(
            coerce("n", &TypeTag::Integer, Value::Text(" 42 ".into())).unwrap(),
            Value::Integer(42)
        );
        assert_eq!(
            coerce("s", &TypeTag::String, Value::Integer(7)).unwrap(),
            Value::Text("7".into())
        );
        assert_eq!(
            coerce("f", &TypeTag::Float, Value::Integer(2)).unwrap(),
            Value::Float(2.0)
        );
        assert_eq!(
            coerce("b", &TypeTag::Boolean, Value::Text("TRUE".into())).unwrap(),
            Value::Boolean(true)
        );
    }

    #[test]
    fn unwraps_extended_json_object_ids() {
        let mut oid = Document::new();
        oid.insert("$oid".to_string(), Value::from("64b7f0c2a1"));
        assert_eq!(
            coerce("_id", &TypeTag::Identifier, Value::Document(oid)).unwrap(),
            Value::Text("64b7f0c2a1".into())
        );
    }

    #[test]
    fn mixed_and_null_pass_through() {
        let nested = Value::from(vec![1i64, 2]);
        assert_eq!(coerce("x", &TypeTag::Mixed, nested.clone()).unwrap(), nested);
        assert!(coerce("x", &TypeTag::Integer, Value::Null).unwrap().is_null());
    }

    #[test]
    fn rejects_incompatible_values() {
        assert!(matches!(
            coerce("n", &TypeTag::Integer, Value::Text("abc".into())),
            Err(RecordError::TypeMismatch(_))
        ));
        assert!(matches!(
            coerce("d", &TypeTag::Document, Value::Integer(1)),
            Err(RecordError::TypeMismatch(_))
        ));
        assert!(coerce("f", &TypeTag::Integer, Value::Float(1.5)).is_err());
    }
}
