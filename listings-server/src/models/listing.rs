//! Listing documents
//!
//! A listing is an arbitrary JSON object plus the identifier the store
//! assigned to it. Only `id` and `name` mean anything to this crate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Caller-defined listing fields.
pub type Document = Map<String, Value>;

/// Field holding the listing identifier in serialized form.
pub const ID_FIELD: &str = "id";

/// Field used by the name filter.
pub const NAME_FIELD: &str = "name";

/// A persisted listing.
///
/// Serializes as a flat JSON object: the caller's fields with `id` added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Document,
}

impl Listing {
    pub fn new(id: Uuid, fields: Document) -> Self {
        Self { id, fields }
    }

    /// The `name` field, when present and a string.
    pub fn name(&self) -> Option<&str> {
        self.fields.get(NAME_FIELD).and_then(Value::as_str)
    }
}

/// Drop fields the caller may not set.
///
/// The identifier is assigned by the store and never changes, so an `id`
/// supplied in a request body is ignored.
pub fn strip_reserved(mut fields: Document) -> Document {
    fields.remove(ID_FIELD);
    fields
}

/// Shallow-merge `patch` into `target`.
///
/// Returns whether any field actually changed.
pub fn merge_fields(target: &mut Document, patch: &Document) -> bool {
    let mut changed = false;
    for (key, value) in patch {
        if target.get(key) != Some(value) {
            target.insert(key.clone(), value.clone());
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn serializes_flat_with_id() {
        let id = Uuid::new_v4();
        let listing = Listing::new(id, doc(json!({"name": "Lakeview Cabin", "beds": 2})));

        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["id"], json!(id.to_string()));
        assert_eq!(value["name"], json!("Lakeview Cabin"));
        assert_eq!(value["beds"], json!(2));
    }

    #[test]
    fn deserializes_back_into_fields() {
        let id = Uuid::new_v4();
        let listing: Listing =
            serde_json::from_value(json!({"id": id, "name": "Loft"})).unwrap();

        assert_eq!(listing.id, id);
        assert_eq!(listing.name(), Some("Loft"));
        assert!(!listing.fields.contains_key("id"));
    }

    #[test]
    fn strip_reserved_removes_id() {
        let fields = strip_reserved(doc(json!({"id": "mine", "name": "Loft"})));
        assert!(!fields.contains_key("id"));
        assert_eq!(fields["name"], json!("Loft"));
    }

    #[test]
    fn merge_reports_changes() {
        let mut target = doc(json!({"name": "Loft", "beds": 1}));

        assert!(!merge_fields(&mut target, &doc(json!({"name": "Loft"}))));
        assert!(!merge_fields(&mut target, &Document::new()));
        assert!(merge_fields(&mut target, &doc(json!({"beds": 3, "pool": true}))));

        assert_eq!(target, doc(json!({"name": "Loft", "beds": 3, "pool": true})));
    }

    #[test]
    fn name_ignores_non_strings() {
        let listing = Listing::new(Uuid::new_v4(), doc(json!({"name": 42})));
        assert_eq!(listing.name(), None);
    }
}
