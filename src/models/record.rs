use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

const ID_FIELD: &str = "id";

/// Ordered mapping of lowercased column names to field values.
pub type FieldMap = serde_json::Map<String, Value>;

/// A single transaction row, either read from the input CSV or returned
/// by the enhancement service.
///
/// Columns are kept as an ordered name/value map rather than a fixed struct
/// because the service accepts arbitrary input columns and responds with its
/// own result schema. Insertion order is preserved so the output files keep
/// the column order of their source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TransactionRecord {
    fields: FieldMap
}

impl TransactionRecord {
    pub fn from_fields(fields: FieldMap) -> Self {
        Self { fields }
    }

    /// Assigns a random UUID when the `id` field is absent, null or empty.
    ///
    /// An existing key keeps its column position; a missing key is appended.
    pub fn ensure_id(&mut self) {
        let blank = match self.fields.get(ID_FIELD) {
            Some(Value::String(id)) => id.is_empty(),
            Some(Value::Null) | None => true,
            Some(_) => false
        };

        if blank {
            self.fields.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field(ID_FIELD)
    }

    /// Returns the named field only when it holds a string value.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Value::String(value)) => Some(value),
            _ => None
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
