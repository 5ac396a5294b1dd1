use serde_json::{Map, Value};

/// A single record as returned by the store, keyed by field name
pub type Document = Map<String, Value>;

pub fn into_document(value: Value) -> Option<Document> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Exact string match on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    clauses: Vec<FieldMatch>,
}

impl DocumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match(mut self, field: &str, value: &str) -> Self {
        self.clauses.push(FieldMatch {
            field: field.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn clauses(&self) -> &[FieldMatch] {
        &self.clauses
    }

    // All clauses must hold. A field holding a non-string value never matches.
    pub fn matches(&self, document: &Document) -> bool {
        self.clauses.iter().all(|clause| {
            matches!(document.get(&clause.field), Some(Value::String(value)) if *value == clause.value)
        })
    }
}

/// Fields to keep from each fetched document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<String>,
}

impl Projection {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut projected: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !projected.contains(&field) {
                projected.push(field);
            }
        }
        Self { fields: projected }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn apply(&self, document: &Document) -> Document {
        document
            .iter()
            .filter(|(key, _)| self.fields.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
