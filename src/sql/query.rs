use std::collections::BTreeMap;

pub trait ToMap {
    fn to_map(&self) -> BTreeMap<String, String>;
}

// Wraps an identifier in double quotes, doubling any embedded quote
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

// Wraps a string literal in single quotes, doubling any embedded quote
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub struct SampleDocumentParams {
    pub table: String,
}

impl ToMap for SampleDocumentParams {
    fn to_map(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("table".to_string(), quote_identifier(&self.table));

        params
    }
}

pub struct FindDocumentsParams {
    pub table: String,
    pub fields: Vec<String>,
}

impl ToMap for FindDocumentsParams {
    fn to_map(&self) -> BTreeMap<String, String> {
        let fields = self
            .fields
            .iter()
            .map(|field| quote_literal(field))
            .collect::<Vec<_>>()
            .join(", ");

        let mut params = BTreeMap::new();
        params.insert("table".to_string(), quote_identifier(&self.table));
        params.insert("fields".to_string(), format!("ARRAY[{}]::text[]", fields));

        params
    }
}

pub struct NoParams;

impl ToMap for NoParams {
    fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}

pub enum Queries {
    ListCollections,
    SampleDocument,
    FindDocuments,
}

impl Queries {
    pub fn get_query(&self) -> SqlQuery {
        match self {
            Queries::ListCollections => SqlQuery::new("SELECT table_name::text AS name FROM information_schema.tables WHERE table_schema = current_schema() AND table_type IN ('BASE TABLE', 'VIEW') ORDER BY table_name;"),
            Queries::SampleDocument => SqlQuery::new("SELECT to_jsonb(t) AS document FROM $table t LIMIT 1;"),
            // filter clauses are appended by the caller with bound values
            Queries::FindDocuments => SqlQuery::new("SELECT (
                SELECT jsonb_object_agg(field.key, field.value)
                FROM jsonb_each(to_jsonb(t)) AS field
                WHERE field.key = ANY($fields)
            ) AS document
            FROM $table t"),
        }
    }
}

pub struct SqlQuery {
    sql: String,
}

impl SqlQuery {
    fn new(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
        }
    }

    pub fn format<T>(&self, params: &T) -> String
    where
        T: ToMap,
    {
        let mut formatted_sql = self.sql.clone();
        let params = params.to_map();

        for (key, value) in params {
            formatted_sql = formatted_sql.replace(&format!("${}", key), &value);
        }

        formatted_sql
    }
}
