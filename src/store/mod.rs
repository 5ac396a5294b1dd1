pub mod memory;

use crate::sql::postgres::PostgresClient;
use crate::sql::schema::{Document, DocumentFilter, Projection};
use anyhow::Result;
use memory::MemoryStore;

/// Read-only view over whichever backend holds the appointment records
pub enum AppointmentStore {
    Postgres(PostgresClient),
    Memory(MemoryStore),
}

impl AppointmentStore {
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        match self {
            Self::Postgres(client) => client.list_collections().await,
            Self::Memory(store) => store.list_collections(),
        }
    }

    pub async fn sample_document(&self, collection: &str) -> Result<Option<Document>> {
        match self {
            Self::Postgres(client) => client.sample_document(collection).await,
            Self::Memory(store) => store.sample_document(collection),
        }
    }

    pub async fn find_documents(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        projection: &Projection,
    ) -> Result<Vec<Document>> {
        match self {
            Self::Postgres(client) => client.find_documents(collection, filter, projection).await,
            Self::Memory(store) => store.find_documents(collection, filter, projection),
        }
    }
}
