use crate::sql::schema::{Document, DocumentFilter, Projection};
use anyhow::{anyhow, Result};

/// In-process appointment store
///
/// Collections keep their insertion order, which is the order
/// `list_collections` reports them in.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Vec<(String, Vec<Document>)>,
    unavailable: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, name: &str, documents: Vec<Document>) -> Self {
        match self.collections.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing)) => existing.extend(documents),
            None => self.collections.push((name.to_string(), documents)),
        }
        self
    }

    /// A store whose every call fails with `reason`, as an offline server would
    pub fn unavailable(reason: &str) -> Self {
        Self {
            collections: Vec::new(),
            unavailable: Some(reason.to_string()),
        }
    }

    fn check_available(&self) -> Result<()> {
        match &self.unavailable {
            Some(reason) => Err(anyhow!("Store unavailable: {}", reason)),
            None => Ok(()),
        }
    }

    fn collection(&self, name: &str) -> Result<&[Document]> {
        self.collections
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, documents)| documents.as_slice())
            .ok_or_else(|| anyhow!("Collection {} does not exist", name))
    }

    pub fn list_collections(&self) -> Result<Vec<String>> {
        self.check_available()?;
        Ok(self.collections.iter().map(|(name, _)| name.clone()).collect())
    }

    pub fn sample_document(&self, collection: &str) -> Result<Option<Document>> {
        self.check_available()?;
        Ok(self.collection(collection)?.first().cloned())
    }

    pub fn find_documents(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        projection: &Projection,
    ) -> Result<Vec<Document>> {
        self.check_available()?;
        Ok(self
            .collection(collection)?
            .iter()
            .filter(|document| filter.matches(document))
            .map(|document| projection.apply(document))
            .collect())
    }
}
