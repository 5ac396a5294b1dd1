//! Schema sniffing for appointment collections.
//!
//! Deployments name the appointment collection and its fields differently, so
//! both are discovered at runtime from ordered lists of known names. The lists
//! are plain data and the first name present wins.

use crate::loader::EmptyReason;
use crate::sql::schema::{Document, DocumentFilter, Projection};

/// Known names for the appointment collection, in priority order
pub const COLLECTION_ALIASES: &[&str] = &["appointments", "Appointments", "appointment", "AppointmentModel"];

/// Substring looked for (case-insensitively) when no alias matches
pub const COLLECTION_KEYWORD: &str = "appointment";

/// Ordered candidate names for one logical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCandidates {
    pub role: &'static str,
    pub names: &'static [&'static str],
}

impl FieldCandidates {
    pub const fn new(role: &'static str, names: &'static [&'static str]) -> Self {
        Self { role, names }
    }

    /// First candidate present as a key of `document`
    pub fn resolve(&self, document: &Document) -> Option<&'static str> {
        self.names.iter().copied().find(|name| document.contains_key(*name))
    }
}

pub const BRANCH_FIELDS: FieldCandidates = FieldCandidates::new("branch", &["branch"]);

pub const DATE_FIELDS: FieldCandidates = FieldCandidates::new(
    "date",
    &[
        "appointmentDate",
        "date",
        "createdAt",
        "created_at",
        "updatedAt",
        "updated_at",
    ],
);

pub const PET_TYPE_FIELDS: FieldCandidates =
    FieldCandidates::new("pet type", &["petType", "pet_type", "type"]);

/// Picks the collection to read from what the store reports
///
/// Order: the configured name, then the known aliases, then any name
/// containing the keyword, then whatever is listed first.
pub fn resolve_collection(configured: &str, available: &[String]) -> Option<String> {
    if available.iter().any(|name| name == configured) {
        return Some(configured.to_string());
    }

    if let Some(alias) = COLLECTION_ALIASES
        .iter()
        .find(|alias| available.iter().any(|name| name == *alias))
    {
        return Some(alias.to_string());
    }

    available
        .iter()
        .find(|name| name.to_lowercase().contains(COLLECTION_KEYWORD))
        .or_else(|| available.first())
        .cloned()
}

/// Field names discovered from a sample document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFields {
    pub branch: &'static str,
    pub date: &'static str,
    pub pet_type: Option<&'static str>,
}

impl ResolvedFields {
    pub fn from_sample(sample: &Document) -> Result<Self, EmptyReason> {
        let branch = BRANCH_FIELDS.resolve(sample).ok_or(EmptyReason::MissingField {
            role: BRANCH_FIELDS.role,
        })?;
        let date = DATE_FIELDS.resolve(sample).ok_or(EmptyReason::MissingField {
            role: DATE_FIELDS.role,
        })?;

        Ok(Self {
            branch,
            date,
            pet_type: PET_TYPE_FIELDS.resolve(sample),
        })
    }

    // The pet type clause only applies when the collection has such a field
    pub fn filter(&self, branch: &str, pet_type: Option<&str>) -> DocumentFilter {
        let filter = DocumentFilter::new().with_match(self.branch, branch);

        match (self.pet_type, pet_type) {
            (Some(field), Some(value)) => filter.with_match(field, value),
            _ => filter,
        }
    }

    pub fn projection(&self) -> Projection {
        Projection::new(
            [Some(self.branch), Some(self.date), self.pet_type]
                .into_iter()
                .flatten(),
        )
    }
}
