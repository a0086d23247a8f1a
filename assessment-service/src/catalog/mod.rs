//! The read-only assessment catalog.
//!
//! Content ships inside the binary as a JSON document and is parsed and
//! validated exactly once at startup. After that the catalog is immutable and
//! shared by every request handler without locking.

mod error;
mod validate;

pub use error::CatalogError;

use crate::models::{AssessmentDetail, AssessmentSummary};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Which instruments the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogEdition {
    /// Summable instruments only.
    Base,
    /// Summable instruments plus the personality-typing instrument.
    #[default]
    Extended,
}

impl CatalogEdition {
    fn includes(self, detail: &AssessmentDetail) -> bool {
        match self {
            CatalogEdition::Base => !detail.is_typed(),
            CatalogEdition::Extended => true,
        }
    }
}

impl FromStr for CatalogEdition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(CatalogEdition::Base),
            "extended" => Ok(CatalogEdition::Extended),
            _ => Err(format!(
                "Invalid catalog edition: {}. Must be one of: base, extended",
                s
            )),
        }
    }
}

impl fmt::Display for CatalogEdition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogEdition::Base => f.write_str("base"),
            CatalogEdition::Extended => f.write_str("extended"),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    summaries: Vec<AssessmentSummary>,
    details: BTreeMap<String, AssessmentDetail>,
}

#[derive(Debug)]
pub struct Catalog {
    edition: CatalogEdition,
    summaries: Vec<AssessmentSummary>,
    details: HashMap<String, AssessmentDetail>,
}

impl Catalog {
    /// Load the content compiled into the binary.
    pub fn embedded(edition: CatalogEdition) -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG, edition)
    }

    /// Parse and validate a catalog document, keeping the instruments that
    /// belong to `edition`.
    pub fn from_json(json: &str, edition: CatalogEdition) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document, edition)
    }

    fn from_document(
        document: CatalogDocument,
        edition: CatalogEdition,
    ) -> Result<Self, CatalogError> {
        for (key, detail) in &document.details {
            validate::validate_detail(key, detail)?;
        }

        let mut listed = HashSet::new();
        for summary in &document.summaries {
            if !listed.insert(summary.id.as_str()) {
                return Err(CatalogError::DuplicateId(summary.id.clone()));
            }
            if !document.details.contains_key(&summary.id) {
                return Err(CatalogError::MissingDetail(summary.id.clone()));
            }
        }
        for key in document.details.keys() {
            if !listed.contains(key.as_str()) {
                tracing::warn!(assessment_id = %key, "Detail record is not listed in summaries");
            }
        }

        let details: HashMap<String, AssessmentDetail> = document
            .details
            .into_iter()
            .filter(|(_, detail)| edition.includes(detail))
            .collect();
        let summaries: Vec<AssessmentSummary> = document
            .summaries
            .into_iter()
            .filter(|summary| details.contains_key(&summary.id))
            .collect();

        Ok(Self {
            edition,
            summaries,
            details,
        })
    }

    pub fn edition(&self) -> CatalogEdition {
        self.edition
    }

    /// Summaries in declaration order.
    pub fn list_summaries(&self) -> &[AssessmentSummary] {
        &self.summaries
    }

    pub fn get_detail(&self, id: &str) -> Result<&AssessmentDetail, CatalogError> {
        self.details
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Number of listed assessments.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}
