use serde::{Deserialize, Serialize};

/// Display metadata for the assessment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssessmentSummary {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub description: String,
    /// Free text, e.g. "2-3 minutes".
    pub duration: String,
    /// Card image URL.
    pub image: String,
}
