use serde::Serialize;

/// Something that went wrong, or stopped early, during a run without aborting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    SearchFailed { page: u32, status: u16 },
    SearchUnavailable { page: u32, reason: String },
    NoMorePeople { page: u32 },
    IncompleteRecords { page: u32, count: usize },
    EnrichmentFailed { batch: usize, status: u16 },
    EnrichmentUnavailable { batch: usize, reason: String },
}

impl Warning {
    /// Early stop on an empty page is expected, everything else is a failure.
    pub fn is_error(&self) -> bool {
        !matches!(
            self,
            Warning::NoMorePeople { .. } | Warning::IncompleteRecords { .. }
        )
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::SearchFailed { page, status } => {
                write!(f, "API error on page {}: {}", page, status)
            }
            Warning::SearchUnavailable { page, reason } => {
                write!(f, "Search request for page {} failed: {}", page, reason)
            }
            Warning::NoMorePeople { page } => {
                write!(f, "No more people found on page {}. Stopping early.", page)
            }
            Warning::IncompleteRecords { page, count } => write!(
                f,
                "Skipped {} incomplete people on page {}",
                count, page
            ),
            Warning::EnrichmentFailed { batch, status } => write!(
                f,
                "Enrichment failed for batch {} ({}). Please check API limits.",
                batch, status
            ),
            Warning::EnrichmentUnavailable { batch, reason } => write!(
                f,
                "Enrichment request for batch {} failed: {}",
                batch, reason
            ),
        }
    }
}
