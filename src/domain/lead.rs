use serde::{Deserialize, Serialize};

/// A search hit complete enough to be sent to the bulk match endpoint.
/// Serializes to the shape Apollo expects inside `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSeed {
    pub first_name: String,
    pub last_name: String,
    pub organization_name: String,
    pub domain: String,
}

impl LeadSeed {
    /// Returns `None` unless every field is present and non-empty.
    pub fn from_parts(
        first_name: Option<String>,
        last_name: Option<String>,
        organization_name: Option<String>,
        domain: Option<String>,
    ) -> Option<Self> {
        Some(LeadSeed {
            first_name: non_empty(first_name)?,
            last_name: non_empty(last_name)?,
            organization_name: non_empty(organization_name)?,
            domain: non_empty(domain)?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Contact record returned to the caller and exported as a csv row.
/// Field order is the csv column order and must stay in sync with [`EnrichedLead::FIELD_NAMES`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedLead {
    pub name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub organization_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl EnrichedLead {
    /// Csv header row, same names and order as the serialized struct fields.
    pub const FIELD_NAMES: [&'static str; 9] = [
        "name",
        "title",
        "location",
        "city",
        "state",
        "organization_name",
        "linkedin_url",
        "phone",
        "email",
    ];
}
