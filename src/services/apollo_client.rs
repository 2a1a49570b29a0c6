use std::time::Duration;

use reqwest::{header::CACHE_CONTROL, Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::{
    configuration::ApolloSettings,
    domain::lead::{EnrichedLead, LeadSeed},
};

const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, thiserror::Error)]
pub enum ApolloError {
    #[error("Apollo responded with status {0}")]
    Status(StatusCode),
    #[error("Request to Apollo failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid Apollo url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Connection to the Apollo people api plus the knobs of a fetch/enrich run.
pub struct ApolloClient {
    client: Client,
    api_key: String,
    search_url: Url,
    bulk_match_url: Url,
    page_delay: Duration,
    batch_size: usize,
    report_dropped_records: bool,
}

#[derive(Serialize)]
pub struct SearchPeopleRequest<'a> {
    pub q_organization_name: &'a str,
    pub person_titles: &'a [String],
    pub page: u32,
}

#[derive(Deserialize)]
pub struct SearchPeopleResponse {
    pub people: Option<Vec<Person>>,
}

#[derive(Deserialize)]
pub struct Person {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization: Option<Organization>,
}

#[derive(Deserialize, Default)]
pub struct Organization {
    pub name: Option<String>,
    pub website_url: Option<String>,
    pub phone: Option<String>,
}

impl Person {
    pub fn into_seed(self) -> Option<LeadSeed> {
        let organization = self.organization.unwrap_or_default();
        LeadSeed::from_parts(
            self.first_name,
            self.last_name,
            organization.name,
            organization.website_url,
        )
    }
}

#[derive(Serialize)]
pub struct BulkMatchRequest<'a> {
    pub details: &'a [LeadSeed],
    pub reveal_personal_emails: bool,
    pub reveal_phone_number: bool,
}

impl<'a> BulkMatchRequest<'a> {
    /// Personal emails and phone numbers are never requested.
    pub fn new(details: &'a [LeadSeed]) -> Self {
        BulkMatchRequest {
            details,
            reveal_personal_emails: false,
            reveal_phone_number: false,
        }
    }
}

#[derive(Deserialize)]
pub struct BulkMatchResponse {
    pub matches: Option<Vec<Option<MatchedPerson>>>,
}

#[derive(Deserialize)]
pub struct MatchedPerson {
    pub name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "Location")]
    pub capitalized_location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub organization: Option<Organization>,
    pub linkedin_url: Option<String>,
    pub email: Option<String>,
}

impl From<MatchedPerson> for EnrichedLead {
    fn from(person: MatchedPerson) -> Self {
        let organization = person.organization.unwrap_or_default();
        EnrichedLead {
            name: person.name,
            title: person.title,
            location: person.location.or(person.capitalized_location),
            city: person.city,
            state: person.state,
            organization_name: organization.name,
            linkedin_url: person.linkedin_url,
            phone: organization.phone,
            email: person.email,
        }
    }
}

impl ApolloClient {
    pub fn new(settings: &ApolloSettings) -> Result<Self, ApolloError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;

        Ok(ApolloClient {
            client,
            api_key: settings.api_key.clone(),
            search_url: settings.search_url()?,
            bulk_match_url: settings.bulk_match_url()?,
            page_delay: settings.page_delay(),
            batch_size: settings.batch_size,
            report_dropped_records: settings.report_dropped_records,
        })
    }

    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn report_dropped_records(&self) -> bool {
        self.report_dropped_records
    }

    pub async fn search_people(
        &self,
        body: &SearchPeopleRequest<'_>,
    ) -> Result<SearchPeopleResponse, ApolloError> {
        self.post(&self.search_url, body).await
    }

    pub async fn bulk_match(
        &self,
        body: &BulkMatchRequest<'_>,
    ) -> Result<BulkMatchResponse, ApolloError> {
        self.post(&self.bulk_match_url, body).await
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &Url,
        body: &B,
    ) -> Result<R, ApolloError> {
        let response = self
            .client
            .post(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApolloError::Status(status));
        }

        Ok(response.json::<R>().await?)
    }
}
