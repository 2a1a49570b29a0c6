use tokio::time;

use crate::domain::{lead::LeadSeed, search_criteria::SearchCriteria, warning::Warning};

use super::{ApolloClient, ApolloError, SearchPeopleRequest};

#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub seeds: Vec<LeadSeed>,
    pub warnings: Vec<Warning>,
    /// People skipped because a required field was missing
    pub dropped: usize,
}

/// Walks the search pages in order until the page limit, an empty page or the
/// first failed request. Seeds gathered before a failure are kept.
pub async fn fetch_leads(client: &ApolloClient, criteria: &SearchCriteria) -> FetchOutcome {
    log::info!(
        "Fetching leads for {} with titles [{}] up to {} pages",
        criteria.organization_name(),
        criteria.titles_joined(),
        criteria.max_pages()
    );

    let mut outcome = FetchOutcome::default();
    let mut page = 1;

    while page <= criteria.max_pages() {
        let request = SearchPeopleRequest {
            q_organization_name: criteria.organization_name(),
            person_titles: criteria.titles(),
            page,
        };

        let people = match client.search_people(&request).await {
            Ok(response) => response.people.unwrap_or_default(),
            Err(ApolloError::Status(status)) => {
                log::error!("API error on page {}: {}", page, status);
                outcome.warnings.push(Warning::SearchFailed {
                    page,
                    status: status.as_u16(),
                });
                break;
            }
            Err(e) => {
                log::error!("Search request for page {} failed: {:?}", page, e);
                outcome.warnings.push(Warning::SearchUnavailable {
                    page,
                    reason: e.to_string(),
                });
                break;
            }
        };

        if people.is_empty() {
            log::warn!("No more people found on page {}. Stopping early.", page);
            outcome.warnings.push(Warning::NoMorePeople { page });
            break;
        }

        let mut dropped = 0;
        for person in people {
            match person.into_seed() {
                Some(seed) => outcome.seeds.push(seed),
                None => {
                    log::debug!("Dropping incomplete person on page {}", page);
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            outcome.dropped += dropped;
            if client.report_dropped_records() {
                outcome.warnings.push(Warning::IncompleteRecords {
                    page,
                    count: dropped,
                });
            }
        }

        log::info!(
            "Page {} done, {} seeds collected so far",
            page,
            outcome.seeds.len()
        );

        page += 1;
        if page <= criteria.max_pages() {
            time::sleep(client.page_delay()).await;
        }
    }

    outcome
}
