use serde::Serialize;

use crate::domain::{lead::EnrichedLead, search_criteria::SearchCriteria, warning::Warning};

use super::{enrich, fetch_leads, ApolloClient};

#[derive(Debug, Serialize)]
pub struct LeadReport {
    pub criteria: SearchCriteria,
    pub seeds_found: usize,
    pub dropped_records: usize,
    pub leads: Vec<EnrichedLead>,
    pub warnings: Vec<Warning>,
}

/// Search then enrich. Warnings of both stages are kept in the order they happened.
pub async fn run_pipeline(client: &ApolloClient, criteria: &SearchCriteria) -> LeadReport {
    let fetched = fetch_leads(client, criteria).await;
    log::info!(
        "Fetched {} seeds for {} ({} dropped)",
        fetched.seeds.len(),
        criteria.organization_name(),
        fetched.dropped
    );

    let enriched = enrich(client, &fetched.seeds, client.batch_size()).await;
    log::info!(
        "{} leads retrieved and enriched for {}",
        enriched.leads.len(),
        criteria.organization_name()
    );

    let mut warnings = fetched.warnings;
    warnings.extend(enriched.warnings);

    LeadReport {
        criteria: criteria.clone(),
        seeds_found: fetched.seeds.len(),
        dropped_records: fetched.dropped,
        leads: enriched.leads,
        warnings,
    }
}
