use crate::domain::{
    lead::{EnrichedLead, LeadSeed},
    warning::Warning,
};

use super::{ApolloClient, ApolloError, BulkMatchRequest};

#[derive(Debug, Default)]
pub struct EnrichOutcome {
    pub leads: Vec<EnrichedLead>,
    pub warnings: Vec<Warning>,
}

/// Consecutive, order preserving batches of at most `batch_size` seeds.
pub fn batches(seeds: &[LeadSeed], batch_size: usize) -> std::slice::Chunks<'_, LeadSeed> {
    seeds.chunks(batch_size.max(1))
}

/// Runs one bulk match call per batch. A failed batch is reported and skipped,
/// the remaining batches are still sent.
pub async fn enrich(client: &ApolloClient, seeds: &[LeadSeed], batch_size: usize) -> EnrichOutcome {
    let mut outcome = EnrichOutcome::default();

    for (index, batch) in batches(seeds, batch_size).enumerate() {
        let batch_number = index + 1;

        match client.bulk_match(&BulkMatchRequest::new(batch)).await {
            Ok(response) => {
                let before = outcome.leads.len();
                outcome.leads.extend(
                    response
                        .matches
                        .unwrap_or_default()
                        .into_iter()
                        .flatten()
                        .map(EnrichedLead::from),
                );
                log::info!(
                    "Batch {} matched {} of {} seeds",
                    batch_number,
                    outcome.leads.len() - before,
                    batch.len()
                );
            }
            Err(ApolloError::Status(status)) => {
                log::error!("Enrichment failed for batch {}: {}", batch_number, status);
                outcome.warnings.push(Warning::EnrichmentFailed {
                    batch: batch_number,
                    status: status.as_u16(),
                });
            }
            Err(e) => {
                log::error!("Enrichment request for batch {} failed: {:?}", batch_number, e);
                outcome.warnings.push(Warning::EnrichmentUnavailable {
                    batch: batch_number,
                    reason: e.to_string(),
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use wiremock::{
        matchers::{body_partial_json, body_string_contains, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::{batches, enrich};
    use crate::{
        configuration::ApolloSettings,
        domain::{lead::LeadSeed, warning::Warning},
        services::ApolloClient,
    };

    const BULK_MATCH_PATH: &str = "/api/v1/people/bulk_match";

    fn client(server: &MockServer) -> ApolloClient {
        client_for(server.uri())
    }

    fn client_for(base_url: String) -> ApolloClient {
        ApolloClient::new(&ApolloSettings {
            api_key: "test-key".to_string(),
            base_url,
            page_delay_millis: 0,
            batch_size: 10,
            timeout_secs: 5,
            report_dropped_records: true,
        })
        .unwrap()
    }

    fn seeds(count: usize) -> Vec<LeadSeed> {
        (0..count)
            .map(|i| LeadSeed {
                first_name: format!("Seed{}", i),
                last_name: "Doe".to_string(),
                organization_name: "Acme".to_string(),
                domain: "http://acme.com".to_string(),
            })
            .collect()
    }

    fn matched(name: &str) -> Value {
        json!({
            "name": name,
            "title": "CEO",
            "organization": {"name": "Acme", "website_url": "http://acme.com", "phone": "555"},
            "linkedin_url": null,
            "email": format!("{}@acme.com", name.to_lowercase())
        })
    }

    #[test]
    fn batches_cover_every_seed_once() {
        for len in [0, 1, 9, 10, 11, 25, 30] {
            let input = seeds(len);
            let parts: Vec<&[LeadSeed]> = batches(&input, 10).collect();

            assert_eq!(parts.len(), len.div_ceil(10));
            assert!(parts.iter().all(|b| !b.is_empty() && b.len() <= 10));

            let flattened: Vec<LeadSeed> = parts.concat();
            assert_eq!(flattened, input);
        }
    }

    #[test]
    fn zero_batch_size_is_treated_as_one() {
        let input = seeds(3);

        assert_eq!(batches(&input, 0).count(), 3);
    }

    #[tokio::test]
    async fn one_call_per_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BULK_MATCH_PATH))
            .and(body_partial_json(json!({
                "reveal_personal_emails": false,
                "reveal_phone_number": false
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "matches": [matched("Ann")] })),
            )
            .expect(3)
            .mount(&server)
            .await;

        let outcome = enrich(&client(&server), &seeds(25), 10).await;

        assert_eq!(outcome.leads.len(), 3);
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn failed_batch_does_not_stop_later_batches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BULK_MATCH_PATH))
            .and(body_string_contains(r#""first_name":"Seed0""#))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(BULK_MATCH_PATH))
            .and(body_string_contains(r#""first_name":"Seed10""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "matches": [matched("Kim"), null, matched("Lee")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = enrich(&client(&server), &seeds(13), 10).await;

        let names: Vec<Option<&str>> = outcome.leads.iter().map(|l| l.name.as_deref()).collect();
        assert_eq!(names, [Some("Kim"), Some("Lee")]);
        assert_eq!(
            outcome.warnings,
            vec![Warning::EnrichmentFailed {
                batch: 1,
                status: 500
            }]
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_reported_per_batch() {
        // Nothing listens on a port released right after binding it
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let client = client_for(format!("http://127.0.0.1:{}", port));

        let outcome = enrich(&client, &seeds(12), 10).await;

        assert!(outcome.leads.is_empty());
        assert!(matches!(
            outcome.warnings.as_slice(),
            [
                Warning::EnrichmentUnavailable { batch: 1, .. },
                Warning::EnrichmentUnavailable { batch: 2, .. }
            ]
        ));
    }

    #[tokio::test]
    async fn no_seeds_means_no_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let outcome = enrich(&client(&server), &[], 10).await;

        assert!(outcome.leads.is_empty());
        assert!(outcome.warnings.is_empty());
    }
}
