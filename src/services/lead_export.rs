use url::form_urlencoded;

use crate::domain::lead::EnrichedLead;

/// Utf-8 csv with a header row, one row per lead. Missing values are empty cells.
pub fn leads_to_csv(leads: &[EnrichedLead]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);

    writer.write_record(EnrichedLead::FIELD_NAMES)?;
    for lead in leads {
        writer.serialize(lead)?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Inline `data:` uri so the results page can offer the download without a second run.
pub fn csv_data_uri(csv: &[u8]) -> String {
    // form encoding writes spaces as '+' and a literal '+' as %2B
    let encoded: String = form_urlencoded::byte_serialize(csv).collect();
    format!("data:text/csv;charset=utf-8,{}", encoded.replace('+', "%20"))
}
