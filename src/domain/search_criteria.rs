use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const MAX_PAGES_LIMIT: u32 = 100;

/// Input for a single fetch run. Only constructed through [`SearchCriteria::parse`]
/// or [`SearchCriteria::new`], both of which validate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCriteria {
    organization_name: String,
    titles: Vec<String>,
    max_pages: u32,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CriteriaError {
    #[error("Organization name must not be empty")]
    EmptyOrganization,
    #[error("At least one title is required")]
    NoTitles,
    #[error("Max pages must be between 1 and {max}, got {0}", max = MAX_PAGES_LIMIT)]
    MaxPagesOutOfRange(u32),
}

/// Raw input as typed into the search form.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub organization_name: String,
    pub titles: String,
    pub max_pages: u32,
}

impl TryFrom<SearchForm> for SearchCriteria {
    type Error = CriteriaError;

    fn try_from(form: SearchForm) -> Result<Self, Self::Error> {
        SearchCriteria::parse(&form.organization_name, &form.titles, form.max_pages)
    }
}

impl SearchCriteria {
    pub fn new(
        organization_name: &str,
        titles: Vec<String>,
        max_pages: u32,
    ) -> Result<Self, CriteriaError> {
        let organization_name = organization_name.trim();
        if organization_name.is_empty() {
            return Err(CriteriaError::EmptyOrganization);
        }

        let titles: Vec<String> = titles
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if titles.is_empty() {
            return Err(CriteriaError::NoTitles);
        }

        if !(1..=MAX_PAGES_LIMIT).contains(&max_pages) {
            return Err(CriteriaError::MaxPagesOutOfRange(max_pages));
        }

        Ok(SearchCriteria {
            organization_name: organization_name.to_string(),
            titles,
            max_pages,
        })
    }

    /// Builds criteria from a comma separated title string, e.g. `"Director, IT"`.
    pub fn parse(
        organization_name: &str,
        titles: &str,
        max_pages: u32,
    ) -> Result<Self, CriteriaError> {
        let titles = titles.split(',').map(|t| t.to_string()).collect();
        SearchCriteria::new(organization_name, titles, max_pages)
    }

    pub fn organization_name(&self) -> &str {
        &self.organization_name
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn titles_joined(&self) -> String {
        self.titles.iter().join(",")
    }

    /// Download name for the csv export of this run.
    pub fn export_filename(&self) -> String {
        format!("apollo_leads_{}.csv", self.organization_name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::{CriteriaError, SearchCriteria};

    #[test]
    fn parse_splits_and_trims_titles() {
        let criteria = SearchCriteria::parse("  Agilisium ", "Director, IT ,, ", 5).unwrap();

        assert_eq!(criteria.organization_name(), "Agilisium");
        assert_eq!(criteria.titles(), ["Director", "IT"]);
        assert_eq!(criteria.max_pages(), 5);
        assert_eq!(criteria.titles_joined(), "Director,IT");
    }

    #[test]
    fn parse_rejects_invalid_input() {
        assert_eq!(
            SearchCriteria::parse(" ", "CEO", 1),
            Err(CriteriaError::EmptyOrganization)
        );
        assert_eq!(
            SearchCriteria::parse("Acme", " , ", 1),
            Err(CriteriaError::NoTitles)
        );
        assert_eq!(
            SearchCriteria::parse("Acme", "CEO", 0),
            Err(CriteriaError::MaxPagesOutOfRange(0))
        );
        assert_eq!(
            SearchCriteria::parse("Acme", "CEO", 101),
            Err(CriteriaError::MaxPagesOutOfRange(101))
        );
    }

    #[test]
    fn export_filename_is_lowercased() {
        let criteria = SearchCriteria::parse("Acme Corp", "CEO", 1).unwrap();

        assert_eq!(criteria.export_filename(), "apollo_leads_acme corp.csv");
    }
}
