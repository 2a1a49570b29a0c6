use actix_web::{
    http::{
        header::{ContentDisposition, DispositionParam, DispositionType},
        StatusCode,
    },
    post, web, HttpResponse, ResponseError,
};
use askama::Template;
use serde::Deserialize;

use crate::{
    domain::{
        lead::EnrichedLead,
        search_criteria::{CriteriaError, SearchCriteria, SearchForm},
        warning::Warning,
    },
    routes::default_route::LeadFormTemplate,
    services::{csv_data_uri, leads_to_csv, run_pipeline, ApolloClient, LeadReport},
};

#[derive(Debug, thiserror::Error)]
pub enum LeadRouteError {
    #[error(transparent)]
    Criteria(#[from] CriteriaError),
    #[error("Failed to render page: {0}")]
    Template(#[from] askama::Error),
    #[error("Failed to export leads: {0}")]
    Export(#[from] csv::Error),
}

impl ResponseError for LeadRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeadRouteError::Criteria(_) => StatusCode::BAD_REQUEST,
            LeadRouteError::Template(_) | LeadRouteError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Template)]
#[template(path = "leads.html")]
struct LeadsTemplate {
    organization_name: String,
    titles: String,
    seeds_found: usize,
    dropped_records: usize,
    leads: Vec<LeadTemplateRow>,
    warnings: Vec<WarningTemplateRow>,
    csv_href: String,
    csv_filename: String,
}

struct LeadTemplateRow {
    name: String,
    title: String,
    location: String,
    city: String,
    state: String,
    organization_name: String,
    linkedin_url: String,
    phone: String,
    email: String,
}

impl From<EnrichedLead> for LeadTemplateRow {
    fn from(value: EnrichedLead) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            title: value.title.unwrap_or_default(),
            location: value.location.unwrap_or_default(),
            city: value.city.unwrap_or_default(),
            state: value.state.unwrap_or_default(),
            organization_name: value.organization_name.unwrap_or_default(),
            linkedin_url: value.linkedin_url.unwrap_or_default(),
            phone: value.phone.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
        }
    }
}

struct WarningTemplateRow {
    message: String,
    is_error: bool,
}

impl From<Warning> for WarningTemplateRow {
    fn from(value: Warning) -> Self {
        Self {
            is_error: value.is_error(),
            message: value.to_string(),
        }
    }
}

impl LeadsTemplate {
    fn new(report: LeadReport, csv_href: String) -> Self {
        LeadsTemplate {
            organization_name: report.criteria.organization_name().to_string(),
            titles: report.criteria.titles_joined(),
            seeds_found: report.seeds_found,
            dropped_records: report.dropped_records,
            csv_filename: report.criteria.export_filename(),
            leads: report.leads.into_iter().map(|l| l.into()).collect(),
            warnings: report.warnings.into_iter().map(|w| w.into()).collect(),
            csv_href,
        }
    }
}

#[post("")]
pub async fn show_leads(
    apollo_client: web::Data<ApolloClient>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse, LeadRouteError> {
    let form = form.into_inner();
    let mut form_template = LeadFormTemplate {
        organization_name: form.organization_name.clone(),
        titles: form.titles.clone(),
        max_pages: form.max_pages,
        error: None,
    };

    let criteria = match SearchCriteria::try_from(form) {
        Ok(criteria) => criteria,
        Err(e) => {
            form_template.error = Some(e.to_string());
            return Ok(HttpResponse::BadRequest()
                .content_type("text/html")
                .body(form_template.render()?));
        }
    };

    let report = run_pipeline(&apollo_client, &criteria).await;
    let csv = leads_to_csv(&report.leads)?;
    let page = LeadsTemplate::new(report, csv_data_uri(&csv));

    Ok(HttpResponse::Ok()
        .content_type("text/html")
        .body(page.render()?))
}

#[post("/csv")]
pub async fn download_leads(
    apollo_client: web::Data<ApolloClient>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse, LeadRouteError> {
    let criteria = SearchCriteria::try_from(form.into_inner())?;

    let report = run_pipeline(&apollo_client, &criteria).await;
    let csv = leads_to_csv(&report.leads)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(criteria.export_filename())],
        })
        .body(csv))
}

#[derive(Deserialize)]
pub struct LeadsRequest {
    organization_name: String,
    titles: Vec<String>,
    max_pages: u32,
}

#[post("/leads")]
pub async fn api_leads(
    apollo_client: web::Data<ApolloClient>,
    body: web::Json<LeadsRequest>,
) -> Result<HttpResponse, LeadRouteError> {
    let body = body.into_inner();
    let criteria = SearchCriteria::new(&body.organization_name, body.titles, body.max_pages)?;

    let report = run_pipeline(&apollo_client, &criteria).await;

    Ok(HttpResponse::Ok().json(report))
}
