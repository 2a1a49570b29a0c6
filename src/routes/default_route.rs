use actix_web::{get, HttpResponse, Responder};
use askama::Template;

#[derive(Template)]
#[template(path = "lead_form.html")]
pub struct LeadFormTemplate {
    pub organization_name: String,
    pub titles: String,
    pub max_pages: u32,
    pub error: Option<String>,
}

impl Default for LeadFormTemplate {
    fn default() -> Self {
        LeadFormTemplate {
            organization_name: "Agilisium".to_string(),
            titles: "Director,IT".to_string(),
            max_pages: 5,
            error: None,
        }
    }
}

#[get("/")]
pub async fn default() -> HttpResponse {
    match LeadFormTemplate::default().render() {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(e) => {
            log::error!("Failed to render lead form: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}
