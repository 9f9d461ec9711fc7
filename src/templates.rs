use actix_web::{http::StatusCode, HttpResponse};
use askama::Template;

use crate::models::SiteSettings;

/// Header and footer data shared by every page.
#[derive(Debug, Clone)]
pub struct SiteChrome {
    pub academy_name: String,
    pub tagline: String,
    pub contact_line: String,
    pub has_contact: bool,
}

impl From<&SiteSettings> for SiteChrome {
    fn from(site: &SiteSettings) -> Self {
        let contact_line = [site.address.as_str(), site.phone.as_str(), site.email.as_str()]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" · ");
        Self {
            academy_name: site.academy_name.clone(),
            tagline: site.tagline.clone(),
            has_contact: !contact_line.is_empty(),
            contact_line,
        }
    }
}

pub fn render<T: Template>(template: T) -> HttpResponse {
    render_with_status(StatusCode::OK, template)
}

pub fn render_with_status<T: Template>(status: StatusCode, template: T) -> HttpResponse {
    match template.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Template render error: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
