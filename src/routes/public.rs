use actix_web::{http::StatusCode, web, HttpResponse, Result};
use askama::Template;
use chrono::{Datelike, Local};

use crate::{
    loaders::{load_home, load_products, load_programs, load_schedule, load_site},
    models::{ScheduleEntry, WEEKDAYS},
    sections::{compose_home, ProductCard, ProgramCard, RenderedSection},
    state::AppState,
    templates::{render, render_with_status, SiteChrome},
};

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    chrome: SiteChrome,
    sections: Vec<RenderedSection>,
}

#[derive(Template)]
#[template(path = "programs.html")]
struct ProgramsTemplate {
    chrome: SiteChrome,
    programs: Vec<ProgramCard>,
}

#[derive(Template)]
#[template(path = "program_detail.html")]
struct ProgramDetailTemplate {
    chrome: SiteChrome,
    program: ProgramCard,
}

#[derive(Template)]
#[template(path = "products.html")]
struct ProductsTemplate {
    chrome: SiteChrome,
    products: Vec<ProductCard>,
}

#[derive(Clone, Debug)]
struct ClassSlot {
    start_time: String,
    end_time: String,
    program_title: String,
    instructor: String,
    has_instructor: bool,
}

#[derive(Clone, Debug)]
struct ScheduleDay {
    name: &'static str,
    is_today: bool,
    classes: Vec<ClassSlot>,
}

#[derive(Template)]
#[template(path = "schedule.html")]
struct ScheduleTemplate {
    chrome: SiteChrome,
    days: Vec<ScheduleDay>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    chrome: SiteChrome,
    message: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home)))
        .service(web::resource("/programs").route(web::get().to(list_programs)))
        .service(web::resource("/programs/{slug}").route(web::get().to(program_detail)))
        .service(web::resource("/products").route(web::get().to(list_products)))
        .service(web::resource("/schedule").route(web::get().to(schedule)))
        .service(web::resource("/health").route(web::get().to(health)));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

async fn home(state: web::Data<AppState>) -> Result<HttpResponse> {
    let content = load_home(state.store.as_ref(), state.config.fetch_timeout).await;
    let sections = compose_home(&content, state.config.carousel_interval);
    let chrome = SiteChrome::from(&content.site.value.clone().unwrap_or_default());

    Ok(render(HomeTemplate { chrome, sections }))
}

async fn list_programs(state: web::Data<AppState>) -> Result<HttpResponse> {
    let limit = state.config.fetch_timeout;
    let (site, programs) = tokio::join!(
        load_site(state.store.as_ref(), limit),
        load_programs(state.store.as_ref(), limit),
    );

    Ok(render(ProgramsTemplate {
        chrome: SiteChrome::from(&site.value.unwrap_or_default()),
        programs: programs.value.iter().map(ProgramCard::from).collect(),
    }))
}

async fn program_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let key = path.into_inner();
    let limit = state.config.fetch_timeout;
    let (site, programs) = tokio::join!(
        load_site(state.store.as_ref(), limit),
        load_programs(state.store.as_ref(), limit),
    );
    let chrome = SiteChrome::from(&site.value.unwrap_or_default());

    match programs.value.iter().find(|program| program.matches_path(&key)) {
        Some(program) => Ok(render(ProgramDetailTemplate {
            chrome,
            program: ProgramCard::from(program),
        })),
        None => {
            let message = if programs.is_ready() {
                format!("We couldn't find a program called \"{key}\".")
            } else {
                "Programs are unavailable right now. Please try again shortly.".to_string()
            };
            Ok(render_with_status(
                StatusCode::NOT_FOUND,
                NotFoundTemplate { chrome, message },
            ))
        }
    }
}

async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse> {
    let limit = state.config.fetch_timeout;
    let (site, products) = tokio::join!(
        load_site(state.store.as_ref(), limit),
        load_products(state.store.as_ref(), limit),
    );

    Ok(render(ProductsTemplate {
        chrome: SiteChrome::from(&site.value.unwrap_or_default()),
        products: products.value.iter().map(ProductCard::from).collect(),
    }))
}

async fn schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let limit = state.config.fetch_timeout;
    let (site, entries) = tokio::join!(
        load_site(state.store.as_ref(), limit),
        load_schedule(state.store.as_ref(), limit),
    );
    let today = Local::now().weekday().num_days_from_sunday() as u8;

    Ok(render(ScheduleTemplate {
        chrome: SiteChrome::from(&site.value.unwrap_or_default()),
        days: group_by_day(entries.value, today),
    }))
}

/// Weekdays Sunday..Saturday that have classes, each sorted by start time.
fn group_by_day(entries: Vec<ScheduleEntry>, today: u8) -> Vec<ScheduleDay> {
    let mut days: Vec<ScheduleDay> = WEEKDAYS
        .iter()
        .enumerate()
        .map(|(day, &name)| ScheduleDay {
            name,
            is_today: day as u8 == today,
            classes: Vec::new(),
        })
        .collect();

    let mut entries = entries;
    entries.sort_by(|a, b| {
        a.day_of_week
            .cmp(&b.day_of_week)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });

    for entry in entries {
        let Some(day) = days.get_mut(usize::from(entry.day_of_week)) else {
            continue;
        };
        let instructor = entry.instructor.unwrap_or_default();
        day.classes.push(ClassSlot {
            start_time: entry.start_time,
            end_time: entry.end_time,
            program_title: entry.program_title,
            has_instructor: !instructor.is_empty(),
            instructor,
        });
    }

    days.retain(|day| !day.classes.is_empty());
    days
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test as actix_test, App};

    use super::*;
    use crate::{
        config::SiteConfig,
        store::{memory::MemoryStore, Table},
    };

    fn app_state(store: MemoryStore) -> web::Data<AppState> {
        web::Data::new(AppState::new(Arc::new(store), SiteConfig::default()))
    }

    async fn get(store: MemoryStore, uri: &str) -> (StatusCode, String) {
        let app = actix_test::init_service(
            App::new()
                .app_data(app_state(store))
                .configure(configure),
        )
        .await;
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn home_renders_configured_sections_in_order() {
        let (status, body) = get(MemoryStore::sample(), "/").await;
        assert_eq!(status, StatusCode::OK);
        let hero = body.find("id=\"hero\"").expect("hero");
        let methodology = body.find("id=\"methodology\"").expect("methodology");
        let cta = body.find("id=\"cta\"").expect("cta");
        assert!(hero < methodology && methodology < cta);
        assert!(!body.contains("id=\"location\""));
        assert!(body.contains("Train with us"));
        assert!(!body.contains("Retired slide"));
        assert!(!body.contains("data-fallback"));
        assert!(body.contains("Test Academy"));
    }

    #[actix_web::test]
    async fn home_survives_every_table_failing() {
        let store = Table::ALL
            .into_iter()
            .fold(MemoryStore::sample(), |store, table| store.failing(table));
        let (status, body) = get(store, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("id=\"why_choose\""));
        assert!(body.contains("fallback-1.svg"));
        assert!(body.contains("data-fallback"));
        assert!(body.contains("No featured programs at the moment."));
    }

    #[actix_web::test]
    async fn program_detail_by_slug_and_missing() {
        let (status, body) = get(MemoryStore::sample(), "/programs/kids").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Program kids"));

        let (status, body) = get(MemoryStore::sample(), "/programs/karate").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("karate"));
    }

    #[actix_web::test]
    async fn program_list_and_products() {
        let (status, body) = get(MemoryStore::sample(), "/programs").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Program advanced"));

        let (status, body) = get(MemoryStore::sample(), "/products").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Academy Gi"));
        assert!(body.contains("R$ 450,00"));
    }

    #[actix_web::test]
    async fn failing_products_render_empty_shop() {
        let (status, body) = get(MemoryStore::sample().failing(Table::Products), "/products").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No products available right now."));
    }

    #[actix_web::test]
    async fn schedule_page_lists_classes() {
        let (status, body) = get(MemoryStore::sample(), "/schedule").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Monday"));
        assert!(body.contains("Advanced Gi"));
    }

    #[actix_web::test]
    async fn health_is_ok() {
        let (status, body) = get(MemoryStore::default(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    fn entry(day: u8, start: &str, title: &str) -> ScheduleEntry {
        ScheduleEntry {
            id: format!("{day}-{start}"),
            day_of_week: day,
            start_time: start.to_string(),
            end_time: "23:00".to_string(),
            program_title: title.to_string(),
            instructor: None,
            is_active: true,
        }
    }

    #[test]
    fn schedule_groups_by_weekday_and_sorts_by_time() {
        let days = group_by_day(
            vec![
                entry(3, "19:00", "No-Gi"),
                entry(1, "19:00", "Advanced"),
                entry(1, "07:00", "Fundamentals"),
            ],
            3,
        );
        let names: Vec<&str> = days.iter().map(|day| day.name).collect();
        assert_eq!(names, vec!["Monday", "Wednesday"]);
        assert_eq!(days[0].classes[0].program_title, "Fundamentals");
        assert!(!days[0].is_today);
        assert!(days[1].is_today);
    }
}
