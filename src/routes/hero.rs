use actix_web::{http::header, web, HttpResponse};
use serde::Deserialize;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};

use crate::{carousel::CarouselEvent, error::CarouselError, state::AppState};

/// Upper bound on the slide count a client may ask a session to cycle.
const MAX_STREAM_SLIDES: usize = 64;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/hero/stream").route(web::get().to(stream_hero)))
        .service(
            web::resource("/hero/sessions/{id}/select").route(web::post().to(select_slide)),
        );
}

#[derive(Deserialize)]
struct StreamParams {
    slides: usize,
}

/// The session cycles exactly the slides the page rendered, so the client
/// sends its `data-slide` count instead of the server reading the table again.
async fn stream_hero(
    state: web::Data<AppState>,
    params: web::Query<StreamParams>,
) -> HttpResponse {
    let slide_count = params.slides;
    if !(1..=MAX_STREAM_SLIDES).contains(&slide_count) {
        return HttpResponse::BadRequest()
            .body(format!("slides must be between 1 and {MAX_STREAM_SLIDES}"));
    }

    let rx = state.carousels.open(slide_count, state.config.carousel_interval);
    let stream = ReceiverStream::new(rx)
        .map(|event| Ok::<web::Bytes, actix_web::Error>(event_to_bytes(&event)));

    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/event-stream"))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(stream)
}

fn event_to_bytes(event: &CarouselEvent) -> web::Bytes {
    let payload = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    web::Bytes::from(format!("event: {}\ndata: {}\n\n", event.name(), payload))
}

#[derive(Deserialize)]
struct SelectSlide {
    index: usize,
}

async fn select_slide(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SelectSlide>,
) -> HttpResponse {
    let session_id = path.into_inner();
    match state.carousels.select(&session_id, body.index) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => {
            log::debug!("Slide selection rejected: {err}");
            match err {
                CarouselError::UnknownSession(_) | CarouselError::SessionClosed(_) => {
                    HttpResponse::NotFound()
                }
                CarouselError::OutOfRange { .. } => HttpResponse::BadRequest(),
                CarouselError::SessionBusy(_) => HttpResponse::TooManyRequests(),
            }
            .body(err.to_string())
        }
    }
}
