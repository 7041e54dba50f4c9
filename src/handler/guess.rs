//! Guess endpoint
//!
//! Reads a bounded JSON body, validates the guess against the word list and
//! scores it against today's word.

use crate::config::AppState;
use crate::game::GuessRequest;
use crate::http;
use crate::logger;
use chrono::Utc;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a request body could not be used
#[derive(Debug)]
enum BodyError {
    TooLarge,
    Read(BoxError),
    Json(serde_json::Error),
}

/// Handle `POST <guess_path>`
pub async fn handle_guess<B>(req: Request<B>, state: &Arc<AppState>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let max_body_size = state.config.http.max_body_size;

    let guess_req = match read_guess_request(req, max_body_size).await {
        Ok(r) => r,
        Err(BodyError::TooLarge) => {
            logger::log_warning(&format!(
                "Guess body too large (max: {max_body_size} bytes)"
            ));
            return http::build_413_response(max_body_size);
        }
        Err(BodyError::Read(e)) => {
            logger::log_warning(&format!("Failed to read guess body: {e}"));
            return http::build_error_response(StatusCode::BAD_REQUEST, "Unreadable request body");
        }
        Err(BodyError::Json(e)) => {
            logger::log_debug(&format!("Rejected guess body: {e}"));
            return http::build_error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
        }
    };

    let dictionary = state.dictionary().await;
    match state
        .puzzle
        .check_guess(&dictionary, guess_req.guess(), Utc::now())
    {
        Ok(result) => http::build_json_response(StatusCode::OK, &result),
        Err(e) => {
            logger::log_error(&e.to_string());
            http::build_error_response(StatusCode::SERVICE_UNAVAILABLE, &e.to_string())
        }
    }
}

async fn read_guess_request<B>(req: Request<B>, max_body_size: u64) -> Result<GuessRequest, BodyError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    if declared_length(&req).is_some_and(|len| len > max_body_size) {
        return Err(BodyError::TooLarge);
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let body = Limited::new(req.into_body(), limit)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                BodyError::TooLarge
            } else {
                BodyError::Read(e)
            }
        })?
        .to_bytes();

    serde_json::from_slice(&body)
        .map(GuessRequest::from_json)
        .map_err(BodyError::Json)
}

/// Content-Length header, when present and well formed
fn declared_length<B>(req: &Request<B>) -> Option<u64> {
    req.headers()
        .get(hyper::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
