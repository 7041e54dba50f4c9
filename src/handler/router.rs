//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for route matching,
//! method validation, and access logging.

use crate::config::AppState;
use crate::handler::guess;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use chrono::Utc;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

/// Methods accepted on health check paths
const HEALTH_ALLOW: &str = "GET, HEAD, OPTIONS";

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_log = state.cached_access_log.load(Ordering::Relaxed);
    let mut entry = access_log.then(|| access_entry(&req, peer_addr));

    let response = route_request(req, &state).await;
    let response = http::finalize_response(
        response,
        &state.config.http.server_name,
        state.config.http.enable_cors,
    );

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path and method
async fn route_request<B>(req: Request<B>, state: &Arc<AppState>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let game = &state.config.game;
    let health = &state.config.health;

    // 1. Guess submissions
    if path == game.guess_path {
        return match method {
            Method::POST => guess::handle_guess(req, state).await,
            Method::OPTIONS => {
                http::build_options_response(http::GUESS_ALLOW, state.config.http.enable_cors)
            }
            _ => {
                logger::log_warning(&format!("Method not allowed on {path}: {method}"));
                http::build_405_response(http::GUESS_ALLOW)
            }
        };
    }

    // 2. Health check endpoints
    if health.enabled && (path == health.liveness_path || path == health.readiness_path) {
        return match method {
            Method::GET | Method::HEAD if path == health.liveness_path => {
                http::build_health_response(StatusCode::OK, "ok")
            }
            Method::GET | Method::HEAD => check_readiness(state).await,
            Method::OPTIONS => {
                http::build_options_response(HEALTH_ALLOW, state.config.http.enable_cors)
            }
            _ => http::build_405_response(HEALTH_ALLOW),
        };
    }

    // 3. Unknown
    http::build_404_response()
}

/// Ready when a word is scheduled for today
async fn check_readiness(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let dictionary = state.dictionary().await;
    match state.puzzle.answer(&dictionary, Utc::now()) {
        Ok(_) => http::build_health_response(StatusCode::OK, "ok"),
        Err(e) => {
            logger::log_warning(&format!("Readiness check failed: {e}"));
            http::build_health_response(StatusCode::SERVICE_UNAVAILABLE, "no word scheduled")
        }
    }
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.user_agent = req
        .headers()
        .get(hyper::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry
}
