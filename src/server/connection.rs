// Connection handling module
// Accepts single TCP connections and serves them over HTTP/1.1

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppState, Config};
use crate::handler;
use crate::logger;

/// Accept a connection, enforcing the connection limit.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment first, then check, so concurrent accepts cannot both slip under the limit
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, peer_addr, Arc::clone(state), Arc::clone(conn_counter));
}

/// Serve a single connection in a spawned local task.
///
/// A connection is held open for at most [`connection_lifetime`]. After that
/// hyper stops taking new requests on it, and the request in flight gets
/// `write_timeout` to finish before the connection is dropped. The counter is
/// decremented when the task finishes either way.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let lifetime = connection_lifetime(&state.config);
        let grace = Duration::from_secs(state.config.performance.write_timeout);

        let mut builder = http1::Builder::new();
        builder.keep_alive(state.config.performance.keep_alive_timeout > 0);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state), peer_addr)),
        );
        tokio::pin!(conn);

        let outcome = match tokio::time::timeout(lifetime, conn.as_mut()).await {
            Ok(result) => Some(result),
            Err(_) => {
                conn.as_mut().graceful_shutdown();
                tokio::time::timeout(grace, conn.as_mut()).await.ok()
            }
        };

        match outcome {
            Some(Ok(())) => {}
            Some(Err(err)) => logger::log_connection_error(&err),
            None => logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                (lifetime + grace).as_secs()
            )),
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

/// How long a connection may stay open before it is closed gracefully.
///
/// `keep_alive_timeout` when keep-alive is on (non-zero), otherwise the
/// larger of `read_timeout` and `write_timeout`, which covers the single
/// request such a connection serves.
fn connection_lifetime(cfg: &Config) -> Duration {
    let perf = &cfg.performance;
    let secs = if perf.keep_alive_timeout > 0 {
        perf.keep_alive_timeout
    } else {
        std::cmp::max(perf.read_timeout, perf.write_timeout)
    };
    Duration::from_secs(secs)
}
