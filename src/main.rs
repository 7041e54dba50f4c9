use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod game;
mod handler;
mod http;
mod logger;
mod server;

/// Config file used when no path is given on the command line
const DEFAULT_CONFIG: &str = "config.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Create Tokio runtime, sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let puzzle = cfg.puzzle()?;
    let dictionary = game::Dictionary::load(&cfg.game.words_file, cfg.game.word_length)?;
    logger::log_dictionary_loaded(&cfg.game.words_file, dictionary.word_count());

    match puzzle.answer(&dictionary, chrono::Utc::now()) {
        Ok(word) => logger::log_debug(&format!(
            "Word of the day (day {} since {}): {word}",
            puzzle.resolver().today().unwrap_or_default(),
            puzzle.resolver().start_date()
        )),
        Err(e) => logger::log_warning(&format!("Guesses will be refused: {e}")),
    }

    let listener = server::create_reusable_listener(addr)?;
    logger::log_server_start(&addr, &cfg, &dictionary);

    let state = Arc::new(config::AppState::new(&cfg, puzzle, dictionary));
    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&state), Arc::clone(&shutdown));

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state, shutdown))
        .await
}
