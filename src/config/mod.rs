// Configuration module entry point
// Loads layered configuration and holds the runtime application state

mod state;
mod types;

use std::net::SocketAddr;

use crate::game::{DayResolver, Puzzle};

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Environment variable prefix, e.g. `WORDLE_SERVER__PORT=9000`
const ENV_PREFIX: &str = "WORDLE";

impl Config {
    /// Load configuration from specified file path (extension optional)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "wordle-server")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1024)?
            .set_default("game.words_file", "words.txt")?
            .set_default("game.start_date", "2022-05-21")?
            .set_default("game.word_length", 5)?
            .set_default("game.wrap_around", false)?
            .set_default("game.guess_path", "/guess")?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that deserialize fine but cannot be served
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.game.word_length == 0 {
            return Err(config::ConfigError::Message(
                "game.word_length must be at least 1".to_string(),
            ));
        }
        if !self.game.guess_path.starts_with('/') {
            return Err(config::ConfigError::Message(format!(
                "game.guess_path must start with '/': {}",
                self.game.guess_path
            )));
        }
        self.puzzle()
            .map(|_| ())
            .map_err(|e| config::ConfigError::Message(e.to_string()))
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Puzzle rules built from the `game` section
    pub fn puzzle(&self) -> Result<Puzzle, crate::game::DayError> {
        let resolver = DayResolver::parse(&self.game.start_date)?;
        Ok(Puzzle::new(resolver, self.game.wrap_around))
    }
}
