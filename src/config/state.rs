// Application state module
// Shared, read-mostly state handed to every connection

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::types::Config;
use crate::game::{Dictionary, DictionaryError, Puzzle};
use crate::logger;

/// Application state
pub struct AppState {
    pub config: Config,
    pub puzzle: Puzzle,
    /// Current word list; replaced whole on reload
    dictionary: RwLock<Arc<Dictionary>>,

    // Cached config values for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &Config, puzzle: Puzzle, dictionary: Dictionary) -> Self {
        Self {
            config: config.clone(),
            puzzle,
            dictionary: RwLock::new(Arc::new(dictionary)),
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        }
    }

    /// Snapshot of the current word list
    pub async fn dictionary(&self) -> Arc<Dictionary> {
        Arc::clone(&*self.dictionary.read().await)
    }

    /// Re-read the word list from `game.words_file`.
    ///
    /// On failure the current list stays in place.
    pub async fn reload_dictionary(&self) -> Result<usize, DictionaryError> {
        let game = &self.config.game;
        let fresh = Dictionary::load(&game.words_file, game.word_length)?;
        let count = fresh.word_count();
        *self.dictionary.write().await = Arc::new(fresh);
        logger::log_dictionary_loaded(&game.words_file, count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_reload_keeps_current_words() {
        let mut cfg = Config::load_from("/nonexistent/wordle_server/config").unwrap();
        cfg.game.words_file = "/nonexistent/wordle_server/words.txt".to_string();
        let dict = Dictionary::from_words(["crane"], 5).unwrap();
        let state = AppState::new(&cfg, cfg.puzzle().unwrap(), dict);

        assert!(state.reload_dictionary().await.is_err());
        assert!(state.dictionary().await.contains("crane"));
    }

    #[tokio::test]
    async fn test_reload_swaps_word_list() {
        let dir = std::env::temp_dir().join(format!("wordle_server_state_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("reload.txt");
        std::fs::write(&path, "slate\npious\n").unwrap();

        let mut cfg = Config::load_from("/nonexistent/wordle_server/config").unwrap();
        cfg.game.words_file = path.to_string_lossy().into_owned();
        let dict = Dictionary::from_words(["crane"], 5).unwrap();
        let state = AppState::new(&cfg, cfg.puzzle().unwrap(), dict);

        let before = state.dictionary().await;
        assert_eq!(state.reload_dictionary().await.unwrap(), 2);
        let after = state.dictionary().await;
        assert!(after.contains("slate"));
        assert!(!after.contains("crane"));
        // Snapshots taken earlier are unaffected
        assert!(before.contains("crane"));
    }
}
