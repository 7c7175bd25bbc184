//! UI session state: active board, sidebar visibility and theme.
//!
//! Lives beside the task store in the same key-value medium, but the store
//! never reads or writes these keys (apart from the first-run sidebar flag).

use crate::error::StoreResult;
use crate::storage::{KeyValueStore, ACTIVE_BOARD_KEY, SIDEBAR_KEY, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub active_board: Option<String>,
    pub show_sidebar: bool,
    pub theme: Theme,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            active_board: None,
            show_sidebar: true,
            theme: Theme::Dark,
        }
    }
}

impl Session {
    pub fn load(storage: &impl KeyValueStore) -> StoreResult<Self> {
        let active_board = storage
            .get(ACTIVE_BOARD_KEY)?
            .and_then(|raw| match serde_json::from_str::<String>(&raw) {
                Ok(board) => Some(board),
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring malformed active board");
                    None
                }
            });
        let show_sidebar = storage.get(SIDEBAR_KEY)?.as_deref() == Some("true");
        let theme = if storage.get(THEME_KEY)?.as_deref() == Some("enabled") {
            Theme::Light
        } else {
            Theme::Dark
        };
        Ok(Self {
            active_board,
            show_sidebar,
            theme,
        })
    }

    /// Keeps the stored board if it still exists, otherwise falls back to the
    /// first board. Returns the resolved board.
    pub fn resolve_active_board(&mut self, boards: &[String]) -> Option<&str> {
        let still_exists = self
            .active_board
            .as_ref()
            .is_some_and(|board| boards.contains(board));
        if !still_exists {
            self.active_board = boards.first().cloned();
        }
        self.active_board.as_deref()
    }

    pub fn select_board(
        &mut self,
        storage: &impl KeyValueStore,
        board: impl Into<String>,
    ) -> StoreResult<()> {
        let board = board.into();
        storage.set(ACTIVE_BOARD_KEY, &serde_json::to_string(&board)?)?;
        tracing::debug!(%board, "selected board");
        self.active_board = Some(board);
        Ok(())
    }

    pub fn toggle_sidebar(&mut self, storage: &impl KeyValueStore) -> StoreResult<()> {
        self.show_sidebar = !self.show_sidebar;
        storage.set(SIDEBAR_KEY, if self.show_sidebar { "true" } else { "false" })?;
        Ok(())
    }

    pub fn toggle_theme(&mut self, storage: &impl KeyValueStore) -> StoreResult<()> {
        self.theme = self.theme.toggled();
        let value = match self.theme {
            Theme::Light => "enabled",
            Theme::Dark => "disabled",
        };
        storage.set(THEME_KEY, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn boards(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn load_from_empty_storage() {
        let session = Session::load(&MemoryStorage::new()).unwrap();
        assert_eq!(session.active_board, None);
        assert!(!session.show_sidebar);
        assert_eq!(session.theme, Theme::Dark);
    }

    #[test]
    fn selections_persist_across_loads() {
        let storage = MemoryStorage::new();
        let mut session = Session::load(&storage).unwrap();
        session.select_board(&storage, "Roadmap").unwrap();
        session.toggle_sidebar(&storage).unwrap();
        session.toggle_theme(&storage).unwrap();

        assert_eq!(storage.raw(ACTIVE_BOARD_KEY).as_deref(), Some("\"Roadmap\""));
        let reloaded = Session::load(&storage).unwrap();
        assert_eq!(reloaded, session);
        assert_eq!(reloaded.theme, Theme::Light);
        assert!(reloaded.show_sidebar);
    }

    #[test]
    fn resolve_falls_back_to_first_board() {
        let mut session = Session {
            active_board: Some("Gone".into()),
            ..Session::default()
        };
        assert_eq!(session.resolve_active_board(&boards(&["A", "B"])), Some("A"));
    }

    #[test]
    fn resolve_keeps_existing_board() {
        let mut session = Session {
            active_board: Some("B".into()),
            ..Session::default()
        };
        assert_eq!(session.resolve_active_board(&boards(&["A", "B"])), Some("B"));
    }

    #[test]
    fn resolve_with_no_boards_clears_selection() {
        let mut session = Session {
            active_board: Some("A".into()),
            ..Session::default()
        };
        assert_eq!(session.resolve_active_board(&[]), None);
    }

    #[test]
    fn malformed_active_board_is_ignored() {
        let storage = MemoryStorage::new();
        storage.set(ACTIVE_BOARD_KEY, "Roadmap").unwrap();
        assert_eq!(Session::load(&storage).unwrap().active_board, None);
    }
}
