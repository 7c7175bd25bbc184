//! Terminal front end state. Calls into the store for every user action and
//! rebuilds the board view from `list()` after each mutation.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use mockable::Clock;

use crate::board::{board_names, BoardView};
use crate::error::{StoreError, StoreResult};
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::task::{NewTask, Status, Task, TaskId, TaskPatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    NewBoard,
    AddTitle { board: String },
    AddDescription { board: String, title: String },
    EditTitle { id: TaskId },
    EditDescription { id: TaskId, title: String },
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::NewBoard => "New board name",
            PromptKind::AddTitle { .. } => "Task title",
            PromptKind::AddDescription { .. } => "Task description",
            PromptKind::EditTitle { .. } => "Edit title",
            PromptKind::EditDescription { .. } => "Edit description",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Prompt(Prompt),
}

pub struct App<S, C> {
    store: TaskStore<S, C>,
    pub session: Session,
    pub boards: Vec<String>,
    pub view: BoardView,
    pub selected_status: Status,
    pub selected_task: usize,
    pub mode: Mode,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl<S, C> App<S, C> {
    pub fn store(&self) -> &TaskStore<S, C> {
        &self.store
    }

    pub fn active_board(&self) -> Option<&str> {
        self.session.active_board.as_deref()
    }

    pub fn selected(&self) -> Option<&Task> {
        self.view
            .column(self.selected_status)
            .get(self.selected_task)
    }
}

impl<S: KeyValueStore, C: Clock> App<S, C> {
    pub fn new(store: TaskStore<S, C>) -> StoreResult<Self> {
        let session = Session::load(store.storage())?;
        let mut app = Self {
            store,
            session,
            boards: Vec::new(),
            view: BoardView::empty(),
            selected_status: Status::Todo,
            selected_task: 0,
            mode: Mode::Normal,
            message: None,
            should_quit: false,
        };
        app.refresh()?;
        Ok(app)
    }

    /// Re-reads the full collection and redraws the active board.
    pub fn refresh(&mut self) -> StoreResult<()> {
        let tasks = self.store.list()?;
        self.boards = board_names(&tasks);
        self.view = match self.session.resolve_active_board(&self.boards) {
            Some(board) => BoardView::build(&tasks, board),
            None => BoardView::empty(),
        };
        let len = self.view.column(self.selected_status).len();
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
        Ok(())
    }

    /// Applies one key press. Store failures never end the session: they are
    /// logged, shown in the footer, and the view is re-read.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let result = match self.mode.clone() {
            Mode::Normal => self.handle_normal(key.code),
            Mode::Prompt(prompt) => self.handle_prompt(prompt, key.code),
        };
        if let Err(err) = result {
            self.report(&err);
            if let Err(err) = self.refresh() {
                self.report(&err);
            }
        }
    }

    fn report(&mut self, err: &StoreError) {
        tracing::warn!(error = %err, "task board action failed");
        self.message = Some(err.to_string());
    }

    fn handle_normal(&mut self, code: KeyCode) -> StoreResult<()> {
        self.message = None;
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left => {
                self.selected_status = self.selected_status.previous();
                self.selected_task = 0;
            }
            KeyCode::Right => {
                self.selected_status = self.selected_status.next();
                self.selected_task = 0;
            }
            KeyCode::Up => self.selected_task = self.selected_task.saturating_sub(1),
            KeyCode::Down => {
                let len = self.view.column(self.selected_status).len();
                if self.selected_task + 1 < len {
                    self.selected_task += 1;
                }
            }
            KeyCode::Tab => self.cycle_board(1)?,
            KeyCode::BackTab => self.cycle_board(-1)?,
            KeyCode::Char('a') => {
                if let Some(board) = self.session.active_board.clone() {
                    self.open_prompt(PromptKind::AddTitle { board }, String::new());
                } else {
                    self.open_prompt(PromptKind::NewBoard, String::new());
                }
            }
            KeyCode::Char('n') => self.open_prompt(PromptKind::NewBoard, String::new()),
            KeyCode::Char('e') => {
                if let Some(task) = self.selected() {
                    let (id, title) = (task.id, task.title.clone());
                    self.open_prompt(PromptKind::EditTitle { id }, title);
                }
            }
            KeyCode::Enter | KeyCode::Char('>') => self.move_selected(Status::next)?,
            KeyCode::Char('<') => self.move_selected(Status::previous)?,
            KeyCode::Char('d') => {
                if let Some(id) = self.selected().map(|t| t.id) {
                    self.store.delete(id)?;
                    self.refresh()?;
                }
            }
            KeyCode::Char('s') => self.session.toggle_sidebar(self.store.storage())?,
            KeyCode::Char('t') => self.session.toggle_theme(self.store.storage())?,
            _ => {}
        }
        Ok(())
    }

    fn handle_prompt(&mut self, mut prompt: Prompt, code: KeyCode) -> StoreResult<()> {
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.message = None;
            }
            KeyCode::Backspace => {
                prompt.input.pop();
                self.mode = Mode::Prompt(prompt);
            }
            KeyCode::Char(c) => {
                prompt.input.push(c);
                self.mode = Mode::Prompt(prompt);
            }
            KeyCode::Enter => self.submit(prompt)?,
            _ => {}
        }
        Ok(())
    }

    fn submit(&mut self, prompt: Prompt) -> StoreResult<()> {
        let input = prompt.input.trim().to_string();
        match prompt.kind {
            PromptKind::NewBoard => {
                if input.is_empty() {
                    self.message = Some("board name must not be empty".to_string());
                    return Ok(());
                }
                self.open_prompt(PromptKind::AddTitle { board: input }, String::new());
            }
            PromptKind::AddTitle { board } => {
                if input.is_empty() {
                    return Err(StoreError::EmptyTitle);
                }
                self.open_prompt(PromptKind::AddDescription { board, title: input }, String::new());
            }
            PromptKind::AddDescription { board, title } => {
                self.mode = Mode::Normal;
                let status = self.selected_status;
                let task = self
                    .store
                    .create(NewTask::new(title, status, board.clone()).with_description(input))?;
                if self.active_board() != Some(board.as_str()) {
                    self.session.select_board(self.store.storage(), board)?;
                }
                self.refresh()?;
                self.select_task(task.status, task.id);
            }
            PromptKind::EditTitle { id } => {
                if input.is_empty() {
                    return Err(StoreError::EmptyTitle);
                }
                let description = self
                    .store
                    .get(id)?
                    .ok_or(StoreError::TaskNotFound(id))?
                    .description;
                self.open_prompt(PromptKind::EditDescription { id, title: input }, description);
            }
            PromptKind::EditDescription { id, title } => {
                self.mode = Mode::Normal;
                let current = self.store.get(id)?.ok_or(StoreError::TaskNotFound(id))?;
                let edited = Task {
                    title,
                    description: input,
                    ..current
                };
                self.store.replace(id, edited)?;
                self.refresh()?;
            }
        }
        Ok(())
    }

    fn open_prompt(&mut self, kind: PromptKind, input: String) {
        self.mode = Mode::Prompt(Prompt { kind, input });
    }

    fn move_selected(&mut self, step: fn(Status) -> Status) -> StoreResult<()> {
        let Some(task) = self.selected() else {
            return Ok(());
        };
        let (id, target) = (task.id, step(task.status));
        if target == task.status {
            return Ok(());
        }
        self.store.patch(id, TaskPatch::status(target))?;
        self.refresh()?;
        self.select_task(target, id);
        Ok(())
    }

    fn select_task(&mut self, status: Status, id: TaskId) {
        self.selected_status = status;
        self.selected_task = self
            .view
            .column(status)
            .iter()
            .position(|t| t.id == id)
            .unwrap_or(0);
    }

    fn cycle_board(&mut self, step: isize) -> StoreResult<()> {
        if self.boards.is_empty() {
            return Ok(());
        }
        let len = self.boards.len() as isize;
        let current = self
            .active_board()
            .and_then(|active| self.boards.iter().position(|b| b == active))
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        let board = self.boards[next].clone();
        self.session.select_board(self.store.storage(), board)?;
        self.selected_task = 0;
        self.refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::{MemoryStorage, TASKS_KEY};
    use crate::test_support::FrozenClock;
    use crossterm::event::KeyModifiers;
    use rstest::{fixture, rstest};

    type TestApp = App<MemoryStorage, FrozenClock>;

    fn press(app: &mut TestApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_line(app: &mut TestApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    /// Storage that reads normally but refuses every write.
    #[derive(Clone)]
    struct ReadOnlyDisk {
        inner: MemoryStorage,
    }

    impl KeyValueStore for ReadOnlyDisk {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: "board.json".into(),
                source: std::io::Error::other("disk full"),
            })
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.set(key, "")
        }
    }

    fn seeded_store<S: KeyValueStore>(storage: S) -> TaskStore<S, FrozenClock> {
        let store = TaskStore::with_clock(storage, FrozenClock(1_000));
        let drafts = [
            ("Plan", Status::Todo, "Alpha"),
            ("Ship", Status::Doing, "Alpha"),
            ("Rest", Status::Todo, "Beta"),
        ];
        for (title, status, board) in drafts {
            store.create(NewTask::new(title, status, board)).unwrap();
        }
        store
    }

    #[fixture]
    fn app() -> TestApp {
        App::new(seeded_store(MemoryStorage::new())).unwrap()
    }

    #[rstest]
    fn starts_on_first_board(app: TestApp) {
        assert_eq!(app.boards, vec!["Alpha", "Beta"]);
        assert_eq!(app.active_board(), Some("Alpha"));
        assert_eq!(app.selected().map(|t| t.title.as_str()), Some("Plan"));
    }

    #[rstest]
    fn tab_cycles_and_persists_board(mut app: TestApp) {
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_board(), Some("Beta"));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_board(), Some("Alpha"));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_board(), Some("Beta"));

        let reloaded = Session::load(app.store().storage()).unwrap();
        assert_eq!(reloaded.active_board.as_deref(), Some("Beta"));
    }

    #[rstest]
    fn enter_advances_selected_task(mut app: TestApp) {
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected_status, Status::Doing);
        let moved = app.selected().unwrap();
        assert_eq!(moved.title, "Plan");
        assert_eq!(moved.status, Status::Doing);

        press(&mut app, KeyCode::Char('<'));
        assert_eq!(app.selected().unwrap().status, Status::Todo);
    }

    #[rstest]
    fn add_task_through_prompts(mut app: TestApp) {
        press(&mut app, KeyCode::Char('a'));
        type_line(&mut app, "Write tests");
        type_line(&mut app, "cover the app");
        assert_eq!(app.mode, Mode::Normal);

        let created = app.selected().unwrap();
        assert_eq!(created.title, "Write tests");
        assert_eq!(created.description, "cover the app");
        assert_eq!(created.board, "Alpha");
        assert_eq!(created.status, Status::Todo);
    }

    #[rstest]
    fn new_board_becomes_active(mut app: TestApp) {
        press(&mut app, KeyCode::Char('n'));
        type_line(&mut app, "Gamma");
        type_line(&mut app, "First");
        type_line(&mut app, "");
        assert_eq!(app.boards, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(app.active_board(), Some("Gamma"));
    }

    #[rstest]
    fn blank_title_keeps_prompt_open(mut app: TestApp) {
        press(&mut app, KeyCode::Char('a'));
        type_line(&mut app, "  ");
        assert!(matches!(app.mode, Mode::Prompt(_)));
        assert!(app.message.is_some());
    }

    #[rstest]
    fn escape_cancels_without_writing(mut app: TestApp) {
        let before = app.store().storage().raw(TASKS_KEY);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store().storage().raw(TASKS_KEY), before);
    }

    #[rstest]
    fn edit_replaces_title_and_description(mut app: TestApp) {
        press(&mut app, KeyCode::Char('e'));
        for _ in 0.."Plan".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_line(&mut app, "Plan carefully");
        type_line(&mut app, " with notes");

        let edited = app.selected().unwrap();
        assert_eq!(edited.title, "Plan carefully");
        assert_eq!(edited.description, "with notes");
        assert_eq!(app.store().list().unwrap()[0].title, "Plan carefully");
    }

    #[rstest]
    fn deleting_last_task_of_board_drops_board(mut app: TestApp) {
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.boards, vec!["Alpha"]);
        assert_eq!(app.active_board(), Some("Alpha"));
    }

    #[rstest]
    fn sidebar_and_theme_toggle(mut app: TestApp) {
        let sidebar = app.session.show_sidebar;
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.session.show_sidebar, !sidebar);

        let reloaded = Session::load(app.store().storage()).unwrap();
        assert_eq!(reloaded.show_sidebar, app.session.show_sidebar);
        assert_eq!(reloaded.theme, app.session.theme);
    }

    #[rstest]
    fn q_quits(mut app: TestApp) {
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn write_failures_are_reported_and_the_session_continues() {
        let inner = MemoryStorage::new();
        seeded_store(inner.clone());
        let store = TaskStore::with_clock(ReadOnlyDisk { inner }, FrozenClock(2_000));
        let mut app = App::new(store).unwrap();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        app.handle_key(key(KeyCode::Enter));
        let message = app.message.clone().unwrap();
        assert!(message.contains("disk full"), "{message}");
        assert!(!app.should_quit);
        assert_eq!(app.selected().unwrap().title, "Plan");
        assert_eq!(app.selected().unwrap().status, Status::Todo);

        app.handle_key(key(KeyCode::Char('d')));
        assert!(app.message.as_deref().unwrap().contains("disk full"));
        assert_eq!(app.view.column(Status::Todo).len(), 1);

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.message, None);
        assert_eq!(app.selected().unwrap().title, "Ship");
    }
}
