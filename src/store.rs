//! The task store: sole reader and writer of the persisted task collection.
//!
//! Every operation reads the whole `tasks` record, mutates it in memory and
//! writes the whole record back. Boards are not stored; they are derived from
//! the tasks on each call.

use crate::board::board_names;
use crate::error::{StoreError, StoreResult};
use crate::seed;
use crate::storage::{KeyValueStore, LAST_TASK_ID_KEY, SIDEBAR_KEY, TASKS_KEY};
use crate::task::{NewTask, Task, TaskId, TaskPatch};
use mockable::{Clock, DefaultClock};

/// Outcome of reading the `tasks` record.
enum Record {
    Missing,
    Corrupt,
    Tasks(Vec<Task>),
}

#[derive(Debug, Clone)]
pub struct TaskStore<S, C = DefaultClock> {
    storage: S,
    clock: C,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, DefaultClock)
    }
}

impl<S: KeyValueStore, C: Clock> TaskStore<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Seeds the default dataset when no usable collection is persisted.
    /// Returns `true` if seeding happened.
    pub fn initialize(&self) -> StoreResult<bool> {
        match self.read_record()? {
            Record::Tasks(_) => {
                tracing::debug!("task collection already present");
                Ok(false)
            }
            Record::Missing | Record::Corrupt => {
                let tasks = seed::initial_tasks();
                tracing::info!(count = tasks.len(), "seeding default task collection");
                self.save(&tasks)?;
                self.storage.set(SIDEBAR_KEY, "true")?;
                Ok(true)
            }
        }
    }

    /// All persisted tasks in stored order. A missing or corrupt record reads
    /// as an empty collection.
    pub fn list(&self) -> StoreResult<Vec<Task>> {
        match self.read_record()? {
            Record::Tasks(tasks) => Ok(tasks),
            Record::Missing | Record::Corrupt => Ok(Vec::new()),
        }
    }

    pub fn get(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.list()?.into_iter().find(|t| t.id == id))
    }

    pub fn boards(&self) -> StoreResult<Vec<String>> {
        Ok(board_names(&self.list()?))
    }

    pub fn create(&self, input: NewTask) -> StoreResult<Task> {
        validate_title(&input.title)?;
        let mut tasks = self.list()?;
        let id = self.next_id(&tasks)?;
        let task = input.into_task(id);
        tasks.push(task.clone());
        self.save(&tasks)?;
        self.storage.set(LAST_TASK_ID_KEY, &id.to_string())?;
        tracing::debug!(%id, board = %task.board, "created task");
        Ok(task)
    }

    /// Merges `patch` into the task with `id`. A missing id leaves the
    /// persisted record untouched and returns the current collection, even
    /// when the patch itself would be invalid.
    pub fn patch(&self, id: TaskId, patch: TaskPatch) -> StoreResult<Vec<Task>> {
        let mut tasks = self.list()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(%id, "patch on unknown task ignored");
            return Ok(tasks);
        };
        if patch.is_empty() {
            return Ok(tasks);
        }
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        patch.apply(task);
        self.save(&tasks)?;
        tracing::debug!(%id, "patched task");
        Ok(tasks)
    }

    /// Replaces the task with `id` wholesale, keeping its position.
    ///
    /// # Errors
    ///
    /// [`StoreError::TaskNotFound`] when no task has `id`; nothing is written.
    /// [`StoreError::IdMismatch`] when `task.id` differs from `id`.
    pub fn replace(&self, id: TaskId, task: Task) -> StoreResult<Vec<Task>> {
        if task.id != id {
            return Err(StoreError::IdMismatch {
                target: id,
                body: task.id,
            });
        }
        validate_title(&task.title)?;
        let mut tasks = self.list()?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        *slot = task;
        self.save(&tasks)?;
        tracing::debug!(%id, "replaced task");
        Ok(tasks)
    }

    pub fn delete(&self, id: TaskId) -> StoreResult<Vec<Task>> {
        let mut tasks = self.list()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            tracing::debug!(%id, "delete on unknown task ignored");
            return Ok(tasks);
        }
        self.save(&tasks)?;
        tracing::debug!(%id, "deleted task");
        Ok(tasks)
    }

    fn read_record(&self) -> StoreResult<Record> {
        let Some(data) = self.storage.get(TASKS_KEY)? else {
            return Ok(Record::Missing);
        };
        match serde_json::from_str(&data) {
            Ok(tasks) => Ok(Record::Tasks(tasks)),
            Err(err) => {
                tracing::warn!(error = %err, "persisted task record is malformed");
                Ok(Record::Corrupt)
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        let data = serde_json::to_string(tasks)?;
        self.storage.set(TASKS_KEY, &data)?;
        Ok(())
    }

    /// Clock milliseconds, bumped past every id already issued or stored.
    ///
    /// # Errors
    ///
    /// [`StoreError::IdSpaceExhausted`] once an id of `u64::MAX` has been
    /// issued or stored.
    fn next_id(&self, tasks: &[Task]) -> StoreResult<TaskId> {
        let last_issued = match self.storage.get(LAST_TASK_ID_KEY)? {
            Some(raw) => raw.trim().parse::<u64>().ok().or_else(|| {
                tracing::warn!(value = %raw, "ignoring malformed id sequence");
                None
            }),
            None => None,
        };
        let floor = match tasks.iter().map(|t| t.id.value()).chain(last_issued).max() {
            Some(max) => max.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?,
            None => 0,
        };
        let now = u64::try_from(self.clock.utc().timestamp_millis()).unwrap_or(0);
        Ok(TaskId::new(now.max(floor)))
    }
}

fn validate_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::EmptyTitle);
    }
    Ok(())
}
