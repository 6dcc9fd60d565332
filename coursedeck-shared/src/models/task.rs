/// Todo board model
///
/// The board is an ordered list of tasks partitioned into three lanes by
/// status. A lane's order is the collection order filtered by that status;
/// positions inside a lane are never stored.
///
/// # Lanes
///
/// ```text
/// todo → doing → done
/// ```
///
/// # Operations
///
/// - Move forward/backward: one step along the lane sequence. Forward at
///   `done` and backward at `todo` leave the task untouched.
/// - Drop: relocate the task at a source (lane, index) into a destination
///   lane. A missing destination or an identical source/destination is a
///   no-op.
/// - Delete: remove a task by id.
///
/// Every mutation that changes a task stamps `updated_at` with a value
/// strictly greater than the previous one.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use coursedeck_shared::models::task::{BoardOutcome, Lane, LanePosition, TaskBoard};
///
/// let mut board = TaskBoard::new();
/// let task = board.add("Write notes", Lane::Todo, Utc::now()).unwrap();
///
/// let outcome = board
///     .relocate(
///         LanePosition::new(Lane::Todo, 0),
///         Some(LanePosition::new(Lane::Doing, 0)),
///         Utc::now(),
///     )
///     .unwrap();
///
/// assert!(matches!(outcome, BoardOutcome::Moved(t) if t.id == task.id && t.status == Lane::Doing));
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board lane (task status)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    /// Not started
    Todo,

    /// In progress
    Doing,

    /// Finished
    Done,
}

impl Lane {
    /// All lanes in board order
    pub const ALL: [Lane; 3] = [Lane::Todo, Lane::Doing, Lane::Done];

    /// Lane name as shown on the board
    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Todo => "todo",
            Lane::Doing => "doing",
            Lane::Done => "done",
        }
    }

    /// The lane one step forward, if any
    pub fn forward(&self) -> Option<Lane> {
        match self {
            Lane::Todo => Some(Lane::Doing),
            Lane::Doing => Some(Lane::Done),
            Lane::Done => None,
        }
    }

    /// The lane one step backward, if any
    pub fn backward(&self) -> Option<Lane> {
        match self {
            Lane::Todo => None,
            Lane::Doing => Some(Lane::Todo),
            Lane::Done => Some(Lane::Doing),
        }
    }

    /// Maps the todo API vocabulary (`todo|progress|completed`) onto a lane
    pub fn from_wire_status(status: &str) -> Option<Lane> {
        match status {
            "todo" => Some(Lane::Todo),
            "progress" => Some(Lane::Doing),
            "completed" => Some(Lane::Done),
            _ => None,
        }
    }

    /// The todo API vocabulary for this lane
    pub fn wire_status(&self) -> &'static str {
        match self {
            Lane::Todo => "todo",
            Lane::Doing => "progress",
            Lane::Done => "completed",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lane {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Lane::Todo),
            "doing" => Ok(Lane::Doing),
            "done" => Ok(Lane::Done),
            other => Err(BoardError::UnknownLane(other.to_string())),
        }
    }
}

/// A todo task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Task text
    pub text: String,

    /// Current lane
    pub status: Lane,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last changed
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Stamps `updated_at`, never moving it backwards or leaving it equal
    fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at + Duration::microseconds(1);
        self.updated_at = now.max(floor);
    }
}

/// A slot on the board: a lane and an index within that lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanePosition {
    /// Lane
    pub lane: Lane,

    /// Zero-based index within the lane
    pub index: usize,
}

impl LanePosition {
    /// Creates a lane position
    pub fn new(lane: Lane, index: usize) -> Self {
        Self { lane, index }
    }
}

/// Board errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// No task with this id
    #[error("Task {0} not found")]
    TaskNotFound(i64),

    /// The source slot of a drop does not hold a task
    #[error("No task at {lane} index {index}")]
    NoTaskAt {
        /// Lane
        lane: Lane,
        /// Index within the lane
        index: usize,
    },

    /// Task text is blank
    #[error("Task text must not be empty")]
    EmptyText,

    /// Lane name not recognised
    #[error("Unknown lane: {0}")]
    UnknownLane(String),
}

/// Result of a board mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardOutcome {
    /// A task was created
    Added(Task),

    /// A task changed (lane or text) and was stamped
    Moved(Task),

    /// Nothing changed
    Unchanged,

    /// A task was removed
    Removed(Task),
}

impl BoardOutcome {
    /// Whether the board changed
    pub fn is_changed(&self) -> bool {
        !matches!(self, BoardOutcome::Unchanged)
    }
}

/// Board actions, dispatched through [`TaskBoard::apply`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardAction {
    /// Create a task
    Add {
        /// Task text
        text: String,
        /// Initial lane
        status: Lane,
    },

    /// Advance a task by one lane
    MoveForward {
        /// Task ID
        id: i64,
    },

    /// Retreat a task by one lane
    MoveBackward {
        /// Task ID
        id: i64,
    },

    /// Drag-and-drop relocation
    Drop {
        /// Where the drag started
        source: LanePosition,
        /// Where it was released (absent when dropped outside the board)
        destination: Option<LanePosition>,
    },

    /// Remove a task
    Delete {
        /// Task ID
        id: i64,
    },
}

/// Tasks grouped by lane, in board order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLanes {
    /// Lane `todo`
    pub todo: Vec<Task>,

    /// Lane `doing`
    pub doing: Vec<Task>,

    /// Lane `done`
    pub done: Vec<Task>,
}

/// Ordered task collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    next_id: i64,
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl TaskBoard {
    /// Creates an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks in board order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Finds a task by ID
    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in one lane, in board order
    pub fn lane(&self, lane: Lane) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == lane)
    }

    /// Tasks grouped by lane
    pub fn lanes(&self) -> BoardLanes {
        BoardLanes {
            todo: self.lane(Lane::Todo).cloned().collect(),
            doing: self.lane(Lane::Doing).cloned().collect(),
            done: self.lane(Lane::Done).cloned().collect(),
        }
    }

    /// Appends a new task
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyText`] if `text` is blank.
    pub fn add(&mut self, text: &str, status: Lane, now: DateTime<Utc>) -> Result<Task, BoardError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::EmptyText);
        }

        let task = Task {
            id: self.next_id,
            text: text.to_string(),
            status,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.tasks.push(task.clone());

        tracing::debug!(task_id = task.id, status = %status, "Task added to board");
        Ok(task)
    }

    /// Advances a task one lane (`todo → doing → done`)
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] for an unknown id.
    pub fn move_forward(&mut self, id: i64, now: DateTime<Utc>) -> Result<BoardOutcome, BoardError> {
        self.step(id, now, |lane| lane.forward())
    }

    /// Retreats a task one lane (`done → doing → todo`)
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] for an unknown id.
    pub fn move_backward(&mut self, id: i64, now: DateTime<Utc>) -> Result<BoardOutcome, BoardError> {
        self.step(id, now, |lane| lane.backward())
    }

    fn step(
        &mut self,
        id: i64,
        now: DateTime<Utc>,
        target: impl Fn(Lane) -> Option<Lane>,
    ) -> Result<BoardOutcome, BoardError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(BoardError::TaskNotFound(id))?;

        match target(task.status) {
            Some(lane) => {
                task.status = lane;
                task.touch(now);
                Ok(BoardOutcome::Moved(task.clone()))
            }
            None => Ok(BoardOutcome::Unchanged),
        }
    }

    /// Drag-and-drop relocation
    ///
    /// Only lane membership changes: the dragged task takes the destination
    /// lane's status and is stamped, but its position in the collection stays
    /// where it was.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoTaskAt`] if the source slot is empty. A missing
    /// destination or an identical source/destination returns
    /// [`BoardOutcome::Unchanged`] without resolving the source.
    pub fn relocate(
        &mut self,
        source: LanePosition,
        destination: Option<LanePosition>,
        now: DateTime<Utc>,
    ) -> Result<BoardOutcome, BoardError> {
        let Some(destination) = destination else {
            return Ok(BoardOutcome::Unchanged);
        };
        if source == destination {
            return Ok(BoardOutcome::Unchanged);
        }

        let task = self
            .tasks
            .iter_mut()
            .filter(|t| t.status == source.lane)
            .nth(source.index)
            .ok_or(BoardError::NoTaskAt {
                lane: source.lane,
                index: source.index,
            })?;

        task.status = destination.lane;
        task.touch(now);
        Ok(BoardOutcome::Moved(task.clone()))
    }

    /// Updates text and/or lane of a task
    ///
    /// Supplying neither, or values equal to the current ones, is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] for an unknown id and
    /// [`BoardError::EmptyText`] for blank text.
    pub fn update(
        &mut self,
        id: i64,
        text: Option<&str>,
        status: Option<Lane>,
        now: DateTime<Utc>,
    ) -> Result<BoardOutcome, BoardError> {
        let text = match text.map(str::trim) {
            Some("") => return Err(BoardError::EmptyText),
            other => other,
        };

        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(BoardError::TaskNotFound(id))?;

        let mut changed = false;
        if let Some(text) = text {
            if task.text != text {
                task.text = text.to_string();
                changed = true;
            }
        }
        if let Some(status) = status {
            if task.status != status {
                task.status = status;
                changed = true;
            }
        }

        if changed {
            task.touch(now);
            Ok(BoardOutcome::Moved(task.clone()))
        } else {
            Ok(BoardOutcome::Unchanged)
        }
    }

    /// Removes a task by ID
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] for an unknown id; the board is
    /// left unchanged.
    pub fn delete(&mut self, id: i64) -> Result<BoardOutcome, BoardError> {
        let position = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(BoardError::TaskNotFound(id))?;

        Ok(BoardOutcome::Removed(self.tasks.remove(position)))
    }

    /// Applies one action to the board
    pub fn apply(&mut self, action: BoardAction, now: DateTime<Utc>) -> Result<BoardOutcome, BoardError> {
        match action {
            BoardAction::Add { text, status } => self.add(&text, status, now).map(BoardOutcome::Added),
            BoardAction::MoveForward { id } => self.move_forward(id, now),
            BoardAction::MoveBackward { id } => self.move_backward(id, now),
            BoardAction::Drop {
                source,
                destination,
            } => self.relocate(source, destination, now),
            BoardAction::Delete { id } => self.delete(id),
        }
    }
}
