/// Pomodoro timer model
///
/// A timer cycles between focus and break phases. After
/// `rounds_before_long_break` focus rounds the next break is a long one, which
/// also resets the round counter.
///
/// # Phase Cycle
///
/// ```text
/// focus → short_break → focus → ... → focus → long_break → focus
/// ```

use crate::{error::StoreError, store::Store};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pomodoro phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Working
    Focus,

    /// Short rest between focus rounds
    ShortBreak,

    /// Long rest after a full set of rounds
    LongBreak,
}

impl Phase {
    /// Converts phase to its wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::ShortBreak => "short_break",
            Phase::LongBreak => "long_break",
        }
    }
}

/// Pomodoro timer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pomodoro {
    /// Unique timer ID
    pub id: i64,

    /// Display label
    pub label: String,

    /// Focus phase length in minutes
    pub focus_minutes: u32,

    /// Short break length in minutes
    pub short_break_minutes: u32,

    /// Long break length in minutes
    pub long_break_minutes: u32,

    /// Focus rounds before a long break
    pub rounds_before_long_break: u32,

    /// Current phase
    pub phase: Phase,

    /// Focus rounds completed since the last long break
    pub completed_rounds: u32,

    /// When the timer was created
    pub created_at: DateTime<Utc>,

    /// When the timer was last changed
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePomodoro {
    /// Display label
    pub label: String,

    /// Focus phase length in minutes
    pub focus_minutes: u32,

    /// Short break length in minutes
    pub short_break_minutes: u32,

    /// Long break length in minutes
    pub long_break_minutes: u32,

    /// Focus rounds before a long break
    pub rounds_before_long_break: u32,
}

impl Pomodoro {
    /// Length of the current phase in minutes
    pub fn phase_minutes(&self) -> u32 {
        match self.phase {
            Phase::Focus => self.focus_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
        }
    }

    /// Moves to the next phase
    pub fn advance(&mut self, now: DateTime<Utc>) {
        self.phase = match self.phase {
            Phase::Focus => {
                self.completed_rounds += 1;
                if self.completed_rounds >= self.rounds_before_long_break {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak => Phase::Focus,
            Phase::LongBreak => {
                self.completed_rounds = 0;
                Phase::Focus
            }
        };
        self.updated_at = now;
    }

    /// Returns to focus with no completed rounds
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.phase = Phase::Focus;
        self.completed_rounds = 0;
        self.updated_at = now;
    }

    /// Creates a timer in the focus phase
    pub fn create(store: &mut Store, data: CreatePomodoro, now: DateTime<Utc>) -> Self {
        store.pomodoros.insert_with(|id| Pomodoro {
            id,
            label: data.label.trim().to_string(),
            focus_minutes: data.focus_minutes,
            short_break_minutes: data.short_break_minutes,
            long_break_minutes: data.long_break_minutes,
            rounds_before_long_break: data.rounds_before_long_break,
            phase: Phase::Focus,
            completed_rounds: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Finds a timer by ID
    pub fn find_by_id(store: &Store, id: i64) -> Option<Self> {
        store.pomodoros.get(id).cloned()
    }

    /// Lists all timers
    pub fn list(store: &Store) -> Vec<Self> {
        store.pomodoros.list()
    }

    /// Advances a stored timer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no timer has this id.
    pub fn advance_by_id(store: &mut Store, id: i64, now: DateTime<Utc>) -> Result<Self, StoreError> {
        let timer = store
            .pomodoros
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("pomodoro", id))?;
        timer.advance(now);
        Ok(timer.clone())
    }

    /// Resets a stored timer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no timer has this id.
    pub fn reset_by_id(store: &mut Store, id: i64, now: DateTime<Utc>) -> Result<Self, StoreError> {
        let timer = store
            .pomodoros
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("pomodoro", id))?;
        timer.reset(now);
        Ok(timer.clone())
    }

    /// Deletes a timer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no timer has this id.
    pub fn delete(store: &mut Store, id: i64) -> Result<Self, StoreError> {
        store
            .pomodoros
            .remove(id)
            .ok_or_else(|| StoreError::not_found("pomodoro", id))
    }
}
