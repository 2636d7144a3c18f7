//! Deferred Actions
//!
//! Short fixed-delay actions scheduled by the reading session. Each is
//! tagged with the session generation that scheduled it; the session
//! discards actions whose generation is no longer current.

use std::time::Instant;

/// Scheduled task handle
pub type TaskId = u64;

/// What to do when a task comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Move focus into the freshly mounted modal
    InitialFocus,
    /// Start reading the open article aloud
    AutoRead,
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    id: TaskId,
    due: Instant,
    generation: u64,
    action: DeferredAction,
}

/// Due task handed back to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTask {
    pub id: TaskId,
    pub generation: u64,
    pub action: DeferredAction,
}

/// Cancellable timer queue
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: Vec<ScheduledTask>,
    next_id: TaskId,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, action: DeferredAction, generation: u64, due: Instant) -> TaskId {
        self.next_id += 1;
        let id = self.next_id;
        self.tasks.push(ScheduledTask { id, due, generation, action });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Drop every task scheduled by `generation`
    pub fn cancel_generation(&mut self, generation: u64) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.generation != generation);
        before - self.tasks.len()
    }

    /// Remove and return the pending `action` of `generation`, if any
    pub fn take(&mut self, action: DeferredAction, generation: u64) -> Option<DueTask> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.action == action && t.generation == generation)?;
        let task = self.tasks.remove(pos);
        Some(DueTask { id: task.id, generation: task.generation, action: task.action })
    }

    /// Remove tasks due at `now`, earliest first (ties in scheduling order)
    pub fn take_due(&mut self, now: Instant) -> Vec<DueTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self.tasks.drain(..).partition(|t| t.due <= now);
        self.tasks = pending;
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.id.cmp(&b.id)));
        due.into_iter()
            .map(|t| DueTask { id: t.id, generation: t.generation, action: t.action })
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|t| t.due).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
