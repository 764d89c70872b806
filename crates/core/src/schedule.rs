//! Schedule module - deferred session tasks
//!
//! The clear sweep and the tray refill run a fixed delay after the commit
//! that triggered them. Timers are advanced by the fixed-timestep tick, and
//! the owning session cancels everything on restart so a stale sweep can
//! never touch a fresh board.

use arrayvec::ArrayVec;

/// Kinds of deferred work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Empty every cell flagged clearing
    ClearSweep,
    /// Deal a fresh tray into an empty one
    TrayRefill,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::ClearSweep => "clear_sweep",
            TaskKind::TrayRefill => "tray_refill",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledTask {
    kind: TaskKind,
    remaining_ms: u32,
}

/// Pending tasks, at most one per kind
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    tasks: ArrayVec<ScheduledTask, 2>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire after `delay_ms`.
    ///
    /// If a task of that kind is already pending it keeps its deadline and
    /// this returns false. A pending sweep empties every flagged cell when it
    /// fires, so it also covers lines flagged after it was scheduled.
    pub fn schedule(&mut self, kind: TaskKind, delay_ms: u32) -> bool {
        if self.is_pending(kind) {
            return false;
        }
        self.tasks.push(ScheduledTask {
            kind,
            remaining_ms: delay_ms,
        });
        true
    }

    /// Drop every pending task; returns how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let n = self.tasks.len();
        self.tasks.clear();
        n
    }

    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    pub fn remaining_ms(&self, kind: TaskKind) -> Option<u32> {
        self.tasks
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.remaining_ms)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance every timer by `elapsed_ms` and return the tasks that came
    /// due, earliest deadline first.
    pub fn advance(&mut self, elapsed_ms: u32) -> ArrayVec<TaskKind, 2> {
        let mut due: ArrayVec<ScheduledTask, 2> = ArrayVec::new();
        self.tasks.retain(|task| {
            if task.remaining_ms <= elapsed_ms {
                due.push(*task);
                false
            } else {
                task.remaining_ms -= elapsed_ms;
                true
            }
        });
        due.sort_by_key(|t| t.remaining_ms);
        due.into_iter().map(|t| t.kind).collect()
    }
}
