use crate::runtime::event::AppEvent;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub enum SchedulerCommand {
    /// Emits `event` after `delay`; a newer command with the same key
    /// supersedes any pending one.
    Debounce {
        key: String,
        delay: Duration,
        event: AppEvent,
    },
}

#[derive(Debug, Clone)]
struct DelayedTask {
    due_at: Instant,
    key: String,
    version: u64,
    event: AppEvent,
}

#[derive(Default)]
pub struct Scheduler {
    delayed: Vec<DelayedTask>,
    key_versions: HashMap<String, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand, now: Instant) {
        match command {
            SchedulerCommand::Debounce { key, delay, event } => {
                let version = self.bump_version(&key);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    key,
                    version,
                    event,
                });
            }
        }
    }

    pub fn drain_ready(&mut self, now: Instant) -> Vec<AppEvent> {
        let mut ready = Vec::new();
        let mut idx = 0usize;
        while idx < self.delayed.len() {
            if self.delayed[idx].due_at <= now {
                let task = self.delayed.swap_remove(idx);
                if self.is_current(&task) {
                    ready.push(task.event);
                }
            } else {
                idx += 1;
            }
        }
        ready
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        let mut next = default_timeout;

        for task in &self.delayed {
            let due_in = task.due_at.saturating_duration_since(now);
            if due_in < next {
                next = due_in;
            }
        }

        next
    }

    pub fn has_pending(&self) -> bool {
        !self.delayed.is_empty()
    }

    fn is_current(&self, task: &DelayedTask) -> bool {
        self.key_versions.get(&task.key).copied().unwrap_or(0) == task.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}
