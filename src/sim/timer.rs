//! Scheduled tasks
//!
//! The scene never sleeps; it asks the scheduler for one-shot or repeating
//! tasks and drains the ones that came due every update. Clearing the
//! scheduler drops every pending task, which is how a restart cancels a
//! countdown that has not finished yet.

use std::time::Duration;

/// Work the play scene defers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Start a fresh run after game over
    Restart,
    /// One step of the resume countdown
    CountdownStep,
}

/// Handle returned by `schedule_*`, used to cancel a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Scheduled {
    id: TaskId,
    task: Task,
    due: Duration,
    /// Re-arm interval for repeating tasks
    repeat: Option<Duration>,
}

/// Time-ordered task list driven by the scene's update delta
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    tasks: Vec<Scheduled>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_once(&mut self, delay: Duration, task: Task) -> TaskId {
        self.push(delay, task, None)
    }

    /// # Panics
    ///
    /// On a zero interval (it would fire forever within one update).
    pub fn schedule_repeating(&mut self, interval: Duration, task: Task) -> TaskId {
        assert!(!interval.is_zero(), "repeating task {task:?} needs a non-zero interval");
        self.push(interval, task, Some(interval))
    }

    fn push(&mut self, delay: Duration, task: Task, repeat: Option<Duration>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Scheduled {
            id,
            task,
            due: self.now + delay,
            repeat,
        });
        id
    }

    /// Remove a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Advance the clock and return the tasks that came due, oldest first.
    ///
    /// A repeating task whose interval fits several times into `dt` fires
    /// once per elapsed interval.
    pub fn advance(&mut self, dt: Duration) -> Vec<(TaskId, Task)> {
        self.now += dt;

        let mut fired: Vec<(Duration, TaskId, Task)> = Vec::new();
        let now = self.now;
        self.tasks.retain_mut(|t| {
            while t.due <= now {
                fired.push((t.due, t.id, t.task));
                match t.repeat {
                    Some(interval) => t.due += interval,
                    None => return false,
                }
            }
            true
        });

        // Ties fire in schedule order
        fired.sort_by_key(|(due, id, _)| (*due, id.0));
        fired.into_iter().map(|(_, id, task)| (id, task)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = Scheduler::new();
        let id = timers.schedule_once(ms(1000), Task::Restart);

        assert!(timers.advance(ms(999)).is_empty());
        assert_eq!(timers.advance(ms(1)), vec![(id, Task::Restart)]);
        assert!(timers.advance(ms(5000)).is_empty());
        assert!(!timers.is_pending(id));
    }

    #[test]
    fn test_repeating_rearms() {
        let mut timers = Scheduler::new();
        let id = timers.schedule_repeating(ms(1000), Task::CountdownStep);

        assert_eq!(timers.advance(ms(1000)).len(), 1);
        assert_eq!(timers.advance(ms(500)).len(), 0);
        assert_eq!(timers.advance(ms(500)).len(), 1);
        // A long frame catches up on every missed step
        assert_eq!(timers.advance(ms(3000)).len(), 3);
        assert!(timers.cancel(id));
        assert!(timers.advance(ms(5000)).is_empty());
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut timers = Scheduler::new();
        timers.schedule_once(ms(10), Task::Restart);
        timers.schedule_repeating(ms(10), Task::CountdownStep);
        assert_eq!(timers.pending(), 2);

        timers.clear();
        assert_eq!(timers.pending(), 0);
        assert!(timers.advance(ms(100)).is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut timers = Scheduler::new();
        let late = timers.schedule_once(ms(30), Task::Restart);
        let early = timers.schedule_once(ms(10), Task::CountdownStep);
        let fired = timers.advance(ms(50));
        assert_eq!(fired, vec![(early, Task::CountdownStep), (late, Task::Restart)]);
        assert_eq!(timers.now(), ms(50));
    }
}
