use std::{future::Future, sync::Mutex};

use tokio::task::JoinHandle;

/// Slot holding at most one background task.
///
/// Arming the slot aborts whatever task it held before, so two tasks of the
/// same kind never run side by side. The task is aborted when the slot is
/// dropped. A task that ran to completion leaves the slot idle.
#[derive(Debug, Default)]
pub struct TimerSlot {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TimerSlot {
    /// Create an idle slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` into the slot, aborting the previous occupant first.
    pub fn arm<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(mut slot) = self.handle.lock() else {
            return;
        };

        if let Some(previous) = slot.take() {
            previous.abort();
        }

        *slot = Some(tokio::spawn(task));
    }

    /// Abort the held task, if any.
    ///
    /// Returns true when a task was still running.
    pub fn cancel(&self) -> bool {
        let Ok(mut slot) = self.handle.lock() else {
            return false;
        };

        match slot.take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }

    /// Whether the slot holds a task that has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.handle
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        if let Ok(slot) = self.handle.get_mut() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn rearming_aborts_previous_task() {
        let slot = TimerSlot::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let fired = Arc::clone(&fired);
            slot.arm(async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                fired.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!slot.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_pending_task() {
        let slot = TimerSlot::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        slot.arm(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(slot.is_pending());
        assert!(slot.cancel());
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!slot.cancel());
    }
}
