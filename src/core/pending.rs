// src/core/pending.rs
//! Non-reentrant latch for collaborator calls. While a guard is alive, another
//! attempt on the same flag is rejected instead of queued.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::app_log;
use crate::error::{DashboardError, DashboardResult};

#[derive(Debug)]
pub struct PendingFlag {
    name: &'static str,
    busy: AtomicBool,
}

impl PendingFlag {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            busy: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_pending(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Takes the latch, or fails with `Busy` if a call is already in flight.
    pub fn try_begin(&self) -> DashboardResult<PendingGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| PendingGuard { flag: self })
            .map_err(|_| {
                app_log!(debug, "Rejected re-entrant {} while one is in flight", self.name);
                DashboardError::Busy(self.name)
            })
    }
}

/// Releases the flag on drop, on success, failure and cancellation alike.
#[derive(Debug)]
pub struct PendingGuard<'a> {
    flag: &'a PendingFlag,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_second_begin_is_rejected() {
        let flag = PendingFlag::new("save");
        let guard = flag.try_begin().unwrap();
        assert!(flag.is_pending());

        let err = flag.try_begin().unwrap_err();
        assert_eq!(err, DashboardError::Busy("save"));

        drop(guard);
        assert!(!flag.is_pending());
        assert!(flag.try_begin().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_released_when_task_is_cancelled() {
        let flag = Arc::new(PendingFlag::new("submit"));

        let task = {
            let flag = Arc::clone(&flag);
            tokio::spawn(async move {
                let _guard = flag.try_begin().unwrap();
                tokio::time::sleep(Duration::from_secs(60)).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(flag.is_pending());

        task.abort();
        let _ = task.await;
        assert!(!flag.is_pending());
    }

    #[tokio::test]
    async fn test_concurrent_attempts_admit_one() {
        let flag = Arc::new(PendingFlag::new("upgrade"));
        let mut handles = Vec::new();
        let barrier = Arc::new(tokio::sync::Barrier::new(8));

        for _ in 0..8 {
            let flag = Arc::clone(&flag);
            let barrier = Arc::clone(&barrier);
            handles.push(tokio::spawn(async move {
                let guard = flag.try_begin();
                let admitted = guard.is_ok();
                barrier.wait().await;
                admitted
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
    }
}
