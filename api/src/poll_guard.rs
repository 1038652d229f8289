//! Keeps interval polls from overlapping.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Shared in-flight flag for one polling loop. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct PollGuard {
    busy: Arc<AtomicBool>,
    name: &'static str,
}

impl PollGuard {
    pub fn new(name: &'static str) -> Self {
        Self {
            busy: Arc::default(),
            name,
        }
    }

    /// Starts a poll unless the previous one is still running. The guard is
    /// released when the returned permit is dropped.
    pub fn try_begin(&self) -> Option<PollPermit> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(PollPermit {
                busy: self.busy.clone(),
            })
        } else {
            dioxus_logger::tracing::debug!("{} poll still running, skipping tick", self.name);
            None
        }
    }
}

#[derive(Debug)]
pub struct PollPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for PollPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_poll_is_skipped() {
        let guard = PollGuard::new("status");
        let permit = guard.try_begin();
        assert!(permit.is_some());
        assert!(guard.clone().try_begin().is_none());

        drop(permit);
        assert!(guard.try_begin().is_some());
    }
}
