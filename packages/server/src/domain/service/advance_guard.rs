//! Re-entrancy guard for the playback-advance transition.

use std::sync::atomic::{AtomicBool, Ordering};

/// Marks a room's "advance to next video" transition as in progress.
///
/// Only one [`AdvanceToken`] can exist at a time; the guard is released when
/// the token is dropped.
#[derive(Debug, Default)]
pub struct AdvanceGuard {
    in_progress: AtomicBool,
}

/// Proof that the holder owns the advance transition
#[derive(Debug)]
pub struct AdvanceToken<'a> {
    guard: &'a AdvanceGuard,
}

impl AdvanceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to enter the transition. `None` if another holder is inside.
    pub fn try_begin(&self) -> Option<AdvanceToken<'_>> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| AdvanceToken { guard: self })
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }
}

impl Drop for AdvanceToken<'_> {
    fn drop(&mut self) {
        self.guard.in_progress.store(false, Ordering::Release);
    }
}
