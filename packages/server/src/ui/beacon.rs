//! Periodic clock beacon.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::usecase::ClockSyncUseCase;

/// Broadcast the server time to the room every `period` until aborted.
///
/// The first tick fires one `period` after spawning. Ticks missed while the
/// room lock was busy are skipped, not replayed.
pub fn spawn_clock_beacon(clock_sync: Arc<ClockSyncUseCase>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::debug!("Clock beacon started ({:?})", period);
        loop {
            interval.tick().await;
            clock_sync.beacon().await;
        }
    })
}
