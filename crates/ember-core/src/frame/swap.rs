// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The double-buffered exchange between the logic and render threads.
//!
//! The swap context is the only shared mutable state between the two threads.
//! The logic side composes full snapshots outside any contended lock (the
//! master map is only ever touched from the logic thread), and the exchange
//! slot's mutex is held just long enough to move an `Arc` in or out — neither
//! thread ever blocks on the other's per-object work.

use super::{FrameSnapshot, GameObjectDesc, SnapshotDelta};
use ahash::{AHashMap, AHashSet};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Raised when the render side acquires before any new publish has landed.
///
/// This is an internal signal, not a rendering failure:
/// [`FrameSwapContext::acquire_for_render`] maps it to re-serving the previous
/// snapshot (empty before the first publish).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleSnapshotError {
    /// The tick of the most recently consumed snapshot.
    pub last_tick: u64,
}

impl fmt::Display for StaleSnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No snapshot published since tick {}; frame is stale",
            self.last_tick
        )
    }
}

impl std::error::Error for StaleSnapshotError {}

/// The snapshot handed to the render side for one frame.
#[derive(Debug, Clone)]
pub struct FrameView {
    /// The snapshot to draw from.
    pub snapshot: Arc<FrameSnapshot>,
    /// `true` when this is a newly published snapshot; `false` when the
    /// logic thread has not published since the last acquire and the
    /// previous snapshot is being re-served. Removal sets should only be
    /// acted on when fresh.
    pub fresh: bool,
}

/// Logic-side accumulation state. Guarded by its own mutex so the context is
/// `Sync`, but only the logic thread ever takes it — it never contends.
struct MasterState {
    objects: AHashMap<super::GameObjectId, Arc<GameObjectDesc>>,
    /// Removals not yet seen by the render side. Accumulates while publishes
    /// coalesce, resets once a snapshot is consumed.
    pending_removed: AHashSet<super::GameObjectId>,
    tick: u64,
}

/// The exchange slot both threads touch. Its lock protects pointer moves
/// only; snapshot contents are immutable once placed here.
struct ExchangeSlot {
    /// The most recently published, not-yet-consumed snapshot.
    ready: Option<Arc<FrameSnapshot>>,
    /// What the render side saw last, re-served on stale acquires.
    last_served: Arc<FrameSnapshot>,
}

/// The double-buffered channel transporting completed descriptor sets from
/// the logic thread to the render thread.
///
/// `publish` is called once per logic tick from the logic thread;
/// `acquire_for_render` once per render tick from the render thread. If the
/// render thread lags, unconsumed publishes coalesce — later writes for the
/// same object id overwrite earlier ones (latest-wins), and no queue forms.
pub struct FrameSwapContext {
    master: Mutex<MasterState>,
    slot: Mutex<ExchangeSlot>,
}

impl FrameSwapContext {
    /// Creates a context with an empty initial snapshot.
    pub fn new() -> Self {
        Self {
            master: Mutex::new(MasterState {
                objects: AHashMap::new(),
                pending_removed: AHashSet::new(),
                tick: 0,
            }),
            slot: Mutex::new(ExchangeSlot {
                ready: None,
                last_served: Arc::new(FrameSnapshot::default()),
            }),
        }
    }

    /// Merges a tick's change set and publishes the resulting snapshot.
    ///
    /// Latest-wins per object id; removal is applied to the master map and
    /// recorded for the render side. An empty delta changes nothing but
    /// still advances the tick counter. The exchange lock is held only for
    /// the slot assignment, never during the merge.
    pub fn publish(&self, delta: SnapshotDelta) {
        // Removals already delivered in a consumed snapshot must not be
        // re-announced; check consumption state before merging.
        let previous_consumed = self.slot.lock().unwrap().ready.is_none();

        let snapshot = {
            let mut master = self.master.lock().unwrap();
            if previous_consumed {
                master.pending_removed.clear();
            }

            for desc in delta.updated {
                // A re-added object cancels its own pending removal.
                master.pending_removed.remove(&desc.id);
                master.objects.insert(desc.id, Arc::new(desc));
            }
            for id in delta.removed {
                master.objects.remove(&id);
                master.pending_removed.insert(id);
            }

            master.tick += 1;
            Arc::new(FrameSnapshot {
                objects: master.objects.clone(),
                removed: master.pending_removed.clone(),
                tick: master.tick,
            })
        };

        let replaced = self.slot.lock().unwrap().ready.replace(snapshot);
        if let Some(previous) = replaced {
            log::trace!(
                "Snapshot for tick {} coalesced before consumption",
                previous.tick
            );
        }
    }

    /// Takes the most recently published snapshot, or reports staleness.
    ///
    /// Consuming marks the snapshot as delivered; a second call before the
    /// next publish fails with [`StaleSnapshotError`].
    pub fn try_acquire(&self) -> Result<Arc<FrameSnapshot>, StaleSnapshotError> {
        let mut slot = self.slot.lock().unwrap();
        match slot.ready.take() {
            Some(snapshot) => {
                slot.last_served = snapshot.clone();
                Ok(snapshot)
            }
            None => Err(StaleSnapshotError {
                last_tick: slot.last_served.tick,
            }),
        }
    }

    /// Acquires a snapshot for this render frame, never failing.
    ///
    /// When nothing new was published the previous snapshot is re-served
    /// with `fresh == false` (an empty snapshot before the first publish).
    pub fn acquire_for_render(&self) -> FrameView {
        match self.try_acquire() {
            Ok(snapshot) => FrameView {
                snapshot,
                fresh: true,
            },
            Err(_) => FrameView {
                snapshot: self.slot.lock().unwrap().last_served.clone(),
                fresh: false,
            },
        }
    }

    /// The number of publishes so far.
    pub fn publish_tick(&self) -> u64 {
        self.master.lock().unwrap().tick
    }
}

impl Default for FrameSwapContext {
    fn default() -> Self {
        Self::new()
    }
}
