//! Pollable handle to one background load.
//!
//! A [`LoadJob`] is the tick loop's side of a single-writer/single-reader
//! handoff: the worker sends its output once over a oneshot channel and
//! [`LoadJob::poll`] picks it up without blocking.

use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::coord::TileCoord;

/// Lifecycle of a load job, as observed from the tick loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStatus {
    /// The worker has not delivered yet.
    Pending,
    /// The output has been handed out; the job is finished.
    Consumed,
}

enum Slot<T> {
    Waiting(oneshot::Receiver<T>),
    Consumed,
}

/// Handle to background fetch+parse work for one tile.
///
/// Dropping the handle cancels the worker; a result produced afterwards is
/// discarded.
pub struct LoadJob<T> {
    tile: TileCoord,
    slot: Slot<T>,
    cancel: CancellationToken,
}

impl<T: Default> LoadJob<T> {
    pub(crate) fn new(
        tile: TileCoord,
        rx: oneshot::Receiver<T>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            tile,
            slot: Slot::Waiting(rx),
            cancel,
        }
    }

    /// Tile this job loads.
    pub fn tile(&self) -> TileCoord {
        self.tile
    }

    pub fn status(&self) -> JobStatus {
        match self.slot {
            Slot::Waiting(_) => JobStatus::Pending,
            Slot::Consumed => JobStatus::Consumed,
        }
    }

    /// Checks for the worker's output without blocking.
    ///
    /// Returns `Some` exactly once: on the first call after the output
    /// became available. The job is then consumed and every later call
    /// returns `None`. A worker that vanished without delivering is reported
    /// as the empty (`Default`) output.
    pub fn poll(&mut self) -> Option<T> {
        let Slot::Waiting(rx) = &mut self.slot else {
            return None;
        };

        let output = match rx.try_recv() {
            Ok(output) => output,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => {
                warn!(tile = %self.tile, "Load worker ended without a result; using empty result");
                T::default()
            }
        };
        self.slot = Slot::Consumed;
        Some(output)
    }

    /// Whether the output has been handed out.
    pub fn is_consumed(&self) -> bool {
        matches!(self.slot, Slot::Consumed)
    }
}

impl<T> Drop for LoadJob<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<T> std::fmt::Debug for LoadJob<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self.slot {
            Slot::Waiting(_) => JobStatus::Pending,
            Slot::Consumed => JobStatus::Consumed,
        };
        f.debug_struct("LoadJob")
            .field("tile", &self.tile)
            .field("status", &status)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> (oneshot::Sender<u32>, LoadJob<u32>, CancellationToken) {
        let (tx, rx) = oneshot::channel();
        let cancel = CancellationToken::new();
        let job = LoadJob::new(TileCoord::new(1, 2, 3), rx, cancel.clone());
        (tx, job, cancel)
    }

    #[test]
    fn test_poll_before_delivery_returns_none() {
        let (_tx, mut job, _) = job();
        assert_eq!(job.poll(), None);
        assert_eq!(job.status(), JobStatus::Pending);
    }

    #[test]
    fn test_poll_yields_exactly_once() {
        let (tx, mut job, _) = job();
        tx.send(42).unwrap();

        assert_eq!(job.poll(), Some(42));
        assert!(job.is_consumed());
        assert_eq!(job.poll(), None);
        assert_eq!(job.poll(), None);
    }

    #[test]
    fn test_vanished_worker_yields_default_once() {
        let (tx, mut job, _) = job();
        drop(tx);

        assert_eq!(job.poll(), Some(0));
        assert_eq!(job.poll(), None);
    }

    #[test]
    fn test_drop_cancels_worker() {
        let (tx, job, cancel) = job();
        assert!(!cancel.is_cancelled());

        drop(job);

        assert!(cancel.is_cancelled());
        // Late delivery finds the receiver gone
        assert!(tx.send(1).is_err());
    }

    #[test]
    fn test_debug_shows_tile_and_status() {
        let (_tx, job, _) = job();
        let debug = format!("{:?}", job);
        assert!(debug.contains("Pending"));
        assert!(debug.contains("zoom: 3"));
    }
}
