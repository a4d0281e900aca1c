//! Background tracking task for V5 targets.
//!
//! Runs [`PositionTracker::update`] on a fixed period from a detached
//! vexide task. The tracker is shared through an async [`Mutex`] so the
//! autonomous routine can read positions between updates. A reader holding
//! the lock across an `.await` only delays the next update.
//!
//! # Example
//!
//! ```ignore
//! use deadwheel::motion::odom::{task, tracker::PositionTracker};
//! use deadwheel::motion::odom::devices::{ImuHeading, TrackingSensor};
//!
//! let tracker = task::make_shared(PositionTracker::new(1.375, wheel0, 90.0, wheel1, 0.0)?);
//! task::spawn_tracking(&tracker, ImuHeading::new(imu), task::LOOPRATE);
//!
//! let position = tracker.lock().await.position();
//! ```

use std::{sync::Arc, time::Duration};

use log::info;
use vexide::{sync::Mutex, task::spawn, time::sleep};

use super::{
    devices::{EncoderSource, HeadingSource},
    tracker::PositionTracker,
};

/// Default update period of the tracking task.
pub const LOOPRATE: Duration = Duration::from_millis(50);

/// A tracker that can be handed to the tracking task and still read elsewhere.
///
/// The tracking task waits for the lock, so readers may hold it across an
/// `.await` without the task panicking.
pub type SharedTracker<A, B = A> = Arc<Mutex<PositionTracker<A, B>>>;

/// Wraps a tracker for sharing with [`spawn_tracking`].
pub fn make_shared<A, B>(tracker: PositionTracker<A, B>) -> SharedTracker<A, B> {
    Arc::new(Mutex::new(tracker))
}

/// Updates `tracker` from `heading` every `period`, forever.
pub async fn track<A, B, H>(tracker: SharedTracker<A, B>, mut heading: H, period: Duration)
where
    A: EncoderSource,
    B: EncoderSource,
    H: HeadingSource,
{
    info!("Dead Wheel Tracking Started");
    loop {
        tracker.lock().await.update_with_heading_source(&mut heading);
        sleep(period).await;
    }
}

/// Spawns [`track`] as a detached background task.
pub fn spawn_tracking<A, B, H>(tracker: &SharedTracker<A, B>, heading: H, period: Duration)
where
    A: EncoderSource + 'static,
    B: EncoderSource + 'static,
    H: HeadingSource + 'static,
{
    let tracker = tracker.clone();
    let mainloop = spawn(async move {
        track(tracker, heading, period).await;
    });
    mainloop.detach();
}
