//! Staggered entrance schedule.
//!
//! Every item grows in over `per_item`; start times are spread evenly so the
//! last item finishes exactly at `total`, whatever the item count. The
//! timeline never reads a clock: callers feed elapsed time into
//! [`Timeline::advance`].

use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;
use strum::Display as StrumDisplay;

pub const DEFAULT_TOTAL_DURATION: Duration = Duration::from_millis(500);
pub const DEFAULT_PER_ITEM_DURATION: Duration = Duration::from_millis(200);

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTiming {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "total_duration_ms")]
    pub total: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "per_item_duration_ms")]
    pub per_item: Duration,
}

impl AnimationTiming {
    pub fn new(total: Duration, per_item: Duration) -> Self {
        Self { total, per_item }
    }

    pub fn from_millis(total: u64, per_item: u64) -> Self {
        Self::new(Duration::from_millis(total), Duration::from_millis(per_item))
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_DURATION, DEFAULT_PER_ITEM_DURATION)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimWindow {
    pub start: Duration,
    pub end: Duration,
}

impl AnimWindow {
    pub fn new(start: Duration, end: Duration) -> Self {
        Self { start, end }
    }
}

/// Per-item entrance windows. A `per_item` longer than `total` collapses the
/// stagger to zero instead of scheduling items before t = 0.
pub fn schedule(item_count: usize, timing: &AnimationTiming) -> Vec<AnimWindow> {
    let offset = match item_count {
        0 | 1 => Duration::ZERO,
        n => {
            let steps = u32::try_from(n - 1).unwrap_or(u32::MAX);
            timing.total.saturating_sub(timing.per_item) / steps
        }
    };

    (0..item_count)
        .map(|i| {
            let start = offset.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX));
            AnimWindow::new(start, start.saturating_add(timing.per_item))
        })
        .collect()
}

pub fn progress_at(t: Duration, window: &AnimWindow, per_item: Duration) -> f64 {
    if t < window.start {
        0.0
    } else if t >= window.end {
        1.0
    } else {
        ((t - window.start).as_secs_f64() / per_item.as_secs_f64()).min(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum TimelineState {
    NotStarted,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Timeline {
    windows: Vec<AnimWindow>,
    per_item: Duration,
    elapsed: Duration,
    state: TimelineState,
}

impl Timeline {
    pub fn new(item_count: usize, timing: &AnimationTiming) -> Self {
        Self {
            windows: schedule(item_count, timing),
            per_item: timing.per_item,
            elapsed: Duration::ZERO,
            state: TimelineState::NotStarted,
        }
    }

    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.state = if self.windows.is_empty() {
            TimelineState::Finished
        } else {
            TimelineState::Running
        };
    }

    /// Moves the clock to `t`. Returns whether any item's progress changed.
    /// Time never runs backwards: earlier values are ignored.
    pub fn advance(&mut self, t: Duration) -> bool {
        if self.state != TimelineState::Running || t <= self.elapsed {
            return false;
        }

        let changed = self.windows.iter().any(|w| {
            progress_at(self.elapsed, w, self.per_item) != progress_at(t, w, self.per_item)
        });

        self.elapsed = t;
        if t >= self.end() {
            self.state = TimelineState::Finished;
        }
        changed
    }

    pub fn cancel(&mut self) {
        self.state = TimelineState::Finished;
    }

    pub fn progress(&self, index: usize) -> f64 {
        self.progress_at(index, self.elapsed)
    }

    pub fn progress_at(&self, index: usize, t: Duration) -> f64 {
        self.windows
            .get(index)
            .map(|w| progress_at(t, w, self.per_item))
            .unwrap_or(0.0)
    }

    /// Moment the last item settles.
    pub fn end(&self) -> Duration {
        self.windows
            .iter()
            .map(|w| w.end)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_finished(&self) -> bool {
        self.state == TimelineState::Finished
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn windows(&self) -> &[AnimWindow] {
        &self.windows
    }
}
