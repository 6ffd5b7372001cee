//! Platform layer
//!
//! Frame pacing: turns wall-clock instants into the `dt` fed to the
//! simulation and keeps a rolling FPS estimate for the HUD.

use std::time::{Duration, Instant};

use crate::consts::{MAX_FRAME_DT, TARGET_FRAME_DT};

/// Frames in the FPS averaging window
const FPS_WINDOW: usize = 60;

/// Produces clamped per-frame time steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_times: [Option<Instant>; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Time step for a frame starting now
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Time step for a frame starting at `now`
    ///
    /// The first frame assumes the target cadence. Long stalls are clamped
    /// to `MAX_FRAME_DT` so entities cannot jump across each other.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => TARGET_FRAME_DT,
        };
        self.last = Some(now);
        self.record_frame(now);
        dt.min(MAX_FRAME_DT)
    }

    /// How long to sleep after a frame that started at `frame_start`
    pub fn remaining_budget(&self, frame_start: Instant, now: Instant) -> Duration {
        let budget = Duration::from_secs_f32(TARGET_FRAME_DT);
        budget.saturating_sub(now.saturating_duration_since(frame_start))
    }

    /// Rolling frames-per-second over the last window
    pub fn fps(&self) -> u32 {
        self.fps
    }

    fn record_frame(&mut self, now: Instant) {
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest entry sits where the next write will go
        if let Some(oldest) = self.frame_times[self.frame_index] {
            let elapsed = now.saturating_duration_since(oldest).as_secs_f64();
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32;
            }
        }
    }
}
