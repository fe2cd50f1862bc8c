//! Per-puzzle countdown clock.
//!
//! The timer knows nothing about wall-clock time. Whoever owns the session
//! calls [`Timer::tick`] once per second.

use crate::config::INITIAL_TIME_SECONDS;

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Timer was not running
    Idle,
    Running { remaining: u32 },
    /// Reached zero on this tick; the timer is now stopped
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    initial: u32,
    remaining: u32,
    active: bool,
    /// Number of restarts so far
    starts: u64,
}

impl Timer {
    /// A stopped timer that restarts from `initial` seconds.
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            remaining: initial,
            active: false,
            starts: 0,
        }
    }

    /// Reset to the full duration and start counting.
    pub fn restart(&mut self) {
        self.remaining = self.initial;
        self.active = true;
        self.starts += 1;
    }

    /// Stop counting, keeping the remaining time.
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn tick(&mut self) -> Tick {
        if !self.active {
            return Tick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            Tick::Expired
        } else {
            Tick::Running {
                remaining: self.remaining,
            }
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Increments on every restart; lets a driver notice a fresh countdown
    /// and realign its tick source.
    pub fn starts(&self) -> u64 {
        self.starts
    }

    /// Remaining time as `m:ss`.
    pub fn clock(&self) -> String {
        format_clock(self.remaining)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(INITIAL_TIME_SECONDS)
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
