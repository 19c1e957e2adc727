//! Countdown study timer.
//!
//! Only the state machine lives here; the page drives `tick()` once per second
//! from its own interval and shows the "time's up" dialog on `Finished`.
use log::debug;

use crate::config::ConfigError;

pub const DEFAULT_TIMER_SECONDS: u32 = 60;
/// 99:59, the largest value the MM:SS display can show.
pub const MAX_TIMER_SECONDS: u32 = 99 * 60 + 59;

/// Clamp arbitrary input to `0..=MAX_TIMER_SECONDS`, flooring fractions.
/// Non-finite and negative values become 0.
pub fn clamp_timer_seconds(secs: f64) -> u32 {
    if !secs.is_finite() || secs < 0.0 {
        return 0;
    }
    secs.floor().min(f64::from(MAX_TIMER_SECONDS)) as u32
}

/// `MM:SS`.
pub fn format_time(secs: u32) -> String {
    let secs = secs.min(MAX_TIMER_SECONDS);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Value for an `<input type="time">`; hours are always `00`.
pub fn seconds_to_time_input(secs: u32) -> String {
    format!("00:{}", format_time(secs))
}

/// Strict parse of `HH:MM` or `HH:MM:SS`.
pub fn try_parse_time_input(value: &str) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::InvalidTime(value.to_string());
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid());
    }
    let parts = value
        .split(':')
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;
    let (hh, mm, ss) = match parts.as_slice() {
        [hh, mm] => (*hh, *mm, 0),
        [hh, mm, ss] => (*hh, *mm, *ss),
        _ => return Err(invalid()),
    };
    let total = hh
        .saturating_mul(3600)
        .saturating_add(mm.saturating_mul(60))
        .saturating_add(ss);
    Ok(clamp_timer_seconds(total as f64))
}

/// Lenient parse: `None` for empty or malformed input.
pub fn parse_time_input(value: &str) -> Option<u32> {
    match try_parse_time_input(value) {
        Ok(secs) => Some(secs),
        Err(e) => {
            debug!("ignoring timer input: {e}");
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused, or already at zero.
    Idle,
    Ticked,
    /// Hit zero on this tick; the timer is now paused.
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_TIMER_SECONDS)
    }
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        let duration = duration.min(MAX_TIMER_SECONDS);
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stop and rewind, optionally to a new duration.
    pub fn reset(&mut self, duration: Option<u32>) {
        if let Some(d) = duration {
            self.duration = d.min(MAX_TIMER_SECONDS);
        }
        self.remaining = self.duration;
        self.running = false;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running || self.remaining == 0 {
            return TickOutcome::Idle;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Finished
        } else {
            TickOutcome::Ticked
        }
    }

    pub fn display(&self) -> String {
        format_time(self.remaining)
    }
}
