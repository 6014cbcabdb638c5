use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::error::TimerError;

/// the units selectable in the gui
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    Seconds,
    #[default]
    Minutes,
    Hours,
}

impl TimeUnit {
    pub const ALL: [Self; 3] = [Self::Seconds, Self::Minutes, Self::Hours];

    #[must_use]
    pub fn duration(self, amount: i64) -> Duration {
        match self {
            Self::Seconds => Duration::seconds(amount),
            Self::Minutes => Duration::minutes(amount),
            Self::Hours => Duration::hours(amount),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Seconds => "Seconds",
            Self::Minutes => "Minutes",
            Self::Hours => "Hours",
        })
    }
}

/// the result of one periodic evaluation while a countdown is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Remaining(Duration),
    Expired,
}

/// a single countdown towards an absolute end time
///
/// no end time means idle; the caller supplies `now` so expiry can be
/// tested without waiting on the wall clock
#[derive(Debug, Default)]
pub struct Countdown {
    end_time: Option<DateTime<Utc>>,
}

impl Countdown {
    /// parses `amount` and arms the countdown at `now + amount * unit`
    ///
    /// # Errors
    /// `TimerError::InvalidInput` if `amount` is not a positive whole
    /// number; the countdown stays idle
    pub fn start(&mut self, amount: &str, unit: TimeUnit, now: DateTime<Utc>) -> Result<(), TimerError> {
        let amount: i64 = amount
            .trim()
            .parse()
            .map_err(|_| TimerError::InvalidInput(amount.to_string()))?;
        if amount <= 0 {
            return Err(TimerError::InvalidInput(amount.to_string()));
        }
        self.end_time = Some(now + unit.duration(amount));
        log::info!("countdown started: {amount} {unit}");
        Ok(())
    }

    /// evaluates the countdown once; expiry clears the end time, so
    /// `Expired` is produced exactly once and later ticks return `None`
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Tick> {
        let end_time = self.end_time?;
        if now < end_time {
            Some(Tick::Remaining(end_time - now))
        } else {
            self.end_time = None;
            Some(Tick::Expired)
        }
    }

    /// idempotent; clearing the end time is the whole stop transition,
    /// so no tick can fire after this returns
    pub fn stop(&mut self) {
        if self.end_time.take().is_some() {
            log::info!("countdown stopped");
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.end_time.is_some()
    }
}

/// renders a remaining duration, showing only the fields the magnitude
/// calls for; negative durations clamp to zero
#[must_use]
pub fn format_remaining(remaining: Duration) -> String {
    let remaining = remaining.max(Duration::zero());
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;
    let seconds = remaining.num_seconds() % 60;

    if days > 0 {
        format!("{days:02}:{hours:02}:{minutes:02}:{seconds:02}")
    } else if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
