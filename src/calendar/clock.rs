//! Sources of "today"

use chrono::{Datelike, Local, Utc};
use chrono_tz::Tz;
use std::sync::Arc;

/// External source of the current day-of-month
pub trait Clock {
    fn current_day(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn current_day(&self) -> u32 {
        (**self).current_day()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn current_day(&self) -> u32 {
        (**self).current_day()
    }
}

/// Wall clock, optionally pinned to an IANA timezone
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    timezone: Option<Tz>,
}

impl SystemClock {
    /// Clock using the machine's local time
    pub fn local() -> Self {
        Self { timezone: None }
    }

    /// Clock using the given timezone
    pub fn with_timezone(timezone: Tz) -> Self {
        Self {
            timezone: Some(timezone),
        }
    }

    /// Build from a configured timezone name. An empty name means local time.
    pub fn from_name(name: &str) -> anyhow::Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Self::local());
        }
        let timezone: Tz = name
            .parse()
            .map_err(|e| anyhow::anyhow!("Unknown timezone '{}': {}", name, e))?;
        Ok(Self::with_timezone(timezone))
    }
}

impl Clock for SystemClock {
    fn current_day(&self) -> u32 {
        match self.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).day(),
            None => Local::now().day(),
        }
    }
}

/// A clock stuck on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn current_day(&self) -> u32 {
        self.0
    }
}
