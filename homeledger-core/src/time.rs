//! Time utilities: the injected source of "today".

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

/// Supplies the current date to code that needs fallbacks.
pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Wall clock, read in a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parse an IANA zone like "America/Chicago".
    pub fn from_tz_name(tz: &str) -> Result<Self> {
        let tz: Tz = tz
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
        Ok(Self { tz })
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { tz: chrono_tz::America::Chicago }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
        assert_eq!(clock.current_year(), 2026);
    }

    #[test]
    fn test_parse_timezone() {
        let clock = SystemClock::from_tz_name("Europe/Berlin").unwrap();
        assert_eq!(clock.timezone(), chrono_tz::Europe::Berlin);
        assert!(SystemClock::from_tz_name("Mars/Olympus").is_err());
    }

    #[test]
    fn test_default_zone_matches_constant() {
        let clock = SystemClock::default();
        assert_eq!(clock.timezone().name(), DEFAULT_TIMEZONE);
    }
}
