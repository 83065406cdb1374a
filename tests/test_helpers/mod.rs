//! Shared clock and instant helpers for integration tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::sync::{Mutex, PoisonError};

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock frozen at an RFC 3339 instant.
    pub fn at(rfc3339: &str) -> Self {
        Self {
            now: Mutex::new(instant(rfc3339)),
        }
    }

    /// Moves the clock to an RFC 3339 instant.
    pub fn set(&self, rfc3339: &str) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = instant(rfc3339);
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parses an RFC 3339 instant for test fixtures.
pub fn instant(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("test instant should be RFC 3339")
        .with_timezone(&Utc)
}
