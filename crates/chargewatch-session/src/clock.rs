//! Time source for session timestamps.
//!
//! Session times are wall-clock values in the server's local time zone.
//! Reading the clock goes through the [`Clock`] trait so the summary window
//! can be tested at exact boundaries instead of racing the real clock.

use chrono::{Local, NaiveDateTime};

/// Supplies the current local wall-clock time.
///
/// # Trait bounds
///
/// - `Send + Sync` → the manager is shared across threads and reads the clock
///   from all of them.
/// - `'static` → the clock lives as long as the manager that owns it.
///
/// # Example
///
/// ```rust
/// use chargewatch_session::Clock;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// /// Always reports the same instant.
/// struct FrozenClock(NaiveDateTime);
///
/// impl Clock for FrozenClock {
///     fn now(&self) -> NaiveDateTime {
///         self.0
///     }
/// }
///
/// let noon = NaiveDate::from_ymd_opt(2021, 3, 15)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
/// assert_eq!(FrozenClock(noon).now(), noon);
/// ```
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> NaiveDateTime;
}

/// The system clock, in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
