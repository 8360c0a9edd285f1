#![forbid(unsafe_code)]

//! Host-supplied monotonic time.
//!
//! The engine never reads a wall clock: the host passes a [`Timestamp`]
//! into every entry point that can arm or fire a deadline. On the web this
//! is `performance.now()` (or the event's `timeStamp`); in tests it is a
//! plain number. Identical event sequences therefore yield identical
//! engine behavior on every host.

/// Monotonic milliseconds since an arbitrary host-defined origin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestamp(f64);

impl Timestamp {
    /// Wrap a host-supplied millisecond reading.
    #[inline]
    #[must_use]
    pub const fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    /// Raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> f64 {
        self.0
    }

    /// This timestamp advanced by `ms` milliseconds.
    #[inline]
    #[must_use]
    pub fn plus_millis(self, ms: f64) -> Self {
        Self(self.0 + ms)
    }

    /// Whether this timestamp is at or past `deadline`.
    #[inline]
    #[must_use]
    pub fn has_reached(self, deadline: Timestamp) -> bool {
        self.0 >= deadline.0
    }
}

impl From<f64> for Timestamp {
    fn from(ms: f64) -> Self {
        Self::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::Timestamp;

    #[test]
    fn plus_millis_advances() {
        let t = Timestamp::from_millis(100.0);
        assert_eq!(t.plus_millis(50.0).as_millis(), 150.0);
    }

    #[test]
    fn has_reached_is_inclusive() {
        let deadline = Timestamp::from_millis(500.0);
        assert!(Timestamp::from_millis(500.0).has_reached(deadline));
        assert!(Timestamp::from_millis(500.1).has_reached(deadline));
        assert!(!Timestamp::from_millis(499.9).has_reached(deadline));
    }

    #[test]
    fn from_f64() {
        let t: Timestamp = 42.5.into();
        assert_eq!(t.as_millis(), 42.5);
    }
}
