use crate::time::Nanoseconds;
use std::fmt;

const MILLIS_PER_NANO: f64 = 1e-6;

/// The round trip time of a flow, in milliseconds.
///
/// Approximated as the mean per-packet delay: the cumulative delay of all
/// received packets divided by the number of received packets.
///
/// # flows without received packets
///
/// The mean is undefined when nothing was received. Such flows report
/// a round trip time of exactly `0`.
///
/// ```
/// # use flowmon_core::{measure::RoundTripTime, Nanoseconds};
/// let rtt = RoundTripTime::from_delay_sum(Nanoseconds::new(900_000.0), 90);
/// assert!((rtt.as_millis() - 0.01).abs() < 1e-12);
///
/// let rtt = RoundTripTime::from_delay_sum(Nanoseconds::new(900_000.0), 0);
/// assert_eq!(rtt, RoundTripTime::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct RoundTripTime(f64);

impl RoundTripTime {
    pub const ZERO: Self = Self(0.0);

    pub fn from_delay_sum(delay_sum: Nanoseconds, rx_packets: u64) -> Self {
        if rx_packets == 0 {
            return Self::ZERO;
        }

        Self((delay_sum.as_f64() / rx_packets as f64) * MILLIS_PER_NANO)
    }

    #[inline]
    pub fn as_millis(self) -> f64 {
        self.0
    }
}

impl fmt::Display for RoundTripTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
