use crate::time::Nanoseconds;
use std::fmt;

const BITS_PER_BYTE: f64 = 8.0;
const NANOS_PER_SEC: f64 = 1e9;

/// The received data rate of a flow, in bits per second.
///
/// Measured over the active duration of the flow, from the first
/// transmitted packet to the last received packet.
///
/// # degenerate durations
///
/// A flow with no received packets, or with timestamps out of order,
/// has a duration of zero or less. Its throughput is exactly `0`.
///
/// ```
/// # use flowmon_core::{measure::Throughput, Nanoseconds};
/// // 135_000 bytes received in one second
/// let throughput = Throughput::from_rx_bytes(135_000, Nanoseconds::new(1e9));
/// assert_eq!(throughput.as_bps(), 1_080_000.0);
///
/// let throughput = Throughput::from_rx_bytes(135_000, Nanoseconds::new(-1.0));
/// assert_eq!(throughput, Throughput::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Throughput(f64);

impl Throughput {
    pub const ZERO: Self = Self(0.0);

    /// compute the throughput of `rx_bytes` received over `duration`
    pub fn from_rx_bytes(rx_bytes: u64, duration: Nanoseconds) -> Self {
        let duration = duration.as_f64();
        if duration.is_nan() || duration <= 0.0 {
            return Self::ZERO;
        }

        Self((rx_bytes as f64 * BITS_PER_BYTE * NANOS_PER_SEC) / duration)
    }

    #[inline]
    pub fn as_bps(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}
