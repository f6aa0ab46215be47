use std::fmt;

/// Packets sent by a flow that were never accounted as received.
///
/// Computed as `tx - rx` without any floor: a flow that counts
/// retransmitted or duplicated packets on the receiving side can show
/// more received than transmitted packets, in which case the loss is
/// negative.
///
/// ```
/// # use flowmon_core::measure::LostPackets;
/// assert_eq!(LostPackets::new(100, 90).value(), 10);
/// assert_eq!(LostPackets::new(90, 100).value(), -10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LostPackets(i64);

impl LostPackets {
    pub fn new(tx_packets: u64, rx_packets: u64) -> Self {
        let lost = i128::from(tx_packets) - i128::from(rx_packets);
        Self(lost.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }

    #[inline]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LostPackets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
