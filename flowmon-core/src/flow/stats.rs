use super::{AttributeError, FlowId, attribute, counter, time};
use crate::{
    defaults::{
        ATTR_DELAY_SUM, ATTR_FLOW_ID, ATTR_RX_BYTES, ATTR_RX_PACKETS, ATTR_TIME_FIRST_TX_PACKET,
        ATTR_TIME_LAST_RX_PACKET, ATTR_TX_BYTES, ATTR_TX_PACKETS,
    },
    measure::{LostPackets, RoundTripTime, Throughput},
    time::Nanoseconds,
};
use roxmltree::Node;

/// Counters collected for one flow over its observed lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowStats {
    pub id: FlowId,
    pub tx_packets: u64,
    pub rx_packets: u64,
    /// sum of the delays of all received packets
    pub delay_sum: Nanoseconds,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    pub time_first_tx_packet: Nanoseconds,
    pub time_last_rx_packet: Nanoseconds,
}

impl FlowStats {
    /// read the counters from a `<Flow>` entry of the `<FlowStats>` element
    ///
    /// Other attributes (jitter, forwarding, ...) and the child histograms
    /// are ignored.
    pub fn from_node(node: Node<'_, '_>) -> Result<Self, AttributeError> {
        Ok(Self {
            id: FlowId::new(attribute(node, ATTR_FLOW_ID)?),
            tx_packets: counter(node, ATTR_TX_PACKETS)?,
            rx_packets: counter(node, ATTR_RX_PACKETS)?,
            delay_sum: time(node, ATTR_DELAY_SUM)?,
            tx_bytes: counter(node, ATTR_TX_BYTES)?,
            rx_bytes: counter(node, ATTR_RX_BYTES)?,
            time_first_tx_packet: time(node, ATTR_TIME_FIRST_TX_PACKET)?,
            time_last_rx_packet: time(node, ATTR_TIME_LAST_RX_PACKET)?,
        })
    }

    pub fn lost_packets(&self) -> LostPackets {
        LostPackets::new(self.tx_packets, self.rx_packets)
    }

    /// time elapsed between the first transmitted packet and the last
    /// received packet
    ///
    /// Zero or negative when nothing was received or when the timestamps
    /// are out of order.
    pub fn duration(&self) -> Nanoseconds {
        self.time_last_rx_packet - self.time_first_tx_packet
    }

    pub fn round_trip_time(&self) -> RoundTripTime {
        RoundTripTime::from_delay_sum(self.delay_sum, self.rx_packets)
    }

    pub fn throughput(&self) -> Throughput {
        Throughput::from_rx_bytes(self.rx_bytes, self.duration())
    }
}
