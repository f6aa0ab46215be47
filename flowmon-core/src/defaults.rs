//! Names and rendering defaults used when reading a flow monitor report.
//!
//! The element and attribute names follow the XML written by the ns-3
//! `FlowMonitor::SerializeToXmlFile`.

/// Element holding one [`FLOW`] entry per monitored flow.
///
/// The first element with this name below the document root is used.
/// Further down the document, `FlowProbes` reuse the same element name
/// for per-probe counters; those are never reached.
pub const FLOW_STATS: &str = "FlowStats";

/// Element holding one [`FLOW`] entry per classified flow, mapping the
/// flow identifier to its IPv4 endpoints.
pub const IPV4_FLOW_CLASSIFIER: &str = "Ipv4FlowClassifier";

/// Entry element found under both [`FLOW_STATS`] and [`IPV4_FLOW_CLASSIFIER`].
pub const FLOW: &str = "Flow";

pub const ATTR_FLOW_ID: &str = "flowId";
pub const ATTR_TX_PACKETS: &str = "txPackets";
pub const ATTR_RX_PACKETS: &str = "rxPackets";
pub const ATTR_DELAY_SUM: &str = "delaySum";
pub const ATTR_TX_BYTES: &str = "txBytes";
pub const ATTR_RX_BYTES: &str = "rxBytes";
pub const ATTR_TIME_FIRST_TX_PACKET: &str = "timeFirstTxPacket";
pub const ATTR_TIME_LAST_RX_PACKET: &str = "timeLastRxPacket";
pub const ATTR_SOURCE_ADDRESS: &str = "sourceAddress";
pub const ATTR_DESTINATION_ADDRESS: &str = "destinationAddress";

/// Default number of decimals used when rendering floating point cells.
///
/// ```
/// # use flowmon_core::{defaults::*, table::Console};
/// assert_eq!(Console::default().float_precision, FLOAT_PRECISION);
/// ```
pub const FLOAT_PRECISION: usize = 6;
