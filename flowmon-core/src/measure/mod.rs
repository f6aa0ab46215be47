//! Metrics derived from the raw counters of a flow.

mod bandwidth;
mod latency;
mod packet_loss;

pub use self::{bandwidth::Throughput, latency::RoundTripTime, packet_loss::LostPackets};
