//! Per-flow metrics out of a flow monitor report.
//!
//! The ns-3 flow monitor serializes, for every flow of a simulation, the
//! counters it collected (`<FlowStats>`) and the endpoints of the flow
//! (`<Ipv4FlowClassifier>`). This crate reads such a report, joins both
//! collections by flow identifier and derives, per flow:
//!
//! * the [lost packets](measure::LostPackets);
//! * the [round trip time](measure::RoundTripTime), in milliseconds;
//! * the [throughput](measure::Throughput), in bits per second.
//!
//! The resulting [`FlowReport`] converts into a [`Table`](table::Table)
//! that can be rendered for a terminal or as a LaTeX `tabular`.
//!
//! ```no_run
//! use flowmon_core::{
//!     FlowReport,
//!     table::{Console, Latex, TableFormat as _},
//! };
//!
//! let report = FlowReport::from_path("second-assignment-yans-1ap.xml")?;
//! let table = report.to_table();
//!
//! println!("{}", Console::default().render(&table));
//! std::fs::write("yans-1ap.tex", Latex::default().render(&table))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod defaults;
pub mod flow;
pub mod measure;
mod report;
pub mod table;
mod time;

pub use self::{
    flow::{AttributeError, FlowClassifier, FlowId, FlowStats},
    report::{COLUMNS, FlowReport, FlowRow, ReportError},
    time::{Nanoseconds, NanosecondsParseError},
};
