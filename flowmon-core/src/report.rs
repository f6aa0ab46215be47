use crate::{
    defaults::{FLOW, FLOW_STATS, IPV4_FLOW_CLASSIFIER},
    flow::{AttributeError, FlowClassifier, FlowId, FlowStats},
    measure::{LostPackets, RoundTripTime, Throughput},
    table::{Alignment, Cell, Column, Table},
};
use roxmltree::{Document, Node};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

/// Column headers of the table built by [`FlowReport::to_table`], in order.
pub const COLUMNS: [&str; 8] = [
    "Flow ID",
    "Tx Packets",
    "Rx Packets",
    "Lost Packets",
    "RTT (ms)",
    "Throughput (bps)",
    "Source IP",
    "Destination IP",
];

/// One row of a [`FlowReport`]: the measures of a flow joined with
/// its endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRow {
    pub flow_id: FlowId,
    pub tx_packets: u64,
    pub rx_packets: u64,
    pub lost_packets: LostPackets,
    pub round_trip_time: RoundTripTime,
    pub throughput: Throughput,
    /// `None` until a classifier entry with the same [`FlowId`] is joined
    pub source_address: Option<String>,
    /// `None` until a classifier entry with the same [`FlowId`] is joined
    pub destination_address: Option<String>,
}

impl FlowRow {
    pub fn is_classified(&self) -> bool {
        self.source_address.is_some() && self.destination_address.is_some()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::from(self.flow_id.as_str()),
            Cell::Unsigned(self.tx_packets),
            Cell::Unsigned(self.rx_packets),
            Cell::Signed(self.lost_packets.value()),
            Cell::Float(self.round_trip_time.as_millis()),
            Cell::Float(self.throughput.as_bps()),
            self.source_address.as_deref().map_or(Cell::Empty, Cell::from),
            self.destination_address.as_deref().map_or(Cell::Empty, Cell::from),
        ]
    }
}

impl From<&FlowStats> for FlowRow {
    fn from(stats: &FlowStats) -> Self {
        Self {
            flow_id: stats.id.clone(),
            tx_packets: stats.tx_packets,
            rx_packets: stats.rx_packets,
            lost_packets: stats.lost_packets(),
            round_trip_time: stats.round_trip_time(),
            throughput: stats.throughput(),
            source_address: None,
            destination_address: None,
        }
    }
}

/// Error returned when a flow monitor report cannot be extracted.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read report `{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed XML document")]
    Xml(#[from] roxmltree::Error),
    #[error("no <{0}> element in the report")]
    MissingElement(&'static str),
    #[error("invalid flow statistics entry #{index}")]
    FlowStats {
        index: usize,
        #[source]
        source: AttributeError,
    },
    #[error("invalid flow classifier entry #{index}")]
    Classifier {
        index: usize,
        #[source]
        source: AttributeError,
    },
}

/// The per-flow measures extracted from one flow monitor report.
///
/// There is exactly one row per `<Flow>` entry of the `<FlowStats>`
/// element, in document order. The `<Ipv4FlowClassifier>` entries only
/// complete existing rows with their endpoint addresses: an entry whose
/// flow identifier has no statistics is dropped.
///
/// ```
/// # use flowmon_core::FlowReport;
/// let report = FlowReport::parse(r#"
/// <FlowMonitor>
///   <FlowStats>
///     <Flow flowId="1" txPackets="100" rxPackets="90" delaySum="900000 ns"
///           txBytes="150000" rxBytes="135000"
///           timeFirstTxPacket="0 ns" timeLastRxPacket="1000000000 ns"/>
///   </FlowStats>
///   <Ipv4FlowClassifier>
///     <Flow flowId="1" sourceAddress="10.0.0.1" destinationAddress="10.0.0.2"/>
///   </Ipv4FlowClassifier>
/// </FlowMonitor>
/// "#)?;
///
/// let row = report.get("1").unwrap();
/// assert_eq!(row.lost_packets.value(), 10);
/// assert_eq!(row.throughput.as_bps(), 1_080_000.0);
/// assert_eq!(row.source_address.as_deref(), Some("10.0.0.1"));
/// # Ok::<(), flowmon_core::ReportError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowReport {
    rows: Vec<FlowRow>,
}

impl FlowReport {
    /// read and extract the report stored at `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), bytes = xml.len(), "read flow monitor report");

        Self::parse(&xml)
    }

    /// extract the report from an XML document held in memory
    pub fn parse(xml: &str) -> Result<Self, ReportError> {
        let document = Document::parse(xml)?;
        let root = document.root_element();

        let flow_stats = find(root, FLOW_STATS)?;
        let classifiers = find(root, IPV4_FLOW_CLASSIFIER)?;

        let rows = entries(flow_stats)
            .enumerate()
            .map(|(index, node)| {
                FlowStats::from_node(node)
                    .map(|stats| FlowRow::from(&stats))
                    .map_err(|source| ReportError::FlowStats { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut report = Self { rows };

        let mut classified = 0;
        for (index, node) in entries(classifiers).enumerate() {
            let classifier = FlowClassifier::from_node(node)
                .map_err(|source| ReportError::Classifier { index, source })?;
            report.classify(&classifier);
            classified += 1;
        }

        debug!(
            flows = report.len(),
            classifiers = classified,
            unmatched = report.unmatched().count(),
            "extracted flow monitor report"
        );

        Ok(report)
    }

    /// attach the endpoints of `classifier` to the rows of the same flow
    ///
    /// Returns the number of rows updated. A later classifier for the same
    /// flow overwrites the endpoints of an earlier one.
    pub fn classify(&mut self, classifier: &FlowClassifier) -> usize {
        let mut matched = 0;
        for row in self
            .rows
            .iter_mut()
            .filter(|row| row.flow_id == classifier.id)
        {
            row.source_address = Some(classifier.source_address.clone());
            row.destination_address = Some(classifier.destination_address.clone());
            matched += 1;
        }

        if matched == 0 {
            debug!(flow_id = %classifier.id, "classifier entry without flow statistics");
        }

        matched
    }

    pub fn rows(&self) -> &[FlowRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// first row with the given flow identifier
    pub fn get(&self, flow_id: &str) -> Option<&FlowRow> {
        self.rows
            .iter()
            .find(|row| row.flow_id.as_str() == flow_id)
    }

    /// rows no classifier entry was joined to
    pub fn unmatched(&self) -> impl Iterator<Item = &FlowRow> {
        self.rows.iter().filter(|row| !row.is_classified())
    }

    /// build the table of the report, one line per row, with the
    /// [`COLUMNS`] headers
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(COLUMNS.iter().enumerate().map(|(index, name)| {
            let alignment = match index {
                0 | 6 | 7 => Alignment::Left,
                _ => Alignment::Right,
            };
            Column::new(*name, alignment)
        }));

        for row in &self.rows {
            table.push_row(row.cells());
        }

        table
    }
}

impl From<&FlowReport> for Table {
    fn from(report: &FlowReport) -> Self {
        report.to_table()
    }
}

impl<'a> IntoIterator for &'a FlowReport {
    type Item = &'a FlowRow;
    type IntoIter = std::slice::Iter<'a, FlowRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// first element named `name` below `root`, in document order
fn find<'a, 'input>(
    root: Node<'a, 'input>,
    name: &'static str,
) -> Result<Node<'a, 'input>, ReportError> {
    root.descendants()
        .skip(1)
        .find(|node| node.has_tag_name(name))
        .ok_or(ReportError::MissingElement(name))
}

fn entries<'a, 'input>(parent: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    parent
        .descendants()
        .skip(1)
        .filter(|node| node.has_tag_name(FLOW))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{ATTR_RX_PACKETS, ATTR_SOURCE_ADDRESS};
    use rand_chacha::ChaChaRng;
    use rand_core::{Rng as _, SeedableRng as _};

    fn flow(id: &str, tx: u64, rx: u64, delay: &str, rx_bytes: u64, first: &str, last: &str) -> String {
        format!(
            r#"<Flow flowId="{id}" txPackets="{tx}" rxPackets="{rx}" delaySum="{delay}" txBytes="{}" rxBytes="{rx_bytes}" timeFirstTxPacket="{first}" timeLastRxPacket="{last}"/>"#,
            tx * 1_500
        )
    }

    fn classifier(id: &str, source: &str, destination: &str) -> String {
        format!(r#"<Flow flowId="{id}" sourceAddress="{source}" destinationAddress="{destination}"/>"#)
    }

    fn document(flows: &[String], classifiers: &[String]) -> String {
        format!(
            "<?xml version=\"1.0\" ?>\n<FlowMonitor>\n<FlowStats>\n{}\n</FlowStats>\n<Ipv4FlowClassifier>\n{}\n</Ipv4FlowClassifier>\n</FlowMonitor>\n",
            flows.join("\n"),
            classifiers.join("\n"),
        )
    }

    #[test]
    fn single_flow() {
        let xml = document(
            &[flow("1", 100, 90, "900000 ns", 135_000, "0 ns", "1000000000 ns")],
            &[classifier("1", "10.0.0.1", "10.0.0.2")],
        );
        let report = FlowReport::parse(&xml).unwrap();

        assert_eq!(report.len(), 1);
        let row = &report.rows()[0];
        assert_eq!(row.flow_id, FlowId::new("1"));
        assert_eq!(row.tx_packets, 100);
        assert_eq!(row.rx_packets, 90);
        assert_eq!(row.lost_packets.value(), 10);
        assert!((row.round_trip_time.as_millis() - 0.01).abs() < 1e-12);
        assert!((row.throughput.as_bps() - 1_080_000.0).abs() < 1e-6);
        assert_eq!(row.source_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(row.destination_address.as_deref(), Some("10.0.0.2"));
        assert!(row.is_classified());
    }

    #[test]
    fn rows_follow_flow_stats_document_order() {
        let xml = document(
            &[
                flow("3", 1, 1, "1 ns", 1, "0 ns", "1 ns"),
                flow("1", 1, 1, "1 ns", 1, "0 ns", "1 ns"),
                flow("2", 1, 1, "1 ns", 1, "0 ns", "1 ns"),
            ],
            &[
                classifier("1", "a", "b"),
                classifier("2", "c", "d"),
                classifier("3", "e", "f"),
            ],
        );
        let report = FlowReport::parse(&xml).unwrap();

        let mut ids = Vec::new();
        for row in &report {
            ids.push(row.flow_id.as_str());
        }
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn classifier_only_entries_are_dropped() {
        let xml = document(
            &[flow("1", 10, 10, "10 ns", 10, "0 ns", "10 ns")],
            &[
                classifier("9", "10.0.0.9", "10.0.0.10"),
                classifier("1", "10.0.0.1", "10.0.0.2"),
                classifier("8", "10.0.0.8", "10.0.0.10"),
            ],
        );
        let report = FlowReport::parse(&xml).unwrap();

        assert_eq!(report.len(), 1);
        assert!(report.get("9").is_none());
        assert_eq!(report.rows()[0].source_address.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn unmatched_flows_have_no_addresses() {
        let xml = document(
            &[
                flow("1", 10, 10, "10 ns", 10, "0 ns", "10 ns"),
                flow("2", 10, 10, "10 ns", 10, "0 ns", "10 ns"),
            ],
            &[classifier("2", "10.0.0.3", "10.0.0.4")],
        );
        let report = FlowReport::parse(&xml).unwrap();

        let row = report.get("1").unwrap();
        assert_eq!(row.source_address, None);
        assert_eq!(row.destination_address, None);

        let unmatched: Vec<_> = report.unmatched().map(|row| row.flow_id.as_str()).collect();
        assert_eq!(unmatched, ["1"]);
    }

    #[test]
    fn no_classifier_entries() {
        let xml = document(
            &[
                flow("1", 10, 10, "10 ns", 10, "0 ns", "10 ns"),
                flow("2", 10, 10, "10 ns", 10, "0 ns", "10 ns"),
            ],
            &[],
        );
        let report = FlowReport::parse(&xml).unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.unmatched().count(), 2);
    }

    #[test]
    fn later_classifier_overwrites() {
        let mut report = FlowReport::parse(&document(
            &[flow("1", 10, 10, "10 ns", 10, "0 ns", "10 ns")],
            &[classifier("1", "10.0.0.1", "10.0.0.2")],
        ))
        .unwrap();

        let matched = report.classify(&FlowClassifier {
            id: FlowId::new("1"),
            source_address: "192.168.0.1".to_owned(),
            destination_address: "192.168.0.2".to_owned(),
        });

        assert_eq!(matched, 1);
        assert_eq!(report.rows()[0].source_address.as_deref(), Some("192.168.0.1"));
        assert_eq!(
            report.rows()[0].destination_address.as_deref(),
            Some("192.168.0.2")
        );
    }

    #[test]
    fn empty_flow_stats() {
        let report = FlowReport::parse(&document(&[], &[classifier("1", "a", "b")])).unwrap();

        assert!(report.is_empty());
        assert_eq!(report.to_table().len(), 0);
    }

    #[test]
    fn ignores_flow_probes() {
        let xml = r#"<FlowMonitor>
            <FlowStats>
                <Flow flowId="1" txPackets="2" rxPackets="2" delaySum="+2e+06ns" txBytes="200"
                      rxBytes="200" timeFirstTxPacket="+1e+09ns" timeLastRxPacket="+2e+09ns">
                    <delayHistogram nBins="1"><bin index="0" start="0" width="0.001" count="2"/></delayHistogram>
                </Flow>
            </FlowStats>
            <Ipv4FlowClassifier>
                <Flow flowId="1" sourceAddress="10.1.1.1" destinationAddress="10.1.1.2" protocol="17">
                    <Dscp value="0x0" packets="2"/>
                </Flow>
            </Ipv4FlowClassifier>
            <FlowProbes>
                <FlowProbe index="0">
                    <FlowStats flowId="1" packets="2" bytes="200" delayFromFirstProbeSum="+0ns"/>
                </FlowProbe>
            </FlowProbes>
        </FlowMonitor>"#;
        let report = FlowReport::parse(xml).unwrap();

        assert_eq!(report.len(), 1);
        let row = report.get("1").unwrap();
        assert!((row.round_trip_time.as_millis() - 1.0).abs() < 1e-12);
        assert_eq!(row.throughput.as_bps(), 1_600.0);
    }

    #[test]
    fn malformed_xml() {
        assert!(matches!(
            FlowReport::parse("<FlowMonitor><FlowStats></FlowMonitor>"),
            Err(ReportError::Xml(_))
        ));
        assert!(matches!(FlowReport::parse(""), Err(ReportError::Xml(_))));
    }

    #[test]
    fn missing_flow_stats() {
        assert!(matches!(
            FlowReport::parse("<FlowMonitor><Ipv4FlowClassifier/></FlowMonitor>"),
            Err(ReportError::MissingElement(FLOW_STATS))
        ));
    }

    #[test]
    fn missing_classifier() {
        assert!(matches!(
            FlowReport::parse("<FlowMonitor><FlowStats/></FlowMonitor>"),
            Err(ReportError::MissingElement(IPV4_FLOW_CLASSIFIER))
        ));
    }

    #[test]
    fn root_element_is_not_searched() {
        assert!(matches!(
            FlowReport::parse("<FlowStats><Ipv4FlowClassifier/></FlowStats>"),
            Err(ReportError::MissingElement(FLOW_STATS))
        ));
    }

    #[test]
    fn invalid_flow_stats_entry() {
        let xml = document(
            &[
                flow("1", 1, 1, "1 ns", 1, "0 ns", "1 ns"),
                r#"<Flow flowId="2" txPackets="1"/>"#.to_owned(),
            ],
            &[],
        );

        let Err(ReportError::FlowStats { index, source }) = FlowReport::parse(&xml) else {
            panic!("expecting an invalid flow statistics entry");
        };
        assert_eq!(index, 1);
        assert_eq!(
            source,
            AttributeError::Missing {
                attribute: ATTR_RX_PACKETS
            }
        );
    }

    #[test]
    fn invalid_classifier_entry() {
        let xml = document(
            &[flow("1", 1, 1, "1 ns", 1, "0 ns", "1 ns")],
            &[r#"<Flow flowId="1" destinationAddress="10.0.0.2"/>"#.to_owned()],
        );

        let Err(ReportError::Classifier { index, source }) = FlowReport::parse(&xml) else {
            panic!("expecting an invalid flow classifier entry");
        };
        assert_eq!(index, 0);
        assert_eq!(
            source,
            AttributeError::Missing {
                attribute: ATTR_SOURCE_ADDRESS
            }
        );
    }

    #[test]
    fn from_missing_path() {
        let err = FlowReport::from_path("/nonexistent/flowmon.xml").unwrap_err();

        assert!(matches!(err, ReportError::Io { .. }));
        assert_eq!(err.to_string(), "failed to read report `/nonexistent/flowmon.xml'");
    }

    #[test]
    fn to_table() {
        let xml = document(
            &[
                flow("1", 100, 90, "900000 ns", 135_000, "0 ns", "1000000000 ns"),
                flow("2", 5, 0, "+0ns", 0, "+1e+09ns", "+0ns"),
            ],
            &[classifier("1", "10.0.0.1", "10.0.0.2")],
        );
        let table = FlowReport::parse(&xml).unwrap().to_table();

        let headers: Vec<_> = table.columns().iter().map(|column| column.name()).collect();
        assert_eq!(headers, COLUMNS);
        assert_eq!(table.len(), 2);

        let second = &table.rows()[1];
        assert_eq!(second[0], Cell::from("2"));
        assert_eq!(second[3], Cell::Signed(5));
        assert_eq!(second[4], Cell::Float(0.0));
        assert_eq!(second[5], Cell::Float(0.0));
        assert_eq!(second[6], Cell::Empty);
        assert_eq!(second[7], Cell::Empty);
    }

    /// randomly generated flows keep one row per entry and the
    /// zero fallbacks of the round trip time and throughput
    #[test]
    fn random_reports() {
        let mut rng = ChaChaRng::seed_from_u64(42);

        for _ in 0..50 {
            let flows_count = (rng.next_u64() % 20) as usize;
            let classifiers_count = (rng.next_u64() % 30) as usize;

            let mut flows = Vec::with_capacity(flows_count);
            let mut expected = Vec::with_capacity(flows_count);
            for id in 0..flows_count {
                let tx = rng.next_u64() % 1_000;
                let rx = if rng.next_u64() % 4 == 0 { 0 } else { rng.next_u64() % 1_000 };
                let first = (rng.next_u64() % 10_000) as f64;
                let last = (rng.next_u64() % 10_000) as f64;
                let delay = format!("{} ns", rng.next_u64() % 1_000_000);

                flows.push(flow(
                    &id.to_string(),
                    tx,
                    rx,
                    &delay,
                    rx * 100,
                    &format!("{first} ns"),
                    &format!("+{last}ns"),
                ));
                expected.push((rx, last - first));
            }
            let classifiers: Vec<_> = (0..classifiers_count)
                .map(|id| classifier(&id.to_string(), "10.0.0.1", "10.0.0.2"))
                .collect();

            let report = FlowReport::parse(&document(&flows, &classifiers)).unwrap();

            assert_eq!(report.len(), flows_count);
            for (row, (rx, duration)) in report.rows().iter().zip(expected) {
                if rx == 0 {
                    assert_eq!(row.round_trip_time.as_millis(), 0.0);
                }
                if duration <= 0.0 {
                    assert_eq!(row.throughput.as_bps(), 0.0);
                }
                let id: usize = row.flow_id.as_str().parse().unwrap();
                assert_eq!(row.is_classified(), id < classifiers_count);
            }
        }
    }
}
