use super::{AttributeError, FlowId, attribute};
use crate::defaults::{ATTR_DESTINATION_ADDRESS, ATTR_FLOW_ID, ATTR_SOURCE_ADDRESS};
use roxmltree::Node;

/// The endpoints of a flow, as classified by the flow monitor.
///
/// Addresses are kept as written in the report.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlowClassifier {
    pub id: FlowId,
    pub source_address: String,
    pub destination_address: String,
}

impl FlowClassifier {
    /// read a `<Flow>` entry of the `<Ipv4FlowClassifier>` element
    pub fn from_node(node: Node<'_, '_>) -> Result<Self, AttributeError> {
        Ok(Self {
            id: FlowId::new(attribute(node, ATTR_FLOW_ID)?),
            source_address: attribute(node, ATTR_SOURCE_ADDRESS)?.to_owned(),
            destination_address: attribute(node, ATTR_DESTINATION_ADDRESS)?.to_owned(),
        })
    }
}
