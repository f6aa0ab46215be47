//! Flow entries as found in a flow monitor report.
//!
//! A report describes every flow twice, in two independent collections
//! keyed by the same [`FlowId`]:
//!
//! * [`FlowStats`]: the counters collected for the flow;
//! * [`FlowClassifier`]: the endpoints of the flow.

mod classifier;
mod stats;

pub use self::{classifier::FlowClassifier, stats::FlowStats};

use crate::time::{Nanoseconds, NanosecondsParseError};
use roxmltree::Node;
use std::{borrow::Borrow, fmt, num::ParseIntError};
use thiserror::Error;

/// Identifier assigned to a flow by the simulation.
///
/// Opaque: identifiers are compared for equality only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlowId(String);

impl FlowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FlowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FlowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Error returned when a flow entry misses an attribute or carries
/// an attribute that cannot be converted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    #[error("missing attribute `{attribute}'")]
    Missing { attribute: &'static str },
    #[error("attribute `{attribute}' is not an unsigned integer: `{value}'")]
    InvalidInteger {
        attribute: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("attribute `{attribute}' is not a time value")]
    InvalidTime {
        attribute: &'static str,
        #[source]
        source: NanosecondsParseError,
    },
}

fn attribute<'a>(node: Node<'a, '_>, attribute: &'static str) -> Result<&'a str, AttributeError> {
    node.attribute(attribute)
        .ok_or(AttributeError::Missing { attribute })
}

fn counter(node: Node<'_, '_>, attribute: &'static str) -> Result<u64, AttributeError> {
    let value = self::attribute(node, attribute)?;
    value
        .trim()
        .parse()
        .map_err(|source| AttributeError::InvalidInteger {
            attribute,
            value: value.to_owned(),
            source,
        })
}

fn time(node: Node<'_, '_>, attribute: &'static str) -> Result<Nanoseconds, AttributeError> {
    self::attribute(node, attribute)?
        .parse()
        .map_err(|source| AttributeError::InvalidTime { attribute, source })
}
