//! Translation of indexed records into the exported [`Node`] shape.

use node_manager_sdk::{Node, NodeAddressType, NodeRecord};

use crate::domain::error::DomainError;
use crate::domain::node_index::{IndexState, LocationEntry, NodeIndex};

/// Result of one export pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Export {
    pub nodes: Vec<Node>,
    /// Address facts left out because their type is not exported.
    pub dropped_facts: usize,
}

/// Build the wire node for one record.
///
/// External IPs go to `addresses` and hostnames to `dns_names`, both in
/// record order. Every other fact type is logged and counted in `dropped`:
/// internal IPs at debug level since every discovered record carries them,
/// anything else as a warning.
pub fn to_wire(record: &NodeRecord, dropped: &mut usize) -> Node {
    let mut node = Node {
        endpoint: record.endpoint.clone(),
        location: record.location.clone(),
        name: record.cluster_name.clone(),
        uuid: record.uuid.hyphenated().to_string(),
        addresses: Vec::new(),
        dns_names: Vec::new(),
    };

    for address in &record.addresses {
        match address.kind {
            NodeAddressType::ExternalIp => node.addresses.push(address.address.clone()),
            NodeAddressType::Hostname => node.dns_names.push(address.address.clone()),
            NodeAddressType::InternalIp => {
                tracing::debug!(
                    uuid = %record.uuid,
                    address = %address.address,
                    "Internal IP is not exported, dropping"
                );
                *dropped += 1;
            }
            NodeAddressType::ExternalDns | NodeAddressType::InternalDns => {
                tracing::warn!(
                    uuid = %record.uuid,
                    kind = ?address.kind,
                    "Unknown/unsupported address type, dropping from export"
                );
                *dropped += 1;
            }
        }
    }

    node
}

fn export_location(location: &LocationEntry, out: &mut Export) {
    for record in location.records() {
        let node = to_wire(record, &mut out.dropped_facts);
        out.nodes.push(node);
    }
}

fn export_state(
    state: &IndexState,
    endpoint: Option<&str>,
    location: Option<&str>,
) -> Result<Export, DomainError> {
    let mut out = Export::default();

    match (endpoint, location) {
        (Some(endpoint), Some(location)) => {
            export_location(state.location(endpoint, location)?, &mut out);
        }
        (Some(endpoint), None) => {
            for location in state.endpoint(endpoint)?.locations() {
                export_location(location, &mut out);
            }
        }
        (None, location) => {
            if let Some(location) = location {
                tracing::debug!(location, "Location filter without endpoint, exporting all nodes");
            }
            for endpoint in state.endpoints() {
                for location in endpoint.locations() {
                    export_location(location, &mut out);
                }
            }
        }
    }

    Ok(out)
}

/// Export the nodes matching the filters.
///
/// Both filters select one location, an endpoint alone selects all of its
/// locations, and no filter selects the whole index. A location filter
/// without an endpoint is ignored. The index lock is held for the whole pass.
///
/// # Errors
///
/// Returns `EndpointNotFound` or `LocationNotFound` when a filter matches
/// nothing. An empty index with no filters is not an error.
pub fn export(
    index: &NodeIndex,
    endpoint: Option<&str>,
    location: Option<&str>,
) -> Result<Export, DomainError> {
    index.read(|state| export_state(state, endpoint, location))
}
