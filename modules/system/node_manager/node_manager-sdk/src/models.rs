//! Domain models for the node manager module.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a node identity is matched against the inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    /// Match on the machine's hardware UUID.
    #[default]
    ByUuid,
    /// Match on the machine's name, which equals the cluster node name.
    ByName,
}

impl fmt::Display for LookupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByUuid => f.write_str("uuid"),
            Self::ByName => f.write_str("name"),
        }
    }
}

/// Kind of a network fact attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeAddressType {
    ExternalIp,
    InternalIp,
    Hostname,
    ExternalDns,
    InternalDns,
}

/// A typed network fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress {
    #[serde(rename = "type")]
    pub kind: NodeAddressType,
    pub address: String,
}

impl NodeAddress {
    #[must_use]
    pub fn new(kind: NodeAddressType, address: impl Into<String>) -> Self {
        Self {
            kind,
            address: address.into(),
        }
    }

    #[must_use]
    pub fn external_ip(address: impl Into<String>) -> Self {
        Self::new(NodeAddressType::ExternalIp, address)
    }

    #[must_use]
    pub fn internal_ip(address: impl Into<String>) -> Self {
        Self::new(NodeAddressType::InternalIp, address)
    }

    #[must_use]
    pub fn hostname(address: impl Into<String>) -> Self {
        Self::new(NodeAddressType::Hostname, address)
    }
}

/// Opaque reference to a machine inside the inventory.
///
/// Only the plugin that produced it knows how to interpret the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineHandle(pub String);

impl fmt::Display for MachineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a cluster node as declared by the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterNode {
    /// Name assigned by the cluster.
    pub name: String,
    /// System UUID as reported by the node, in the cluster's textual layout.
    pub system_uuid: String,
}

impl ClusterNode {
    #[must_use]
    pub fn new(name: impl Into<String>, system_uuid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_uuid: system_uuid.into(),
        }
    }
}

/// Where the inventory placed a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMachine {
    /// Management endpoint owning the machine.
    pub endpoint: String,
    /// Location within the endpoint the machine is filed under.
    pub location: String,
    /// Hardware UUID as reported by the inventory.
    pub uuid: String,
    /// Machine name, used as the cluster node name.
    pub node_name: String,
    pub machine: MachineHandle,
}

/// One guest network interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestNic {
    #[serde(default)]
    pub ip_addresses: Vec<String>,
}

/// Guest network properties of a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestNetworkInfo {
    pub hostname: String,
    #[serde(default)]
    pub nics: Vec<GuestNic>,
}

/// A discovered node, as held by the node index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Canonical hardware UUID.
    pub uuid: Uuid,
    pub cluster_name: String,
    pub endpoint: String,
    pub location: String,
    /// Network facts in discovery order. Duplicates are kept.
    pub addresses: Vec<NodeAddress>,
    /// Handle the record was discovered through.
    pub machine: MachineHandle,
}

/// Exported node, in the shape served to external readers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub endpoint: String,
    pub location: String,
    pub name: String,
    pub uuid: String,
    /// External IP addresses only.
    pub addresses: Vec<String>,
    /// Hostnames, possibly repeated.
    pub dns_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exported_node_uses_camel_case_on_the_wire() {
        let node = Node {
            endpoint: "vc1".to_owned(),
            location: "dc1".to_owned(),
            name: "worker-1".to_owned(),
            uuid: "4237b2a1-3c5d-7e8f-9012-3456789abcde".to_owned(),
            addresses: vec!["10.0.0.1".to_owned()],
            dns_names: vec!["worker-1.local".to_owned()],
        };

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["dnsNames"][0], "worker-1.local");
        assert_eq!(json["addresses"][0], "10.0.0.1");
        assert!(json.get("dns_names").is_none());
    }

    #[test]
    fn lookup_mode_deserializes_from_snake_case() {
        let mode: LookupMode = serde_json::from_str("\"by_name\"").unwrap();
        assert_eq!(mode, LookupMode::ByName);
        assert_eq!(LookupMode::default(), LookupMode::ByUuid);
    }

    #[test]
    fn address_kind_is_serialized_as_type() {
        let json = serde_json::to_value(NodeAddress::hostname("h1")).unwrap();
        assert_eq!(json["type"], "hostname");
        assert_eq!(json["address"], "h1");
    }
}
