//! Configuration for the static inventory plugin.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticInventoryPluginConfig {
    /// Management endpoints and everything filed under them.
    pub endpoints: Vec<EndpointConfig>,
}

/// A management endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// Endpoint address, used as the first level of the location tree.
    pub address: String,

    /// Treat the endpoint as unreachable. Lookups that could only be
    /// answered by it fail with `Unavailable` instead of `NotFound`.
    #[serde(default)]
    pub unreachable: bool,

    #[serde(default)]
    pub locations: Vec<LocationConfig>,
}

/// A location (datacenter) under an endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationConfig {
    pub name: String,

    #[serde(default)]
    pub machines: Vec<MachineConfig>,
}

/// A virtual machine backing a cluster node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    /// Hardware UUID as the inventory reports it. Any spelling accepted by
    /// [`Uuid::parse_str`].
    pub uuid: Uuid,

    /// Cluster node name, matched by name lookups.
    pub name: String,

    /// Guest hostname reported by the tools agent.
    #[serde(default)]
    pub hostname: String,

    #[serde(default)]
    pub nics: Vec<NicConfig>,

    /// Simulate unreadable guest properties.
    #[serde(default)]
    pub properties_unavailable: bool,
}

/// A guest network interface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NicConfig {
    /// Addresses as reported by the guest, unfiltered.
    pub ip_addresses: Vec<String>,
}
