//! Discovery engine: resolves a node against the inventory and files the
//! result in the node index.

use std::net::Ipv4Addr;
use std::sync::Arc;

use node_manager_sdk::{
    GuestNetworkInfo, InventoryPluginClient, LookupMode, NodeAddress, NodeRecord,
};

use crate::domain::error::DomainError;
use crate::domain::node_index::NodeIndex;
use crate::domain::stats::Stats;
use crate::domain::system_uuid;

/// Address facts extracted from a guest network report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressExtraction {
    pub addresses: Vec<NodeAddress>,
    /// Guest addresses that did not parse as IPv4.
    pub skipped: usize,
}

/// Turn guest network properties into address facts.
///
/// Every IPv4 address on every interface yields an external IP, an internal
/// IP and the guest hostname, in that order. Anything that is not a
/// well-formed IPv4 address, IPv6 included, is skipped. Duplicates are kept.
#[must_use]
pub fn extract_addresses(info: &GuestNetworkInfo) -> AddressExtraction {
    let mut extraction = AddressExtraction::default();

    for nic in &info.nics {
        for ip in &nic.ip_addresses {
            if ip.parse::<Ipv4Addr>().is_err() {
                tracing::debug!(address = %ip, "Skipping non-IPv4 guest address");
                extraction.skipped += 1;
                continue;
            }
            extraction.addresses.extend([
                NodeAddress::external_ip(ip.as_str()),
                NodeAddress::internal_ip(ip.as_str()),
                NodeAddress::hostname(info.hostname.as_str()),
            ]);
        }
    }

    extraction
}

/// Resolves node identities into [`NodeRecord`]s.
///
/// Inventory calls are made before the index lock is taken; the lock is only
/// held for the final upsert. A failed discovery leaves any earlier record
/// for the node untouched.
pub struct DiscoveryEngine {
    inventory: Arc<dyn InventoryPluginClient>,
    index: Arc<NodeIndex>,
    stats: Arc<Stats>,
}

impl DiscoveryEngine {
    #[must_use]
    pub fn new(
        inventory: Arc<dyn InventoryPluginClient>,
        index: Arc<NodeIndex>,
        stats: Arc<Stats>,
    ) -> Self {
        Self {
            inventory,
            index,
            stats,
        }
    }

    /// Discover `node_id` and upsert the resulting record.
    ///
    /// With [`LookupMode::ByUuid`] the id is normalized before it reaches
    /// the inventory. No retries are made here.
    ///
    /// # Errors
    ///
    /// - `InvalidUuid` for a malformed UUID, from the caller or the inventory
    /// - `ResolutionFailed` if the inventory cannot place the node
    /// - `PropertyFetchFailed` if the guest properties are unreadable
    pub async fn discover(
        &self,
        node_id: &str,
        mode: LookupMode,
    ) -> Result<Arc<NodeRecord>, DomainError> {
        let result = self.try_discover(node_id, mode).await;
        if let Err(e) = &result {
            self.stats.discovery_failed();
            tracing::error!(node_id = %node_id, lookup = %mode, error = %e, "Node discovery failed");
        }
        result
    }

    async fn try_discover(
        &self,
        node_id: &str,
        mode: LookupMode,
    ) -> Result<Arc<NodeRecord>, DomainError> {
        let lookup_id = match mode {
            LookupMode::ByUuid => system_uuid::canonical_string(node_id)?,
            LookupMode::ByName => node_id.to_owned(),
        };

        let resolved = self
            .inventory
            .resolve(&lookup_id, mode)
            .await
            .map_err(|source| DomainError::ResolutionFailed {
                node_id: lookup_id.clone(),
                source,
            })?;
        let uuid = system_uuid::normalize(&resolved.uuid)?;

        let guest = self
            .inventory
            .fetch_guest_network(&resolved.machine)
            .await
            .map_err(|source| DomainError::PropertyFetchFailed {
                node_id: lookup_id.clone(),
                source,
            })?;

        let AddressExtraction { addresses, skipped } = extract_addresses(&guest);

        tracing::info!(
            node_id = %lookup_id,
            machine = %resolved.machine,
            endpoint = %resolved.endpoint,
            location = %resolved.location,
            "Found node"
        );
        tracing::debug!(
            hostname = %guest.hostname,
            uuid = %uuid,
            addresses = addresses.len(),
            skipped,
            "Collected guest network"
        );

        let record = self.index.upsert(NodeRecord {
            uuid,
            cluster_name: resolved.node_name,
            endpoint: resolved.endpoint,
            location: resolved.location,
            addresses,
            machine: resolved.machine,
        });
        self.stats.discovery_succeeded(skipped);

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node_manager_sdk::{GuestNic, NodeAddressType};

    fn guest(hostname: &str, nics: &[&[&str]]) -> GuestNetworkInfo {
        GuestNetworkInfo {
            hostname: hostname.to_owned(),
            nics: nics
                .iter()
                .map(|ips| GuestNic {
                    ip_addresses: ips.iter().map(|ip| (*ip).to_owned()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn only_ipv4_addresses_produce_facts() {
        let info = guest("h1", &[&["10.0.0.5", "not-an-ip", "::1"]]);

        let extraction = extract_addresses(&info);

        assert_eq!(
            extraction.addresses,
            vec![
                NodeAddress::external_ip("10.0.0.5"),
                NodeAddress::internal_ip("10.0.0.5"),
                NodeAddress::hostname("h1"),
            ]
        );
        assert_eq!(extraction.skipped, 2);
    }

    #[test]
    fn hostname_repeats_for_every_ipv4_address() {
        let info = guest("h1", &[&["10.0.0.1", "10.0.0.2"], &["192.168.1.7"]]);

        let extraction = extract_addresses(&info);

        let hostnames: Vec<_> = extraction
            .addresses
            .iter()
            .filter(|a| a.kind == NodeAddressType::Hostname)
            .collect();
        assert_eq!(hostnames.len(), 3);
        assert_eq!(extraction.addresses.len(), 9);
        assert_eq!(extraction.addresses[6], NodeAddress::external_ip("192.168.1.7"));
    }

    #[test]
    fn ipv4_mapped_ipv6_and_padded_addresses_are_skipped() {
        let info = guest("h1", &[&["::ffff:10.0.0.1", " 10.0.0.1", "10.0.0.256", "fe80::1%eth0"]]);

        let extraction = extract_addresses(&info);

        assert!(extraction.addresses.is_empty());
        assert_eq!(extraction.skipped, 4);
    }

    #[test]
    fn no_interfaces_yields_nothing() {
        let extraction = extract_addresses(&guest("h1", &[]));
        assert_eq!(extraction, AddressExtraction::default());
    }
}
