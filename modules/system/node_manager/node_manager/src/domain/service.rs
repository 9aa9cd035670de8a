use std::sync::Arc;

use node_manager_sdk::{ClusterNode, InventoryPluginClient, LookupMode, Node, NodeRecord};

use crate::config::NodeManagerConfig;
use crate::domain::discovery::DiscoveryEngine;
use crate::domain::error::DomainError;
use crate::domain::export::{self, Export};
use crate::domain::node_index::NodeIndex;
use crate::domain::registration::{RefreshOutcome, RegisteredNode, Registrar};
use crate::domain::stats::{Stats, StatsSnapshot};
use crate::domain::system_uuid;

/// Service for registering, discovering and querying nodes
///
/// Owns the node index and the registration store. Construct one per process
/// and share it behind an `Arc`.
#[derive(Clone)]
pub struct Service {
    index: Arc<NodeIndex>,
    discovery: Arc<DiscoveryEngine>,
    registrar: Arc<Registrar>,
    stats: Arc<Stats>,
}

impl Service {
    #[must_use]
    pub fn new(cfg: &NodeManagerConfig, inventory: Arc<dyn InventoryPluginClient>) -> Self {
        let index = Arc::new(NodeIndex::new());
        let stats = Arc::new(Stats::new());
        let discovery = Arc::new(DiscoveryEngine::new(
            inventory,
            Arc::clone(&index),
            Arc::clone(&stats),
        ));
        let registrar = Arc::new(Registrar::new(
            Arc::clone(&discovery),
            Arc::clone(&index),
            cfg.cluster_uuid_layout,
            cfg.discover_on_register,
            cfg.evict_on_unregister,
        ));

        tracing::info!(
            cluster_uuid_layout = ?cfg.cluster_uuid_layout,
            discover_on_register = cfg.discover_on_register,
            evict_on_unregister = cfg.evict_on_unregister,
            "Node manager service initialized"
        );

        Self {
            index,
            discovery,
            registrar,
            stats,
        }
    }

    /// Handle a node joining the cluster.
    ///
    /// # Errors
    ///
    /// See [`Registrar::register`].
    pub async fn register_node(
        &self,
        node: &ClusterNode,
    ) -> Result<Option<Arc<NodeRecord>>, DomainError> {
        tracing::debug!(node_name = %node.name, "register_node enter");
        let result = self.registrar.register(node).await;
        tracing::debug!(node_name = %node.name, ok = result.is_ok(), "register_node leave");
        result
    }

    /// Handle a node leaving the cluster.
    ///
    /// # Errors
    ///
    /// See [`Registrar::unregister`].
    pub fn unregister_node(&self, node: &ClusterNode) -> Result<Option<RegisteredNode>, DomainError> {
        self.registrar.unregister(node)
    }

    /// # Errors
    ///
    /// See [`DiscoveryEngine::discover`].
    pub async fn discover_node(
        &self,
        node_id: &str,
        mode: LookupMode,
    ) -> Result<Arc<NodeRecord>, DomainError> {
        self.discovery.discover(node_id, mode).await
    }

    /// Rediscover every registered node.
    pub async fn refresh_registered(&self) -> Vec<RefreshOutcome> {
        self.registrar.refresh().await
    }

    /// # Errors
    ///
    /// Returns `EndpointNotFound` or `LocationNotFound` when a filter matches
    /// nothing.
    pub fn export(
        &self,
        endpoint: Option<&str>,
        location: Option<&str>,
    ) -> Result<Export, DomainError> {
        let out = export::export(&self.index, endpoint, location)?;
        self.stats.export_dropped(out.dropped_facts);
        Ok(out)
    }

    /// # Errors
    ///
    /// See [`Service::export`].
    pub fn list_nodes(
        &self,
        endpoint: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Node>, DomainError> {
        self.export(endpoint, location).map(|out| out.nodes)
    }

    /// # Errors
    ///
    /// Returns `EndpointNotFound` or `LocationNotFound` for the first
    /// missing level.
    pub fn find_location(
        &self,
        endpoint: &str,
        location: &str,
    ) -> Result<Vec<Arc<NodeRecord>>, DomainError> {
        self.index.find_location(endpoint, location)
    }

    /// # Errors
    ///
    /// - `InvalidUuid` if `uuid` does not parse
    /// - `EndpointNotFound`, `LocationNotFound` or `NodeNotFound` for the
    ///   first missing level
    pub fn get_node(
        &self,
        endpoint: &str,
        location: &str,
        uuid: &str,
    ) -> Result<Arc<NodeRecord>, DomainError> {
        let uuid = system_uuid::normalize(uuid)?;
        self.index.find_node(endpoint, location, &uuid)
    }

    /// # Errors
    ///
    /// - `InvalidUuid` if `uuid` does not parse
    /// - `NodeNotFound` if nothing was discovered for it
    pub fn find_node_by_uuid(&self, uuid: &str) -> Result<Arc<NodeRecord>, DomainError> {
        let uuid = system_uuid::normalize(uuid)?;
        self.index
            .find_by_uuid(&uuid)
            .ok_or_else(|| DomainError::node_not_found(uuid.to_string()))
    }

    /// # Errors
    ///
    /// Returns `NodeNotFound` if no discovered node carries `name`.
    pub fn find_node_by_name(&self, name: &str) -> Result<Arc<NodeRecord>, DomainError> {
        self.index
            .find_by_name(name)
            .ok_or_else(|| DomainError::node_not_found(name))
    }

    /// Whether a cluster node with this system UUID is currently registered.
    ///
    /// `uuid` is taken in the inventory layout.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUuid` if `uuid` does not parse.
    pub fn is_registered(&self, uuid: &str) -> Result<bool, DomainError> {
        let uuid = system_uuid::normalize(uuid)?;
        Ok(self.registrar.is_registered(&uuid))
    }

    #[must_use]
    pub fn registered_nodes(&self) -> Vec<RegisteredNode> {
        self.registrar.registered()
    }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
