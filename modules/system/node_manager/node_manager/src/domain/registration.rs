//! Registration front door for cluster node add/remove events.
//!
//! Registered nodes are kept in their own store under their own lock. That
//! lock is never held while discovery runs or while the node index lock is
//! taken.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use node_manager_sdk::{ClusterNode, LookupMode, NodeRecord};
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::discovery::DiscoveryEngine;
use crate::domain::error::DomainError;
use crate::domain::node_index::NodeIndex;
use crate::domain::system_uuid::{self, UuidLayout};

/// Declared identity of a cluster node, independent of discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredNode {
    pub name: String,
    /// Normalized hardware UUID.
    pub uuid: Uuid,
    pub registered_at: DateTime<Utc>,
}

/// Outcome of rediscovering one registered node.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub uuid: Uuid,
    pub result: Result<Arc<NodeRecord>, DomainError>,
}

pub struct Registrar {
    nodes: Mutex<HashMap<Uuid, RegisteredNode>>,
    discovery: Arc<DiscoveryEngine>,
    index: Arc<NodeIndex>,
    layout: UuidLayout,
    discover_on_register: bool,
    evict_on_unregister: bool,
}

impl Registrar {
    #[must_use]
    pub fn new(
        discovery: Arc<DiscoveryEngine>,
        index: Arc<NodeIndex>,
        layout: UuidLayout,
        discover_on_register: bool,
        evict_on_unregister: bool,
    ) -> Self {
        Self {
            nodes: Mutex::new(HashMap::new()),
            discovery,
            index,
            layout,
            discover_on_register,
            evict_on_unregister,
        }
    }

    /// Record `node` and discover it.
    ///
    /// Re-registering a UUID overwrites its entry and discovers it again.
    /// The entry is kept when discovery fails. Returns `None` when
    /// discovery on registration is disabled, or when eviction is enabled
    /// and the node was unregistered while its discovery ran. In that case
    /// the freshly written record is evicted again.
    ///
    /// # Errors
    ///
    /// - `InvalidUuid` if the node's system UUID does not parse
    /// - any discovery error, see [`DiscoveryEngine::discover`]
    pub async fn register(
        &self,
        node: &ClusterNode,
    ) -> Result<Option<Arc<NodeRecord>>, DomainError> {
        let uuid = system_uuid::normalize_cluster_uuid(&node.system_uuid, self.layout)?;

        {
            let mut nodes = self.nodes.lock();
            tracing::debug!(node_name = %node.name, uuid = %uuid, "Registering node");
            nodes.insert(
                uuid,
                RegisteredNode {
                    name: node.name.clone(),
                    uuid,
                    registered_at: Utc::now(),
                },
            );
        }

        if !self.discover_on_register {
            return Ok(None);
        }

        let record = self
            .discovery
            .discover(&uuid.to_string(), LookupMode::ByUuid)
            .await?;

        // An unregister that ran during discovery evicted before the upsert.
        if self.evict_on_unregister && !self.is_registered(&uuid) {
            self.index.remove(&uuid);
            tracing::info!(
                node_name = %node.name,
                uuid = %uuid,
                "Node unregistered during discovery, evicted its record"
            );
            return Ok(None);
        }

        Ok(Some(record))
    }

    /// Forget `node`. Unknown nodes are a no-op.
    ///
    /// The discovered record stays in the index unless eviction is enabled
    /// and the node was registered.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUuid` if the node's system UUID does not parse.
    pub fn unregister(&self, node: &ClusterNode) -> Result<Option<RegisteredNode>, DomainError> {
        let uuid = system_uuid::normalize_cluster_uuid(&node.system_uuid, self.layout)?;

        let removed = {
            let mut nodes = self.nodes.lock();
            tracing::debug!(node_name = %node.name, uuid = %uuid, "Unregistering node");
            nodes.remove(&uuid)
        };

        if self.evict_on_unregister && removed.is_some() && self.index.remove(&uuid).is_some() {
            tracing::info!(node_name = %node.name, uuid = %uuid, "Evicted discovered node");
        }

        Ok(removed)
    }

    #[must_use]
    pub fn is_registered(&self, uuid: &Uuid) -> bool {
        self.nodes.lock().contains_key(uuid)
    }

    /// Snapshot of registered nodes, ordered by UUID.
    #[must_use]
    pub fn registered(&self) -> Vec<RegisteredNode> {
        let mut nodes: Vec<_> = self.nodes.lock().values().cloned().collect();
        nodes.sort_by_key(|n| n.uuid);
        nodes
    }

    /// Rediscover every registered node, one at a time.
    ///
    /// The registered set is copied first so nodes can register and
    /// unregister while the refresh runs.
    pub async fn refresh(&self) -> Vec<RefreshOutcome> {
        let uuids: Vec<Uuid> = self.registered().into_iter().map(|n| n.uuid).collect();
        let mut outcomes = Vec::with_capacity(uuids.len());

        for uuid in uuids {
            let result = self
                .discovery
                .discover(&uuid.to_string(), LookupMode::ByUuid)
                .await;
            outcomes.push(RefreshOutcome { uuid, result });
        }

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        tracing::info!(total = outcomes.len(), failed, "Refreshed registered nodes");
        outcomes
    }
}
