use std::sync::Arc;

use node_manager_sdk::{LookupMode, Node, NodeManagerClient, NodeManagerError, NodeRecord};

use crate::domain::service::Service;

/// Local client implementation for the node manager
pub struct NodeManagerLocalClient {
    service: Arc<Service>,
}

impl NodeManagerLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait::async_trait]
impl NodeManagerClient for NodeManagerLocalClient {
    async fn list_nodes(
        &self,
        endpoint: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Node>, NodeManagerError> {
        self.service
            .list_nodes(endpoint, location)
            .map_err(Into::into)
    }

    async fn get_node(
        &self,
        endpoint: &str,
        location: &str,
        uuid: &str,
    ) -> Result<NodeRecord, NodeManagerError> {
        self.service
            .get_node(endpoint, location, uuid)
            .map(|r| NodeRecord::clone(&r))
            .map_err(Into::into)
    }

    async fn find_node_by_name(&self, name: &str) -> Result<NodeRecord, NodeManagerError> {
        self.service
            .find_node_by_name(name)
            .map(|r| NodeRecord::clone(&r))
            .map_err(Into::into)
    }

    async fn discover_node(
        &self,
        node_id: &str,
        mode: LookupMode,
    ) -> Result<NodeRecord, NodeManagerError> {
        self.service
            .discover_node(node_id, mode)
            .await
            .map(|r| NodeRecord::clone(&r))
            .map_err(Into::into)
    }
}
