//! Public API trait for the node manager.
//!
//! Consumers read discovered nodes through this trait and never talk to the
//! inventory directly:
//!
//! ```ignore
//! let client: Arc<dyn NodeManagerClient> = ...;
//!
//! // Everything under one location
//! let nodes = client.list_nodes(Some("vc1"), Some("dc1")).await?;
//!
//! // A single record by its position in the inventory
//! let record = client.get_node("vc1", "dc1", "4237b2a1-3c5d-7e8f-9012-3456789abcde").await?;
//! ```

use async_trait::async_trait;

use crate::error::NodeManagerError;
use crate::models::{LookupMode, Node, NodeRecord};

#[async_trait]
pub trait NodeManagerClient: Send + Sync {
    /// List exported nodes, optionally scoped to an endpoint or an
    /// endpoint and location.
    ///
    /// A location filter is only honored together with an endpoint filter.
    /// An empty index with no filter yields an empty list.
    ///
    /// # Errors
    ///
    /// - `EndpointNotFound` if the endpoint filter matches nothing
    /// - `LocationNotFound` if the location filter matches nothing under the endpoint
    async fn list_nodes(
        &self,
        endpoint: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Node>, NodeManagerError>;

    /// Get a discovered node by endpoint, location and hardware UUID.
    ///
    /// # Errors
    ///
    /// - `EndpointNotFound`, `LocationNotFound` or `NodeNotFound` for the
    ///   first missing level of the path
    /// - `InvalidUuid` if `uuid` does not parse
    async fn get_node(
        &self,
        endpoint: &str,
        location: &str,
        uuid: &str,
    ) -> Result<NodeRecord, NodeManagerError>;

    /// Get a discovered node by its cluster name.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if no discovered node carries this name
    async fn find_node_by_name(&self, name: &str) -> Result<NodeRecord, NodeManagerError>;

    /// Resolve a node against the inventory and refresh its record.
    ///
    /// # Errors
    ///
    /// - `ResolutionFailed` if the inventory cannot place the node
    /// - `PropertyFetchFailed` if the guest properties are unreadable
    /// - `InvalidUuid` for a malformed UUID in [`LookupMode::ByUuid`]
    async fn discover_node(
        &self,
        node_id: &str,
        mode: LookupMode,
    ) -> Result<NodeRecord, NodeManagerError>;
}
