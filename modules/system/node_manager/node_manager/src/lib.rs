//! Node Manager
//!
//! Maps cluster nodes onto the virtual machines backing them and keeps an
//! in-memory index of what was discovered:
//!
//! - a registration front door fed by cluster node add/remove events
//! - a discovery engine that asks the inventory plugin where a machine lives
//!   and what its guest network looks like
//! - a node index searchable by name, by UUID and by
//!   `endpoint -> location -> machine`
//! - an exporter producing the wire [`Node`](node_manager_sdk::Node) shape
//!
//! All state lives in an explicitly constructed [`Service`]; there is no
//! global registry.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::NodeManagerConfig;
pub use domain::error::DomainError;
pub use domain::local_client::NodeManagerLocalClient;
pub use domain::service::Service;
pub use domain::system_uuid::UuidLayout;

pub use node_manager_sdk::{
    ClusterNode, LookupMode, Node, NodeAddress, NodeAddressType, NodeManagerClient, NodeRecord,
};
