//! Node Manager SDK
//!
//! This crate provides the public API for the `node_manager` module:
//!
//! - [`NodeManagerClient`] - Public API trait for consumers
//! - [`InventoryPluginClient`] - Inventory collaborator trait for implementations
//! - [`Node`], [`NodeRecord`], [`NodeAddress`] - Node models and wire shape
//! - [`NodeManagerError`], [`InventoryError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use node_manager_sdk::NodeManagerClient;
//!
//! // All nodes filed under one endpoint
//! let nodes = client.list_nodes(Some("vc1.example.com"), None).await?;
//!
//! // Force a fresh lookup of a node by its cluster name
//! let record = client.discover_node("worker-1", LookupMode::ByName).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;

pub use api::NodeManagerClient;
pub use error::{InventoryError, NodeManagerError};
pub use models::{
    ClusterNode, GuestNetworkInfo, GuestNic, LookupMode, MachineHandle, Node, NodeAddress,
    NodeAddressType, NodeRecord, ResolvedMachine,
};
pub use plugin_api::InventoryPluginClient;
