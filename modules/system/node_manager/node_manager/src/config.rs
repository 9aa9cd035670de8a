use serde::{Deserialize, Serialize};

use crate::domain::system_uuid::UuidLayout;

/// Configuration for the node manager module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeManagerConfig {
    /// Textual layout of system UUIDs reported by cluster nodes.
    pub cluster_uuid_layout: UuidLayout,

    /// Run discovery as soon as a node is registered.
    pub discover_on_register: bool,

    /// Drop the discovered record when its node is unregistered.
    ///
    /// Off by default: a record outlives its cluster node until a later
    /// discovery overwrites it. Unregistering a node that was never
    /// registered evicts nothing. A registration whose discovery finishes
    /// after the node was unregistered evicts its own record.
    pub evict_on_unregister: bool,
}

impl Default for NodeManagerConfig {
    fn default() -> Self {
        Self {
            cluster_uuid_layout: UuidLayout::default(),
            discover_on_register: true,
            evict_on_unregister: false,
        }
    }
}
