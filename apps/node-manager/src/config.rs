//! Application configuration.
//!
//! Layered as: defaults, then the YAML file (if given), then environment
//! variables prefixed with `NODE_MANAGER__` (`__` separates nested keys, e.g.
//! `NODE_MANAGER__NODE_MANAGER__EVICT_ON_UNREGISTER=true`).

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use node_manager::NodeManagerConfig;
use node_manager_sdk::ClusterNode;
use serde::{Deserialize, Serialize};
use static_inventory_plugin::StaticInventoryPluginConfig;

use crate::logging::LoggingConfig;

pub const ENV_PREFIX: &str = "NODE_MANAGER__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub node_manager: NodeManagerConfig,
    pub static_inventory: StaticInventoryPluginConfig,
    /// Cluster nodes registered at startup, as the cluster reports them.
    pub cluster_nodes: Vec<ClusterNode>,
}

impl AppConfig {
    /// Load the layered configuration.
    ///
    /// # Errors
    ///
    /// Fails if `path` does not exist or any layer does not deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load config")
    }

    /// Pretty JSON rendering of the effective configuration.
    ///
    /// # Errors
    ///
    /// Fails only if the configuration cannot be serialized.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize config")
    }
}
