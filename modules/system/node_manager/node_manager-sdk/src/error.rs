//! Error types for the node manager module.

use thiserror::Error;

/// Errors returned by the node manager API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeManagerError {
    /// No node has ever been filed under this endpoint.
    #[error("endpoint not found: {endpoint}")]
    EndpointNotFound { endpoint: String },

    /// The endpoint exists but has no such location.
    #[error("location '{location}' not found under endpoint '{endpoint}'")]
    LocationNotFound { endpoint: String, location: String },

    /// The requested node is not in the index.
    #[error("node not found: {node}")]
    NodeNotFound { node: String },

    /// The inventory could not place the node on an endpoint and location.
    #[error("failed to resolve node '{node_id}': {reason}")]
    ResolutionFailed { node_id: String, reason: String },

    /// The machine was found but its guest properties could not be read.
    #[error("failed to fetch guest properties for node '{node_id}': {reason}")]
    PropertyFetchFailed { node_id: String, reason: String },

    /// A hardware UUID could not be parsed.
    #[error("invalid hardware uuid: {value}")]
    InvalidUuid { value: String },
}

/// Errors reported by an inventory plugin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// No machine matches the requested identity.
    #[error("machine not found: {0}")]
    NotFound(String),

    /// The management endpoint could not be reached.
    #[error("inventory unavailable: {0}")]
    Unavailable(String),

    /// The machine exists but the requested properties are unreadable.
    #[error("properties unavailable: {0}")]
    Properties(String),
}
