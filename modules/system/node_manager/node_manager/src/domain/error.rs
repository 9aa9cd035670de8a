use node_manager_sdk::{InventoryError, NodeManagerError};

/// Domain-level errors for the node manager
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("endpoint not found: {endpoint}")]
    EndpointNotFound { endpoint: String },

    #[error("location '{location}' not found under endpoint '{endpoint}'")]
    LocationNotFound { endpoint: String, location: String },

    #[error("node not found: {node}")]
    NodeNotFound { node: String },

    #[error("failed to resolve node '{node_id}': {source}")]
    ResolutionFailed {
        node_id: String,
        #[source]
        source: InventoryError,
    },

    #[error("failed to fetch guest properties for node '{node_id}': {source}")]
    PropertyFetchFailed {
        node_id: String,
        #[source]
        source: InventoryError,
    },

    #[error("invalid hardware uuid: {value}")]
    InvalidUuid { value: String },
}

impl DomainError {
    pub(crate) fn endpoint_not_found(endpoint: &str) -> Self {
        Self::EndpointNotFound {
            endpoint: endpoint.to_owned(),
        }
    }

    pub(crate) fn location_not_found(endpoint: &str, location: &str) -> Self {
        Self::LocationNotFound {
            endpoint: endpoint.to_owned(),
            location: location.to_owned(),
        }
    }

    pub(crate) fn node_not_found(node: impl Into<String>) -> Self {
        Self::NodeNotFound { node: node.into() }
    }

    /// Lookup misses against the index, as opposed to discovery failures.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EndpointNotFound { .. } | Self::LocationNotFound { .. } | Self::NodeNotFound { .. }
        )
    }
}

impl From<DomainError> for NodeManagerError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::EndpointNotFound { endpoint } => Self::EndpointNotFound { endpoint },
            DomainError::LocationNotFound { endpoint, location } => {
                Self::LocationNotFound { endpoint, location }
            }
            DomainError::NodeNotFound { node } => Self::NodeNotFound { node },
            DomainError::ResolutionFailed { node_id, source } => Self::ResolutionFailed {
                node_id,
                reason: source.to_string(),
            },
            DomainError::PropertyFetchFailed { node_id, source } => Self::PropertyFetchFailed {
                node_id,
                reason: source.to_string(),
            },
            DomainError::InvalidUuid { value } => Self::InvalidUuid { value },
        }
    }
}
