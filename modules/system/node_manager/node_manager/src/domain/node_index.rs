//! In-memory index of discovered nodes.
//!
//! Three views are kept over the same set of records: by cluster name, by
//! hardware UUID, and the location tree `endpoint -> location -> uuid`. All
//! three share one `Arc<NodeRecord>` per node and are only mutated together
//! under a single lock, so a reader never sees one view ahead of another.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use node_manager_sdk::NodeRecord;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Machines filed under one location of an endpoint.
#[derive(Debug)]
pub struct LocationEntry {
    name: String,
    machines: BTreeMap<Uuid, Arc<NodeRecord>>,
}

impl LocationEntry {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            machines: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records in UUID order.
    pub fn records(&self) -> impl Iterator<Item = &Arc<NodeRecord>> {
        self.machines.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

/// Locations known under one management endpoint.
#[derive(Debug)]
pub struct EndpointEntry {
    address: String,
    locations: BTreeMap<String, LocationEntry>,
}

impl EndpointEntry {
    fn new(address: &str) -> Self {
        Self {
            address: address.to_owned(),
            locations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn locations(&self) -> impl Iterator<Item = &LocationEntry> {
        self.locations.values()
    }
}

/// The state guarded by [`NodeIndex`].
#[derive(Debug, Default)]
pub struct IndexState {
    by_name: HashMap<String, Arc<NodeRecord>>,
    by_uuid: HashMap<Uuid, Arc<NodeRecord>>,
    tree: BTreeMap<String, EndpointEntry>,
}

impl IndexState {
    /// # Errors
    ///
    /// Returns `EndpointNotFound` if nothing was ever filed under `endpoint`.
    pub fn endpoint(&self, endpoint: &str) -> Result<&EndpointEntry, DomainError> {
        self.tree
            .get(endpoint)
            .ok_or_else(|| DomainError::endpoint_not_found(endpoint))
    }

    /// # Errors
    ///
    /// Returns `EndpointNotFound` or `LocationNotFound` for the first
    /// missing level.
    pub fn location(&self, endpoint: &str, location: &str) -> Result<&LocationEntry, DomainError> {
        self.endpoint(endpoint)?
            .locations
            .get(location)
            .ok_or_else(|| DomainError::location_not_found(endpoint, location))
    }

    /// # Errors
    ///
    /// Returns `EndpointNotFound`, `LocationNotFound` or `NodeNotFound` for
    /// the first missing level.
    pub fn node(
        &self,
        endpoint: &str,
        location: &str,
        uuid: &Uuid,
    ) -> Result<&Arc<NodeRecord>, DomainError> {
        self.location(endpoint, location)?
            .machines
            .get(uuid)
            .ok_or_else(|| DomainError::node_not_found(format!("{endpoint}/{location}/{uuid}")))
    }

    /// Endpoints in address order.
    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointEntry> {
        self.tree.values()
    }

    fn insert(&mut self, record: NodeRecord) -> Arc<NodeRecord> {
        let record = Arc::new(record);

        // A re-discovered machine may have moved or been renamed.
        if let Some(prior) = self.by_uuid.get(&record.uuid).cloned() {
            self.unfile(&prior);
        }

        self.by_name
            .insert(record.cluster_name.clone(), Arc::clone(&record));
        self.by_uuid.insert(record.uuid, Arc::clone(&record));
        self.tree
            .entry(record.endpoint.clone())
            .or_insert_with(|| EndpointEntry::new(&record.endpoint))
            .locations
            .entry(record.location.clone())
            .or_insert_with(|| LocationEntry::new(&record.location))
            .machines
            .insert(record.uuid, Arc::clone(&record));

        record
    }

    fn remove(&mut self, uuid: &Uuid) -> Option<Arc<NodeRecord>> {
        let prior = self.by_uuid.remove(uuid)?;
        self.unfile(&prior);
        Some(prior)
    }

    /// Drops the tree leaf and name mapping of `prior`. Containers are kept.
    fn unfile(&mut self, prior: &NodeRecord) {
        if let Some(location) = self
            .tree
            .get_mut(&prior.endpoint)
            .and_then(|e| e.locations.get_mut(&prior.location))
        {
            location.machines.remove(&prior.uuid);
        }

        if self
            .by_name
            .get(&prior.cluster_name)
            .is_some_and(|r| r.uuid == prior.uuid)
        {
            self.by_name.remove(&prior.cluster_name);
        }
    }

    fn leaf_count(&self) -> usize {
        self.tree
            .values()
            .flat_map(|e| e.locations.values())
            .map(LocationEntry::len)
            .sum()
    }
}

/// Concurrent node index. Every operation holds the lock for its full
/// duration.
#[derive(Debug, Default)]
pub struct NodeIndex {
    state: Mutex<IndexState>,
}

impl NodeIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `record.uuid` in all three views,
    /// creating endpoint and location containers on demand.
    pub fn upsert(&self, record: NodeRecord) -> Arc<NodeRecord> {
        let mut state = self.state.lock();
        tracing::debug!(
            node_name = %record.cluster_name,
            uuid = %record.uuid,
            endpoint = %record.endpoint,
            location = %record.location,
            "Upserting node record"
        );
        state.insert(record)
    }

    /// Remove the record for `uuid` from all three views.
    pub fn remove(&self, uuid: &Uuid) -> Option<Arc<NodeRecord>> {
        self.state.lock().remove(uuid)
    }

    /// Records filed under `endpoint/location`.
    ///
    /// # Errors
    ///
    /// Returns `EndpointNotFound` or `LocationNotFound` for the first
    /// missing level.
    pub fn find_location(
        &self,
        endpoint: &str,
        location: &str,
    ) -> Result<Vec<Arc<NodeRecord>>, DomainError> {
        let state = self.state.lock();
        Ok(state
            .location(endpoint, location)?
            .records()
            .cloned()
            .collect())
    }

    /// # Errors
    ///
    /// Returns `EndpointNotFound`, `LocationNotFound` or `NodeNotFound` for
    /// the first missing level.
    pub fn find_node(
        &self,
        endpoint: &str,
        location: &str,
        uuid: &Uuid,
    ) -> Result<Arc<NodeRecord>, DomainError> {
        let state = self.state.lock();
        state.node(endpoint, location, uuid).cloned()
    }

    #[must_use]
    pub fn find_by_uuid(&self, uuid: &Uuid) -> Option<Arc<NodeRecord>> {
        self.state.lock().by_uuid.get(uuid).cloned()
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Arc<NodeRecord>> {
        self.state.lock().by_name.get(name).cloned()
    }

    /// Number of records in the UUID view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().by_uuid.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of leaves in the location tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.state.lock().leaf_count()
    }

    /// Run `f` against the whole index under the lock.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&IndexState) -> R) -> R {
        let state = self.state.lock();
        f(&state)
    }
}
