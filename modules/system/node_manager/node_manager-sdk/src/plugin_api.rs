//! Inventory plugin API.
//!
//! The inventory owns credentials and connections to every management
//! endpoint. The node manager only ever asks two questions of it: where does
//! a machine live, and what does its guest network look like.

use async_trait::async_trait;

use crate::error::InventoryError;
use crate::models::{GuestNetworkInfo, LookupMode, MachineHandle, ResolvedMachine};

#[async_trait]
pub trait InventoryPluginClient: Send + Sync {
    /// Find the endpoint and location currently holding the machine.
    ///
    /// With [`LookupMode::ByUuid`] the `node_id` is passed in canonical
    /// lowercase hyphenated form.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no endpoint holds a matching machine
    /// - `Unavailable` if an endpoint could not be queried
    async fn resolve(
        &self,
        node_id: &str,
        mode: LookupMode,
    ) -> Result<ResolvedMachine, InventoryError>;

    /// Read the guest network properties of a resolved machine.
    ///
    /// # Errors
    ///
    /// - `Properties` if the guest properties cannot be collected
    async fn fetch_guest_network(
        &self,
        machine: &MachineHandle,
    ) -> Result<GuestNetworkInfo, InventoryError>;
}
