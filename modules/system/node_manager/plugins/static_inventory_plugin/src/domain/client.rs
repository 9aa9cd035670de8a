//! Client implementation for the static inventory plugin.
//!
//! Implements `InventoryPluginClient` using the domain service.

use async_trait::async_trait;
use node_manager_sdk::{
    GuestNetworkInfo, InventoryError, InventoryPluginClient, LookupMode, MachineHandle,
    ResolvedMachine,
};

use super::service::Service;

#[async_trait]
impl InventoryPluginClient for Service {
    async fn resolve(
        &self,
        node_id: &str,
        mode: LookupMode,
    ) -> Result<ResolvedMachine, InventoryError> {
        let (handle, machine) = self.find(node_id, mode)?;
        tracing::debug!(
            node_id,
            lookup = %mode,
            machine = %handle,
            endpoint = %machine.endpoint,
            location = %machine.location,
            "Resolved machine from static inventory"
        );
        Ok(Service::resolved(handle, machine))
    }

    async fn fetch_guest_network(
        &self,
        machine: &MachineHandle,
    ) -> Result<GuestNetworkInfo, InventoryError> {
        let found = self
            .machines
            .get(machine)
            .ok_or_else(|| InventoryError::Properties(format!("unknown machine {machine}")))?;

        if found.properties_unavailable {
            return Err(InventoryError::Properties(format!(
                "guest info of {machine} is not reported"
            )));
        }

        Ok(found.guest.clone())
    }
}
