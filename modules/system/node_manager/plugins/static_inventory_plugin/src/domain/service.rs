//! Domain service for the static inventory plugin.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use node_manager_sdk::{
    GuestNetworkInfo, GuestNic, InventoryError, LookupMode, MachineHandle, ResolvedMachine,
};
use uuid::Uuid;

use crate::config::StaticInventoryPluginConfig;

/// A machine loaded from configuration.
#[derive(Debug, Clone)]
pub(super) struct StaticMachine {
    pub(super) endpoint: String,
    pub(super) location: String,
    pub(super) uuid: Uuid,
    pub(super) name: String,
    pub(super) guest: GuestNetworkInfo,
    pub(super) properties_unavailable: bool,
}

/// Static inventory service.
///
/// Machines are keyed by handle (`vm-1`, `vm-2`, ... in configuration
/// order) with lookup indexes by UUID and by name. Machines under an
/// unreachable endpoint are not indexed.
pub struct Service {
    pub(super) machines: HashMap<MachineHandle, StaticMachine>,
    by_uuid: HashMap<Uuid, MachineHandle>,
    by_name: HashMap<String, MachineHandle>,
    unreachable: Vec<String>,
}

impl Service {
    /// Creates a new service from configuration.
    ///
    /// When a UUID or a name appears more than once, the first machine
    /// carrying it wins.
    #[must_use]
    pub fn from_config(cfg: &StaticInventoryPluginConfig) -> Self {
        let mut machines = HashMap::new();
        let mut by_uuid = HashMap::new();
        let mut by_name = HashMap::new();
        let mut unreachable = Vec::new();
        let mut next_id = 1usize;

        for endpoint in &cfg.endpoints {
            if endpoint.unreachable {
                unreachable.push(endpoint.address.clone());
                continue;
            }

            for location in &endpoint.locations {
                for machine in &location.machines {
                    let handle = MachineHandle(format!("vm-{next_id}"));
                    next_id += 1;

                    match by_uuid.entry(machine.uuid) {
                        Entry::Occupied(_) => {
                            tracing::warn!(
                                uuid = %machine.uuid,
                                endpoint = %endpoint.address,
                                location = %location.name,
                                "Duplicate machine uuid in static inventory, ignoring"
                            );
                            continue;
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(handle.clone());
                        }
                    }
                    by_name
                        .entry(machine.name.clone())
                        .or_insert_with(|| handle.clone());

                    machines.insert(
                        handle,
                        StaticMachine {
                            endpoint: endpoint.address.clone(),
                            location: location.name.clone(),
                            uuid: machine.uuid,
                            name: machine.name.clone(),
                            guest: GuestNetworkInfo {
                                hostname: machine.hostname.clone(),
                                nics: machine
                                    .nics
                                    .iter()
                                    .map(|nic| GuestNic {
                                        ip_addresses: nic.ip_addresses.clone(),
                                    })
                                    .collect(),
                            },
                            properties_unavailable: machine.properties_unavailable,
                        },
                    );
                }
            }
        }

        tracing::debug!(
            machines = machines.len(),
            unreachable = unreachable.len(),
            "Static inventory loaded"
        );

        Self {
            machines,
            by_uuid,
            by_name,
            unreachable,
        }
    }

    /// Number of indexed machines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Find the machine for `node_id`.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if nothing matched and an endpoint is unreachable
    /// - `NotFound` otherwise
    pub(super) fn find(
        &self,
        node_id: &str,
        mode: LookupMode,
    ) -> Result<(&MachineHandle, &StaticMachine), InventoryError> {
        let handle = match mode {
            LookupMode::ByUuid => Uuid::parse_str(node_id)
                .ok()
                .and_then(|uuid| self.by_uuid.get(&uuid)),
            LookupMode::ByName => self.by_name.get(node_id),
        };

        if let Some((handle, machine)) = handle.and_then(|h| self.machines.get_key_value(h)) {
            return Ok((handle, machine));
        }

        if self.unreachable.is_empty() {
            Err(InventoryError::NotFound(node_id.to_owned()))
        } else {
            Err(InventoryError::Unavailable(format!(
                "{node_id} not found, unreachable endpoints: {}",
                self.unreachable.join(", ")
            )))
        }
    }

    pub(super) fn resolved(handle: &MachineHandle, machine: &StaticMachine) -> ResolvedMachine {
        ResolvedMachine {
            endpoint: machine.endpoint.clone(),
            location: machine.location.clone(),
            uuid: machine.uuid.to_string(),
            node_name: machine.name.clone(),
            machine: handle.clone(),
        }
    }
}
