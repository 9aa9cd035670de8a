#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared fixtures: an in-memory inventory with fault injection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use node_manager::{NodeManagerConfig, Service};
use node_manager_sdk::{
    ClusterNode, GuestNetworkInfo, GuestNic, InventoryError, InventoryPluginClient, LookupMode,
    MachineHandle, ResolvedMachine,
};
use parking_lot::Mutex;
use uuid::Uuid;

/// Inventory-layout UUID of the first test machine.
pub const UUID_1: &str = "4237b2a1-3c5d-7e8f-9012-3456789abcde";
/// The same UUID as reported by the cluster node (mixed-endian).
pub const UUID_1_CLUSTER: &str = "A1B23742-5D3C-8F7E-9012-3456789ABCDE";

pub const UUID_2: &str = "42370000-1111-2222-3333-444455556666";
pub const UUID_2_CLUSTER: &str = "00003742-1111-2222-3333-444455556666";

pub const UUID_3: &str = "4237ffee-aaaa-bbbb-cccc-ddddeeeeffff";

/// Cluster spelling of an inventory UUID.
pub fn cluster_spelling(inventory: &str) -> String {
    let u = Uuid::parse_str(inventory).unwrap();
    Uuid::from_bytes(u.to_bytes_le()).to_string()
}

#[derive(Debug, Clone)]
pub struct MockMachine {
    pub endpoint: String,
    pub location: String,
    pub uuid: String,
    pub name: String,
    pub guest: GuestNetworkInfo,
}

impl MockMachine {
    pub fn new(endpoint: &str, location: &str, uuid: &str, name: &str, ips: &[&str]) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            location: location.to_owned(),
            uuid: uuid.to_owned(),
            name: name.to_owned(),
            guest: GuestNetworkInfo {
                hostname: format!("{name}.local"),
                nics: vec![GuestNic {
                    ip_addresses: ips.iter().map(|ip| (*ip).to_owned()).collect(),
                }],
            },
        }
    }
}

type FetchHook = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct MockInventory {
    machines: Mutex<Vec<MockMachine>>,
    on_fetch: Mutex<Option<FetchHook>>,
    fail_resolve: AtomicBool,
    fail_properties: AtomicBool,
    resolve_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockInventory {
    pub fn new(machines: Vec<MockMachine>) -> Arc<Self> {
        Arc::new(Self {
            machines: Mutex::new(machines),
            ..Self::default()
        })
    }

    /// Add a machine or replace the one with the same UUID.
    pub fn put(&self, machine: MockMachine) {
        let mut machines = self.machines.lock();
        let key = Uuid::parse_str(&machine.uuid).unwrap();
        machines.retain(|m| Uuid::parse_str(&m.uuid).unwrap() != key);
        machines.push(machine);
    }

    pub fn fail_resolve(&self, fail: bool) {
        self.fail_resolve.store(fail, Ordering::SeqCst);
    }

    pub fn fail_properties(&self, fail: bool) {
        self.fail_properties.store(fail, Ordering::SeqCst);
    }

    /// Run `hook` at the start of every guest network fetch.
    pub fn on_fetch(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.on_fetch.lock() = Some(Box::new(hook));
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryPluginClient for MockInventory {
    async fn resolve(
        &self,
        node_id: &str,
        mode: LookupMode,
    ) -> Result<ResolvedMachine, InventoryError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_resolve.load(Ordering::SeqCst) {
            return Err(InventoryError::Unavailable("vc1 unreachable".to_owned()));
        }

        let machines = self.machines.lock();
        let found = machines.iter().find(|m| match mode {
            LookupMode::ByUuid => m.uuid == node_id,
            LookupMode::ByName => m.name == node_id,
        });

        found
            .map(|m| ResolvedMachine {
                endpoint: m.endpoint.clone(),
                location: m.location.clone(),
                uuid: m.uuid.to_uppercase(),
                node_name: m.name.clone(),
                machine: MachineHandle(m.uuid.clone()),
            })
            .ok_or_else(|| InventoryError::NotFound(node_id.to_owned()))
    }

    async fn fetch_guest_network(
        &self,
        machine: &MachineHandle,
    ) -> Result<GuestNetworkInfo, InventoryError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(hook) = self.on_fetch.lock().as_ref() {
            hook();
        }
        if self.fail_properties.load(Ordering::SeqCst) {
            return Err(InventoryError::Properties(format!("guest info of {machine}")));
        }

        let machines = self.machines.lock();
        machines
            .iter()
            .find(|m| m.uuid == machine.0)
            .map(|m| m.guest.clone())
            .ok_or_else(|| InventoryError::Properties(format!("{machine} vanished")))
    }
}

/// Two endpoints, three locations, four machines.
pub fn fleet() -> Vec<MockMachine> {
    vec![
        MockMachine::new("vc1", "dc1", UUID_1, "worker-1", &["10.0.0.1"]),
        MockMachine::new("vc1", "dc1", UUID_2, "worker-2", &["10.0.0.2", "fe80::2"]),
        MockMachine::new("vc1", "dc2", UUID_3, "worker-3", &["10.0.1.3"]),
        MockMachine::new(
            "vc2",
            "dc9",
            "4237abcd-0000-0000-0000-000000000004",
            "worker-4",
            &["10.9.0.4"],
        ),
    ]
}

pub fn create_service(inventory: Arc<MockInventory>) -> Service {
    create_service_with(&NodeManagerConfig::default(), inventory)
}

pub fn create_service_with(cfg: &NodeManagerConfig, inventory: Arc<MockInventory>) -> Service {
    Service::new(cfg, inventory)
}

pub fn cluster_node(name: &str, system_uuid: &str) -> ClusterNode {
    ClusterNode::new(name, system_uuid)
}
