#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Tests for the static inventory plugin through the plugin trait.

use node_manager_sdk::{InventoryError, InventoryPluginClient, LookupMode};
use static_inventory_plugin::{Service, StaticInventoryPluginConfig};

const CONFIG: &str = r#"{
    "endpoints": [
        {
            "address": "vc1",
            "locations": [
                {
                    "name": "dc1",
                    "machines": [
                        {
                            "uuid": "4237b2a1-3c5d-7e8f-9012-3456789abcde",
                            "name": "worker-1",
                            "hostname": "worker-1.local",
                            "nics": [
                                { "ip_addresses": ["10.0.0.1", "fe80::1"] },
                                { "ip_addresses": ["192.168.0.1"] }
                            ]
                        },
                        {
                            "uuid": "42370000-1111-2222-3333-444455556666",
                            "name": "worker-2",
                            "properties_unavailable": true
                        }
                    ]
                }
            ]
        },
        {
            "address": "vc2",
            "locations": [
                {
                    "name": "dc9",
                    "machines": [
                        { "uuid": "4237ffee-aaaa-bbbb-cccc-ddddeeeeffff", "name": "worker-3" }
                    ]
                }
            ]
        }
    ]
}"#;

fn service() -> Service {
    let cfg: StaticInventoryPluginConfig = serde_json::from_str(CONFIG).unwrap();
    Service::from_config(&cfg)
}

#[tokio::test]
async fn test_resolve_by_uuid() {
    let svc = service();

    let resolved = svc
        .resolve("4237b2a1-3c5d-7e8f-9012-3456789abcde", LookupMode::ByUuid)
        .await
        .unwrap();

    assert_eq!(resolved.endpoint, "vc1");
    assert_eq!(resolved.location, "dc1");
    assert_eq!(resolved.node_name, "worker-1");
    assert_eq!(resolved.uuid, "4237b2a1-3c5d-7e8f-9012-3456789abcde");
}

#[tokio::test]
async fn test_resolve_by_name() {
    let svc = service();

    let resolved = svc.resolve("worker-3", LookupMode::ByName).await.unwrap();

    assert_eq!(resolved.endpoint, "vc2");
    assert_eq!(resolved.location, "dc9");
    assert_eq!(resolved.uuid, "4237ffee-aaaa-bbbb-cccc-ddddeeeeffff");
}

#[tokio::test]
async fn test_resolve_miss() {
    let svc = service();

    let err = svc.resolve("worker-9", LookupMode::ByName).await.unwrap_err();

    assert_eq!(err, InventoryError::NotFound("worker-9".to_owned()));
}

#[tokio::test]
async fn test_guest_network_is_reported_unfiltered() {
    let svc = service();
    let resolved = svc.resolve("worker-1", LookupMode::ByName).await.unwrap();

    let guest = svc.fetch_guest_network(&resolved.machine).await.unwrap();

    assert_eq!(guest.hostname, "worker-1.local");
    assert_eq!(guest.nics.len(), 2);
    assert_eq!(guest.nics[0].ip_addresses, vec!["10.0.0.1", "fe80::1"]);
}

#[tokio::test]
async fn test_properties_unavailable() {
    let svc = service();
    let resolved = svc.resolve("worker-2", LookupMode::ByName).await.unwrap();

    let err = svc.fetch_guest_network(&resolved.machine).await.unwrap_err();

    assert!(matches!(err, InventoryError::Properties(_)));
}
