#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Export of discovered nodes, through the service and the local client.

mod common;

use std::sync::Arc;

use common::{MockInventory, UUID_1, UUID_2, UUID_3, create_service, fleet};
use node_manager::{
    LookupMode, NodeAddressType, NodeManagerClient, NodeManagerLocalClient, Service,
};
use node_manager_sdk::NodeManagerError;

async fn discovered_fleet() -> Service {
    let service = create_service(MockInventory::new(fleet()));
    for machine in fleet() {
        service
            .discover_node(&machine.uuid, LookupMode::ByUuid)
            .await
            .unwrap();
    }
    service
}

#[tokio::test]
async fn test_export_everything() {
    let service = discovered_fleet().await;

    let nodes = service.list_nodes(None, None).unwrap();

    assert_eq!(nodes.len(), 4);
    let endpoints: Vec<_> = nodes.iter().map(|n| n.endpoint.as_str()).collect();
    assert_eq!(endpoints, vec!["vc1", "vc1", "vc1", "vc2"]);
}

#[tokio::test]
async fn test_export_one_endpoint() {
    let service = discovered_fleet().await;

    let nodes = service.list_nodes(Some("vc1"), None).unwrap();

    assert_eq!(nodes.len(), 3);
    assert!(nodes.iter().all(|n| n.endpoint == "vc1"));
    let vc2 = service.list_nodes(Some("vc2"), None).unwrap();
    assert_eq!(vc2.len(), 1);
    assert_eq!(vc2[0].name, "worker-4");
}

#[tokio::test]
async fn test_export_one_location() {
    let service = discovered_fleet().await;

    let nodes = service.list_nodes(Some("vc1"), Some("dc1")).unwrap();

    let uuids: Vec<_> = nodes.iter().map(|n| n.uuid.as_str()).collect();
    assert_eq!(uuids, vec![UUID_2, UUID_1]);
    assert!(nodes.iter().all(|n| n.location == "dc1"));
}

#[tokio::test]
async fn test_filtered_exports_are_subsets_of_the_full_export() {
    let service = discovered_fleet().await;
    let all = service.list_nodes(None, None).unwrap();

    for endpoint in ["vc1", "vc2"] {
        let scoped = service.list_nodes(Some(endpoint), None).unwrap();
        assert!(!scoped.is_empty());
        assert!(scoped.iter().all(|n| all.contains(n)));

        for location in scoped.iter().map(|n| n.location.as_str()) {
            let narrow = service.list_nodes(Some(endpoint), Some(location)).unwrap();
            assert!(!narrow.is_empty());
            assert!(narrow.iter().all(|n| scoped.contains(n)));
        }
    }
}

#[tokio::test]
async fn test_location_filter_without_endpoint_is_ignored() {
    let service = discovered_fleet().await;

    let nodes = service.list_nodes(None, Some("dc2")).unwrap();

    assert_eq!(nodes.len(), 4);
}

#[tokio::test]
async fn test_exported_node_shape() {
    let service = discovered_fleet().await;

    let nodes = service.list_nodes(Some("vc1"), Some("dc2")).unwrap();

    assert_eq!(nodes.len(), 1);
    let node = &nodes[0];
    assert_eq!(node.uuid, UUID_3);
    assert_eq!(node.name, "worker-3");
    assert_eq!(node.addresses, vec!["10.0.1.3"]);
    assert_eq!(node.dns_names, vec!["worker-3.local"]);
    // One internal IP fact per IPv4 address.
    assert_eq!(service.stats().dropped_export_facts, 1);
}

#[tokio::test]
async fn test_internal_facts_are_counted_as_dropped() {
    let service = discovered_fleet().await;
    let internal: usize = service
        .find_location("vc1", "dc1")
        .unwrap()
        .iter()
        .map(|r| {
            r.addresses
                .iter()
                .filter(|a| a.kind == NodeAddressType::InternalIp)
                .count()
        })
        .sum();

    let out = service.export(Some("vc1"), Some("dc1")).unwrap();

    assert_eq!(internal, 2);
    assert_eq!(out.dropped_facts, internal);
    assert_eq!(service.stats().dropped_export_facts, 2);
    assert!(out.nodes.iter().all(|n| !n.addresses.is_empty()));
}

#[tokio::test]
async fn test_export_misses() {
    let service = discovered_fleet().await;

    assert!(service.list_nodes(Some("vc-missing"), None).unwrap_err().is_not_found());
    assert!(
        service
            .list_nodes(Some("vc1"), Some("dc-missing"))
            .unwrap_err()
            .is_not_found()
    );
}

#[tokio::test]
async fn test_empty_index_exports_nothing() {
    let service = create_service(MockInventory::new(fleet()));

    assert!(service.list_nodes(None, None).unwrap().is_empty());
}

#[tokio::test]
async fn test_local_client_maps_errors() {
    let service = Arc::new(discovered_fleet().await);
    let client = NodeManagerLocalClient::new(Arc::clone(&service));

    let nodes = client.list_nodes(Some("vc2"), None).await.unwrap();
    assert_eq!(nodes.len(), 1);

    let err = client.list_nodes(Some("vc9"), None).await.unwrap_err();
    assert_eq!(
        err,
        NodeManagerError::EndpointNotFound {
            endpoint: "vc9".to_owned()
        }
    );

    let err = client.get_node("vc1", "dc7", UUID_1).await.unwrap_err();
    assert!(matches!(err, NodeManagerError::LocationNotFound { .. }));

    let err = client.get_node("vc1", "dc1", "nope").await.unwrap_err();
    assert!(matches!(err, NodeManagerError::InvalidUuid { .. }));

    let record = client.find_node_by_name("worker-2").await.unwrap();
    assert_eq!(record.uuid.to_string(), UUID_2);

    let err = client
        .discover_node("worker-404", LookupMode::ByName)
        .await
        .unwrap_err();
    assert!(matches!(err, NodeManagerError::ResolutionFailed { .. }));
}
