//! Static Inventory Plugin
//!
//! Serves machine placement and guest network data from configuration.
//! Useful for development, demos and tests where no management endpoint is
//! reachable.
//!
//! ## Configuration
//!
//! ```yaml
//! static_inventory:
//!   endpoints:
//!     - address: "vc1.example.com"
//!       locations:
//!         - name: "dc1"
//!           machines:
//!             - uuid: "4237b2a1-3c5d-7e8f-9012-3456789abcde"
//!               name: "worker-1"
//!               hostname: "worker-1.local"
//!               nics:
//!                 - ip_addresses: ["10.0.0.1", "fe80::1"]
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::StaticInventoryPluginConfig;
pub use domain::service::Service;
