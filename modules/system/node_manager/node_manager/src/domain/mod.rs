pub mod discovery;
pub mod error;
pub mod export;
pub mod local_client;
pub mod node_index;
pub mod registration;
pub mod service;
pub mod stats;
pub mod system_uuid;
