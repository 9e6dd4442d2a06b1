// Test Helper Modules
//
// Shared infrastructure for the integration tests:
// - a fake Daraja gateway served over real HTTP on a random port
// - the relay itself, spawned against that fake gateway
// - response assertions and payload factories
//
// Usage (from a test target under tests/integration):
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code, unused_imports)]

pub mod fake_gateway;
pub mod test_server;

// Re-export commonly used types and functions
pub use assertions::*;
pub use fake_gateway::*;
pub use test_data::*;
pub use test_server::*;
