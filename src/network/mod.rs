//! Network layer - JSON-RPC queries and transaction submission
//!
//! The Network actor receives commands from the App layer, runs them
//! against the RPC provider and the wallet selector, and sends back
//! responses tagged with the command's request id.

pub mod actor;
pub mod client;
pub mod guestbook;

pub use actor::NetworkActor;
pub use client::{JsonRpcProvider, RpcProvider};
