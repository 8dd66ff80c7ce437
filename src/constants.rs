//! Application constants
//!
//! Centralized location for contract method names and policy defaults.

/// Donation pre-filled in the form and used when the field is blank
pub const SUGGESTED_DONATION: &str = "0";

/// Gas attached to every `addMessage` call (3 * 10^13)
pub const BOATLOAD_OF_GAS: u64 = 30_000_000_000_000;

/// View method returning every stored message
pub const GET_MESSAGES_METHOD: &str = "getMessages";

/// Change method appending a message
pub const ADD_MESSAGE_METHOD: &str = "addMessage";

/// Decimal places of one NEAR expressed in yoctoNEAR
pub const NEAR_NOMINATION_EXP: usize = 24;

/// Default RPC endpoint
pub const DEFAULT_NODE_URL: &str = "https://rpc.testnet.near.org";

/// Default network id
pub const DEFAULT_NETWORK_ID: &str = "testnet";

/// Default guest book contract
pub const DEFAULT_CONTRACT_ID: &str = "guest-book.testnet";

/// Application name
pub const APP_NAME: &str = "NEAR Guest Book";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
