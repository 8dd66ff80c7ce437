//! # Guestbook TUI
//!
//! A terminal guest book for a NEAR smart contract.
//!
//! ## Features
//! - Public message list, loaded on startup, newest first
//! - Account chooser and on-chain balance of the signed-in account
//! - Sign a message with an optional donation through the wallet selector
//! - Stale account answers are discarded when the selection changes
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime) - JSON-RPC provider and wallet selector

pub mod amount;
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;
pub mod wallet;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::AppConfig;
pub use error::GuestbookError;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Account, Message, SubmissionDraft};
pub use network::{JsonRpcProvider, NetworkActor, RpcProvider};
pub use wallet::{LocalSelector, WalletSelector};
