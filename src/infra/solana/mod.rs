//! Solana RPC plumbing and SPL Name Service account layout.

pub mod client;
pub mod sns;

pub use client::{RpcConnection, RpcConnector};
