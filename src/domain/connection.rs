//! The seam between the domain logic and the network.

use solana_program::{hash::Hash, pubkey::Pubkey};

/// A per-request handle to a Solana RPC endpoint.
///
/// Implementations do the actual network work; the domain layer only asks for names and
/// blockhashes.
#[async_trait::async_trait]
pub trait Connection: Send + Sync {
    /// Looks up the owner of a normalized SNS name (no `.sol` suffix).
    ///
    /// `Ok(None)` means the name is not registered.
    async fn lookup_owner(&self, name: &str) -> anyhow::Result<Option<Pubkey>>;

    /// Fetches a recent blockhash for compiling a transaction message.
    async fn latest_blockhash(&self) -> anyhow::Result<Hash>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> anyhow::Result<()>;
}

/// Creates a fresh `Connection` for every request.
pub trait Connector: Send + Sync {
    fn connect(&self) -> Box<dyn Connection>;
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// In-memory connection: answers lookups from a fixed owner and records every name asked.
    #[derive(Clone, Default)]
    pub struct StubConnection {
        pub owner: Option<Pubkey>,
        pub fail_with: Option<String>,
        pub blockhash: Hash,
        pub seen: Arc<Mutex<Vec<String>>>,
    }

    impl StubConnection {
        pub fn owned_by(owner: Pubkey) -> Self {
            Self {
                owner: Some(owner),
                ..Self::default()
            }
        }

        pub fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Connection for StubConnection {
        async fn lookup_owner(&self, name: &str) -> anyhow::Result<Option<Pubkey>> {
            self.seen.lock().unwrap().push(name.to_string());
            if let Some(msg) = &self.fail_with {
                return Err(anyhow::anyhow!(msg.clone()));
            }
            Ok(self.owner)
        }

        async fn latest_blockhash(&self) -> anyhow::Result<Hash> {
            Ok(self.blockhash)
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }
}
