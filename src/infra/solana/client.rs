// Responsible for all communication with the Solana blockchain.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::{hash::Hash, pubkey::Pubkey};
use solana_sdk::commitment_config::CommitmentConfig;
use std::str::FromStr;

use crate::domain::connection::{Connection, Connector};
use crate::infra::solana::sns::{self, NameOwner};

/// A connection backed by a fresh nonblocking `RpcClient`.
pub struct RpcConnection {
    client: RpcClient,
}

impl RpcConnection {
    pub fn new(rpc_url: &str) -> Self {
        let client =
            RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());
        Self { client }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    /// Current holder of a tokenized domain's NFT, found through the tokenizer's NFT record.
    async fn tokenized_holder(&self, name_account: &Pubkey) -> anyhow::Result<Option<Pubkey>> {
        let record_key = sns::nft_record_key(name_account);
        let Some(record) = self.fetch_account_data(&record_key).await? else {
            return Ok(None);
        };
        let mint = sns::nft_mint_from_record_data(&record)
            .ok_or_else(|| anyhow::anyhow!("Malformed NFT record {}", record_key))?;
        tracing::debug!(%name_account, %mint, "SNS domain is tokenized");

        for balance in self.client.get_token_largest_accounts(&mint).await? {
            if balance.amount.amount != "1" {
                continue;
            }
            let token_account = Pubkey::from_str(&balance.address)?;
            if let Some(data) = self.fetch_account_data(&token_account).await? {
                if let Some(holder) = sns::nft_holder_from_token_account(&data, &mint) {
                    return Ok(Some(holder));
                }
            }
        }
        Ok(None)
    }

    async fn fetch_account_data(&self, key: &Pubkey) -> anyhow::Result<Option<Vec<u8>>> {
        let account = self
            .client
            .get_account_with_commitment(key, self.client.commitment())
            .await?
            .value;
        Ok(account.map(|acct| acct.data))
    }
}

#[async_trait::async_trait]
impl Connection for RpcConnection {
    async fn lookup_owner(&self, name: &str) -> anyhow::Result<Option<Pubkey>> {
        let name_account = sns::domain_key(name)?;
        tracing::debug!(%name, %name_account, "looking up SNS name account");

        let data = self.fetch_account_data(&name_account).await?;

        match data.as_deref().and_then(sns::classify_owner) {
            Some(NameOwner::Direct(owner)) => Ok(Some(owner)),
            Some(NameOwner::Tokenized) => self.tokenized_holder(&name_account).await,
            None => Ok(None),
        }
    }

    async fn latest_blockhash(&self) -> anyhow::Result<Hash> {
        Ok(self.client.get_latest_blockhash().await?)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(self.client.get_health().await?)
    }
}

/// Hands out one `RpcConnection` per request; nothing is pooled.
#[derive(Debug, Clone)]
pub struct RpcConnector {
    rpc_url: String,
}

impl RpcConnector {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
        }
    }
}

impl Connector for RpcConnector {
    fn connect(&self) -> Box<dyn Connection> {
        Box::new(RpcConnection::new(&self.rpc_url))
    }
}
