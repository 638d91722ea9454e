//! RPC endpoint check.
//!
//! Checks that the supplied endpoint serves the expected chain and answers
//! `eth_createAccessList` for a `getRate()` call on the rate provider.

use std::str::FromStr;

use ethers_core::types::{
    transaction::eip2718::TypedTransaction, Address as EthAddress, Bytes, TransactionRequest, U256,
};
use ethers_providers::{Http, Middleware, Provider};
use tracing::debug;

use rpmon_core::{Address, ChainDescriptor, Result, RpmonError};

/// `bytes4(keccak256("getRate()"))`
pub const GET_RATE_SELECTOR: [u8; 4] = [0x67, 0x9a, 0xef, 0xce];

pub struct RpcCheck {
    provider: Provider<Http>,
}

impl RpcCheck {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| RpmonError::Rpc(format!("Invalid RPC URL: {}", e)))?;
        Ok(Self { provider })
    }

    /// Run both checks against `chain`.
    pub async fn check(&self, chain: &ChainDescriptor, rate_provider: &Address) -> Result<()> {
        self.check_chain_id(chain).await?;
        self.check_access_list(rate_provider).await
    }

    async fn check_chain_id(&self, chain: &ChainDescriptor) -> Result<()> {
        let reported = self
            .provider
            .get_chainid()
            .await
            .map_err(|e| RpmonError::Rpc(format!("eth_chainId failed: {}", e)))?;
        debug!(reported = %reported, expected = chain.id, "chain id");

        if reported != U256::from(chain.id) {
            return Err(RpmonError::Rpc(format!(
                "endpoint serves chain id {} but {} is chain id {}",
                reported, chain.name, chain.id
            )));
        }
        Ok(())
    }

    async fn check_access_list(&self, rate_provider: &Address) -> Result<()> {
        let to = EthAddress::from_str(rate_provider.as_str()).map_err(|_| {
            RpmonError::Rpc(format!("{} is not a 20-byte hex address", rate_provider))
        })?;
        let tx: TypedTransaction = TransactionRequest::new()
            .to(to)
            .data(Bytes::from(GET_RATE_SELECTOR.to_vec()))
            .into();

        let access_list = self
            .provider
            .create_access_list(&tx, None)
            .await
            .map_err(|e| RpmonError::Rpc(format!("eth_createAccessList failed: {}", e)))?;
        debug!(entries = access_list.access_list.0.len(), "access list");
        Ok(())
    }
}
