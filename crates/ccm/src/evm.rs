//! EVM chain family with oracle-rooted verification.
//!
//! Used when no on-relay header log exists for the chain: the block the
//! proof claims to be rooted in is fetched from an external endpoint by
//! height, and the same account/storage verification runs against that
//! block's state root. The fetch is non-deterministic from the relay's
//! point of view, so the dependency is an injected trait: production
//! deployments accept an availability/consistency assumption on the
//! endpoint, and tests supply fixed block data. Implementations must
//! bound the fetch with a timeout and report it as an error; the core
//! never retries.

use std::fmt;

use pontoon_header_sync::{SyncBlockHeaderParam, SyncGenesisHeaderParam};
use pontoon_host::{NativeContext, VERIFY_PROOF_GAS};
use pontoon_primitives::Buf32;
use thiserror::Error;

use crate::{
    errors::CcmError,
    handler::ChainHandler,
    transfer::stage_transaction,
    types::{EntranceParam, MakeTxParam},
    verify::verify_with_root,
};

/// Block fields the oracle-rooted path needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockRef {
    pub hash: Buf32,
    pub state_root: Buf32,
}

/// External fetch failure (unreachable endpoint, unknown height, or
/// timeout). Always a verification failure, never success-by-default.
#[derive(Debug, Error)]
#[error("chain data provider: {0}")]
pub struct ProviderError(pub String);

/// External chain-data fetch service.
pub trait ChainProvider {
    fn block_by_height(&self, height: u64) -> Result<BlockRef, ProviderError>;
}

pub struct EvmOracleChain {
    provider: Box<dyn ChainProvider>,
}

impl fmt::Debug for EvmOracleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvmOracleChain").finish_non_exhaustive()
    }
}

impl EvmOracleChain {
    pub fn new(provider: Box<dyn ChainProvider>) -> Self {
        Self { provider }
    }
}

impl ChainHandler for EvmOracleChain {
    fn sync_genesis_header(
        &self,
        _ctx: &mut NativeContext<'_, '_>,
        param: &SyncGenesisHeaderParam,
    ) -> Result<(), CcmError> {
        Err(CcmError::NoHeaderLog(param.chain_id))
    }

    fn sync_block_header(
        &self,
        _ctx: &mut NativeContext<'_, '_>,
        param: &SyncBlockHeaderParam,
    ) -> Result<(), CcmError> {
        Err(CcmError::NoHeaderLog(param.chain_id))
    }

    fn verify(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &EntranceParam,
    ) -> Result<MakeTxParam, CcmError> {
        ctx.check_use_gas(VERIFY_PROOF_GAS)?;
        let block = self.provider.block_by_height(param.height)?;
        verify_with_root(ctx, param, &block.state_root)
    }

    fn make_transaction(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &MakeTxParam,
    ) -> Result<(), CcmError> {
        stage_transaction(ctx, param)
    }
}
