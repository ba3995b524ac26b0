//! Bookkeeper chain family: full header sync plus header-rooted proof
//! verification.

use pontoon_chain_store::HeaderStore;
use pontoon_header_sync::{
    sync_block_header, sync_genesis_header, SyncBlockHeaderParam, SyncGenesisHeaderParam,
};
use pontoon_host::{NativeContext, VERIFY_PROOF_GAS};
use pontoon_primitives::Address;

use crate::{
    errors::CcmError,
    handler::ChainHandler,
    transfer::stage_transaction,
    types::{EntranceParam, MakeTxParam},
    verify::verify_with_root,
};

/// Chains with rotating bookkeeper sets and state roots carried in
/// their headers. Proofs are rooted in headers the synchronizer already
/// trusts, so verification never leaves the relay's own log.
#[derive(Copy, Clone, Debug)]
pub struct BookkeeperChain {
    operator: Address,
}

impl BookkeeperChain {
    pub fn new(operator: Address) -> Self {
        Self { operator }
    }
}

impl ChainHandler for BookkeeperChain {
    fn sync_genesis_header(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &SyncGenesisHeaderParam,
    ) -> Result<(), CcmError> {
        sync_genesis_header(ctx, param, &self.operator)?;
        Ok(())
    }

    fn sync_block_header(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &SyncBlockHeaderParam,
    ) -> Result<(), CcmError> {
        sync_block_header(ctx, param)?;
        Ok(())
    }

    fn verify(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &EntranceParam,
    ) -> Result<MakeTxParam, CcmError> {
        ctx.check_use_gas(VERIFY_PROOF_GAS)?;
        let header = {
            let store = HeaderStore::new(ctx.cache_mut());
            store.get_header(param.source_chain_id, param.height)?
        };
        verify_with_root(ctx, param, &header.state_root)
    }

    fn make_transaction(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &MakeTxParam,
    ) -> Result<(), CcmError> {
        stage_transaction(ctx, param)
    }
}
