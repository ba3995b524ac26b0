//! Handler registry and dispatch.

use std::{collections::BTreeMap, fmt};

use borsh::BorshDeserialize;
use pontoon_header_sync::{SyncBlockHeaderParam, SyncGenesisHeaderParam};
use pontoon_host::NativeContext;
use pontoon_primitives::{Address, ChainId};

use crate::{
    asset,
    errors::CcmError,
    handler::ChainHandler,
    types::{EntranceParam, MakeTxParam, RegisterAssetParam},
};

/// Cross-chain manager entry point: maps each registered chain ID to
/// its family's handler and forwards the four operations unchanged.
pub struct CcmRouter {
    operator: Address,
    handlers: BTreeMap<ChainId, Box<dyn ChainHandler>>,
}

impl fmt::Debug for CcmRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CcmRouter")
            .field("operator", &self.operator)
            .field("chains", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CcmRouter {
    pub fn new(operator: Address) -> Self {
        Self {
            operator,
            handlers: BTreeMap::new(),
        }
    }

    pub fn operator(&self) -> &Address {
        &self.operator
    }

    /// Registers a chain family under a chain ID.
    ///
    /// # Panics
    ///
    /// Registration happens once at startup; a duplicate chain ID is a
    /// wiring bug and panics.
    pub fn register(&mut self, chain_id: ChainId, handler: Box<dyn ChainHandler>) {
        use std::collections::btree_map::Entry;

        let ent = self.handlers.entry(chain_id);
        if matches!(ent, Entry::Occupied(_)) {
            panic!("ccm: handler already registered for chain {chain_id}");
        }
        ent.or_insert(handler);
    }

    fn handler(&self, chain_id: ChainId) -> Result<&dyn ChainHandler, CcmError> {
        self.handlers
            .get(&chain_id)
            .map(Box::as_ref)
            .ok_or(CcmError::UnknownChain(chain_id))
    }

    pub fn sync_genesis_header(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        input: &[u8],
    ) -> Result<(), CcmError> {
        let param: SyncGenesisHeaderParam = decode_param(input)?;
        self.handler(param.chain_id)?.sync_genesis_header(ctx, &param)
    }

    pub fn sync_block_header(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        input: &[u8],
    ) -> Result<(), CcmError> {
        let param: SyncBlockHeaderParam = decode_param(input)?;
        self.handler(param.chain_id)?.sync_block_header(ctx, &param)
    }

    /// Verifies an inbound proof request, dispatched on the claimed
    /// source chain. The result or error passes through unchanged.
    pub fn verify(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        input: &[u8],
    ) -> Result<MakeTxParam, CcmError> {
        let param: EntranceParam = decode_param(input)?;
        self.handler(param.source_chain_id)?.verify(ctx, &param)
    }

    /// Stages the outbound payload on the destination chain's handler.
    pub fn make_transaction(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &MakeTxParam,
    ) -> Result<(), CcmError> {
        self.handler(param.to_chain_id)?.make_transaction(ctx, param)
    }

    /// Full inbound flow: verify the proof, then stage the resulting
    /// instruction for its destination chain.
    pub fn process_cross_chain_tx(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        input: &[u8],
    ) -> Result<MakeTxParam, CcmError> {
        let make_tx = self.verify(ctx, input)?;
        self.make_transaction(ctx, &make_tx)?;
        Ok(make_tx)
    }

    pub fn register_asset(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        input: &[u8],
    ) -> Result<(), CcmError> {
        let param: RegisterAssetParam = decode_param(input)?;
        asset::register_asset(ctx, &param, &self.operator)
    }
}

fn decode_param<T: BorshDeserialize>(input: &[u8]) -> Result<T, CcmError> {
    borsh::from_slice(input).map_err(|_| CcmError::MalformedParam("undecodable sink bytes"))
}
