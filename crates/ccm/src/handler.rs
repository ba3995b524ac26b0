//! Chain-family capability set.

use pontoon_host::NativeContext;
use pontoon_header_sync::{SyncBlockHeaderParam, SyncGenesisHeaderParam};

use crate::{errors::CcmError, types::{EntranceParam, MakeTxParam}};

/// The four operations a chain family must provide to be registered
/// with the cross-chain manager.
///
/// Families that keep no on-relay header log (oracle-rooted
/// verification) reject the sync operations with a state error rather
/// than omitting them; the capability set is uniform so dispatch stays
/// a pure table lookup.
pub trait ChainHandler {
    /// Admits the chain's genesis header and initial validator config.
    fn sync_genesis_header(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &SyncGenesisHeaderParam,
    ) -> Result<(), CcmError>;

    /// Admits a batch of consecutive block headers.
    fn sync_block_header(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &SyncBlockHeaderParam,
    ) -> Result<(), CcmError>;

    /// Verifies an inbound cross-chain proof and returns the canonical
    /// instruction.
    fn verify(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &EntranceParam,
    ) -> Result<MakeTxParam, CcmError>;

    /// Stages the outbound payload realizing a verified instruction on
    /// this (destination) chain.
    fn make_transaction(
        &self,
        ctx: &mut NativeContext<'_, '_>,
        param: &MakeTxParam,
    ) -> Result<(), CcmError>;
}
