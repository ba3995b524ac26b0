//! Asset/contract binding registry.
//!
//! Maps a source-chain asset contract to its counterpart on a
//! destination chain. Bindings are registered by the relay operator and
//! looked up when a verified instruction is turned into an outbound
//! payload.

use pontoon_host::{NativeContext, REGISTER_ASSET_GAS};
use pontoon_primitives::{Address, ChainId};
use tracing::info;

use crate::{errors::CcmError, keys, types::RegisterAssetParam};

/// Registers a binding. Gated on the operator being a transaction
/// witness.
pub fn register_asset(
    ctx: &mut NativeContext<'_, '_>,
    param: &RegisterAssetParam,
    operator: &Address,
) -> Result<(), CcmError> {
    if !ctx.check_witness(operator) {
        return Err(CcmError::Unauthorized(*operator));
    }
    ctx.check_use_gas(REGISTER_ASSET_GAS)?;

    let key = keys::asset_binding_key(param.from_chain_id, param.to_chain_id, &param.from_asset);
    ctx.cache_mut().put(key, param.to_asset.clone());
    info!(
        from_chain_id = param.from_chain_id,
        to_chain_id = param.to_chain_id,
        "registered asset binding"
    );
    Ok(())
}

/// Resolves the destination asset for a source asset, failing with
/// `AssetNotBound` when no binding exists.
pub fn get_asset_binding(
    ctx: &NativeContext<'_, '_>,
    from_chain_id: ChainId,
    to_chain_id: ChainId,
    from_asset: &[u8],
) -> Result<Vec<u8>, CcmError> {
    let key = keys::asset_binding_key(from_chain_id, to_chain_id, from_asset);
    ctx.cache()
        .get(&key)?
        .ok_or(CcmError::AssetNotBound {
            from_chain_id,
            to_chain_id,
        })
}
