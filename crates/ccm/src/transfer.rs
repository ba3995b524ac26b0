//! Outbound payload staging.

use pontoon_host::{NativeContext, NotifyEvent, MAKE_TX_GAS};
use tracing::info;

use crate::{
    asset,
    errors::CcmError,
    keys,
    types::{MakeTxParam, StagedTransfer},
};

/// Resolves the destination asset and durably stages the encoded
/// transfer payload for external relaying. Submission to the
/// destination chain is a collaborator's responsibility.
pub(crate) fn stage_transaction(
    ctx: &mut NativeContext<'_, '_>,
    param: &MakeTxParam,
) -> Result<(), CcmError> {
    ctx.check_use_gas(MAKE_TX_GAS)?;

    let target_asset = asset::get_asset_binding(
        ctx,
        param.from_chain_id,
        param.to_chain_id,
        &param.from_contract,
    )?;

    let staged = StagedTransfer {
        to_chain_id: param.to_chain_id,
        target_asset,
        to_address: param.to_address.clone(),
        amount: param.amount,
    };
    let key = keys::staged_tx_key(param.to_chain_id, ctx.tx_hash());
    let encoded = borsh::to_vec(&staged).expect("staged transfer encoding is infallible");
    ctx.cache_mut().put(key, encoded);

    info!(
        to_chain_id = param.to_chain_id,
        amount = param.amount,
        "staged outbound transfer"
    );
    let contract = *ctx.current_context().contract();
    ctx.notify(NotifyEvent {
        contract,
        states: vec![
            "makeTransaction".to_owned(),
            param.to_chain_id.to_string(),
            param.amount.to_string(),
        ],
    });
    Ok(())
}
