//! Host limits and the gas schedule for privileged native operations.

/// Hard cap on the call-frame stack depth.
pub const MAX_CALL_DEPTH: usize = 1024;

/// Gas charged for admitting a genesis header.
pub const SYNC_GENESIS_HEADER_GAS: u64 = 50_000;

/// Gas charged per block header admitted in a sync batch.
pub const SYNC_BLOCK_HEADER_GAS: u64 = 100_000;

/// Gas charged for one cross-chain proof verification.
pub const VERIFY_PROOF_GAS: u64 = 200_000;

/// Gas charged for staging an outbound transfer payload.
pub const MAKE_TX_GAS: u64 = 50_000;

/// Gas charged for registering an asset binding.
pub const REGISTER_ASSET_GAS: u64 = 10_000;
