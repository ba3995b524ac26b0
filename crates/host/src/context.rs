//! Call-frame stack for native service invocations.

use std::fmt;

use pontoon_primitives::{Address, Buf32};
use tracing::warn;

use crate::{cache::CacheDb, constants::MAX_CALL_DEPTH, errors::HostError};

/// One frame of the native call stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    contract: Address,
}

impl CallFrame {
    pub fn new(contract: Address) -> Self {
        Self { contract }
    }

    pub fn contract(&self) -> &Address {
        &self.contract
    }
}

/// Notification appended by a successful state-changing call, visible in
/// the enclosing transaction's receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifyEvent {
    pub contract: Address,
    pub states: Vec<String>,
}

/// Execution context for one native service invocation.
///
/// Holds the strictly nested frame stack, the gas counter shared by all
/// frames, the transaction's recovered signer addresses, and the
/// stack-wide notification list. The entry frame is pushed at
/// construction and can never be popped.
pub struct NativeContext<'c, 's> {
    cache: &'c mut CacheDb<'s>,
    tx_hash: Buf32,
    signers: Vec<Address>,
    gas_left: u64,
    frames: Vec<CallFrame>,
    notifications: Vec<NotifyEvent>,
    notify_enabled: bool,
}

impl fmt::Debug for NativeContext<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeContext")
            .field("tx_hash", &self.tx_hash)
            .field("gas_left", &self.gas_left)
            .field("depth", &self.frames.len())
            .finish()
    }
}

impl<'c, 's> NativeContext<'c, 's> {
    pub fn new(
        cache: &'c mut CacheDb<'s>,
        tx_hash: Buf32,
        signers: Vec<Address>,
        gas_limit: u64,
        entry_contract: Address,
        notify_enabled: bool,
    ) -> Self {
        Self {
            cache,
            tx_hash,
            signers,
            gas_left: gas_limit,
            frames: vec![CallFrame::new(entry_contract)],
            notifications: Vec::new(),
            notify_enabled,
        }
    }

    /// Pushes a frame for a nested native invocation.
    pub fn push_context(&mut self, contract: Address) -> Result<(), HostError> {
        if self.frames.len() >= MAX_CALL_DEPTH {
            warn!(depth = self.frames.len(), "native call stack exhausted");
            return Err(HostError::CallStackLimit(MAX_CALL_DEPTH));
        }
        self.frames.push(CallFrame::new(contract));
        Ok(())
    }

    /// Pops the current frame. No-op while only the entry frame remains.
    pub fn pop_context(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn current_context(&self) -> &CallFrame {
        self.frames.last().expect("entry frame is never popped")
    }

    /// Second frame from the top, if any.
    pub fn calling_context(&self) -> Option<&CallFrame> {
        self.frames.len().checked_sub(2).map(|i| &self.frames[i])
    }

    pub fn entry_context(&self) -> &CallFrame {
        &self.frames[0]
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Charges `amount` against the shared gas counter.
    pub fn check_use_gas(&mut self, amount: u64) -> Result<(), HostError> {
        if self.gas_left < amount {
            return Err(HostError::OutOfGas {
                needed: amount,
                left: self.gas_left,
            });
        }
        self.gas_left -= amount;
        Ok(())
    }

    /// Authorization gate for privileged native operations: the address
    /// must be a transaction signer, or the calling context's contract
    /// (a contract may authorize itself as caller).
    pub fn check_witness(&self, address: &Address) -> bool {
        if self.signers.contains(address) {
            return true;
        }
        self.calling_context()
            .is_some_and(|frame| frame.contract() == address)
    }

    pub fn notify(&mut self, event: NotifyEvent) {
        if self.notify_enabled {
            self.notifications.push(event);
        }
    }

    pub fn notifications(&self) -> &[NotifyEvent] {
        &self.notifications
    }

    pub fn tx_hash(&self) -> &Buf32 {
        &self.tx_hash
    }

    pub fn signers(&self) -> &[Address] {
        &self.signers
    }

    pub fn gas_left(&self) -> u64 {
        self.gas_left
    }

    pub fn cache(&self) -> &CacheDb<'s> {
        self.cache
    }

    pub fn cache_mut(&mut self) -> &mut CacheDb<'s> {
        self.cache
    }
}
