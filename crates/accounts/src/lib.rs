//! Request builders for actions on modular accounts.
//!
//! An account is a modular wallet whose privileged actions are gated by a
//! delay module: an action is first enqueued, then, once the module's cooldown
//! has elapsed, dispatched. The builders here only construct the transaction
//! requests for both phases; submitting them and waiting out the cooldown is
//! the caller's job, and the cooldown itself is enforced on chain.

pub mod add_owner;
pub mod parts;

pub use add_owner::{populate_add_owner_dispatch, populate_add_owner_enqueue, AccountConfig};
pub use model::SENTINEL_ADDRESS;
pub use parts::predict_delay_address;

use web3::{
    ethabi::{encode, Token},
    signing,
};

/// Operation kind of a module transaction.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Operation {
    #[default]
    Call = 0,
    DelegateCall = 1,
}

/// Encodes a function call as its 4-byte selector followed by the ABI encoded
/// arguments.
pub(crate) fn encode_call(signature: &[u8], arguments: &[Token]) -> Vec<u8> {
    let selector = &signing::keccak256(signature)[..4];
    [selector, &encode(arguments)].concat()
}
