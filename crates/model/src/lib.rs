//! Plain-data models shared between the deployment normalizer and the account
//! action builders. Nothing in this crate performs I/O; everything is consumed
//! by an external submission or deployment layer.

pub mod account;
pub mod bytes_hex;
pub mod signature;
pub mod transaction;
pub mod typed_data;
pub mod u256_decimal;

pub use account::{Account, Signer};
pub use transaction::TransactionRequest;

use hex::{FromHex, FromHexError};
use lazy_static::lazy_static;
use primitive_types::H160;
use std::fmt;
use web3::{
    ethabi::{encode, Token},
    signing,
};

/// The address used to mark the head and tail of the owner linked list kept by
/// the delay module. Reading the owner set starts the traversal here.
pub const SENTINEL_ADDRESS: H160 = H160([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
]);

#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct DomainSeparator(pub [u8; 32]);

impl std::str::FromStr for DomainSeparator {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(FromHex::from_hex(s)?))
    }
}

impl fmt::Debug for DomainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hex = [0u8; 64];
        // Unwrap because we know the length is correct.
        hex::encode_to_slice(self.0, &mut hex).unwrap();
        // Unwrap because we know it is valid utf8.
        f.write_str(std::str::from_utf8(&hex).unwrap())
    }
}

impl DomainSeparator {
    /// Computes the EIP-712 domain separator used by the modular account
    /// stack. The modules scope their domains by chain id and verifying
    /// contract only; there is no name or version field.
    pub fn new(chain_id: u64, verifying_contract: H160) -> Self {
        lazy_static! {
            /// The EIP-712 domain type used for computing the domain separator.
            static ref DOMAIN_TYPE_HASH: [u8; 32] = signing::keccak256(
                b"EIP712Domain(uint256 chainId,address verifyingContract)",
            );
        }
        let abi_encode_string = encode(&[
            Token::Uint((*DOMAIN_TYPE_HASH).into()),
            Token::Uint(chain_id.into()),
            Token::Address(verifying_contract),
        ]);

        DomainSeparator(signing::keccak256(abi_encode_string.as_slice()))
    }
}
