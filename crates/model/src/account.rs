//! Polymorphic account references.
//!
//! Callers pass either a bare address or a local signer wherever an account is
//! expected; both resolve to a plain address.

use crate::{signature::EcdsaSignature, DomainSeparator};
use anyhow::{Context as _, Result};
use primitive_types::H160;
use secp256k1::SecretKey;
use std::fmt;
use web3::signing::{Key as _, SecretKeyRef};

/// A reference to an account, either by address or by a signer that knows its
/// own address.
#[derive(Clone, Eq, PartialEq)]
pub enum Account {
    Address(H160),
    Signer(Signer),
}

impl Account {
    /// Resolves the reference to a plain address.
    pub fn address(&self) -> H160 {
        match self {
            Self::Address(address) => *address,
            Self::Signer(signer) => signer.address(),
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::Address(H160::zero())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Address(address) => f.debug_tuple("Address").field(address).finish(),
            Self::Signer(signer) => f.debug_tuple("Signer").field(&signer.address()).finish(),
        }
    }
}

impl From<H160> for Account {
    fn from(address: H160) -> Self {
        Self::Address(address)
    }
}

impl From<Signer> for Account {
    fn from(signer: Signer) -> Self {
        Self::Signer(signer)
    }
}

/// An in-memory secp256k1 signer.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Signer {
    secret: SecretKey,
}

impl Signer {
    pub fn new(secret: SecretKey) -> Self {
        Self { secret }
    }

    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        Ok(Self {
            secret: SecretKey::from_slice(bytes).context("invalid secret key")?,
        })
    }

    pub fn address(&self) -> H160 {
        SecretKeyRef::new(&self.secret).address()
    }

    /// Signs the specified struct hash under the specified EIP-712 domain.
    pub fn sign_typed_data(
        &self,
        domain_separator: &DomainSeparator,
        struct_hash: &[u8; 32],
    ) -> EcdsaSignature {
        EcdsaSignature::sign(domain_separator, struct_hash, SecretKeyRef::new(&self.secret))
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
