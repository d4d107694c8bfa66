//! The typed-data envelope handed to signing callbacks.
//!
//! The envelope carries everything an external signer needs: the domain, the
//! type schema and the message, in the shape expected by `eth_signTypedData`.
//! For local signers it can also compute the EIP-712 struct hash and signing
//! digest directly. Only the flat value types emitted by this workspace are
//! supported; there is no encoding of nested structs or arrays.

use crate::{signature::hashed_eip712_message, DomainSeparator};
use anyhow::{bail, Context as _, Result};
use primitive_types::{H160, U256};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use web3::signing;

/// An EIP-712 domain scoped by chain id and verifying contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    pub chain_id: u64,
    pub verifying_contract: H160,
}

impl Eip712Domain {
    pub fn separator(&self) -> DomainSeparator {
        DomainSeparator::new(self.chain_id, self.verifying_contract)
    }
}

/// A single field of a typed-data struct definition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TypedDataField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TypedDataField {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// A complete domain/types/message triple.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    pub domain: Eip712Domain,
    pub types: BTreeMap<String, Vec<TypedDataField>>,
    pub primary_type: String,
    pub message: Value,
}

impl TypedData {
    /// Computes the EIP-712 hash of the primary struct.
    pub fn struct_hash(&self) -> Result<[u8; 32]> {
        let fields = self
            .types
            .get(&self.primary_type)
            .with_context(|| format!("no type definition for {:?}", self.primary_type))?;

        let mut buffer = Vec::with_capacity(32 * (fields.len() + 1));
        buffer.extend_from_slice(&signing::keccak256(
            encode_type(&self.primary_type, fields).as_bytes(),
        ));
        for field in fields {
            let value = self
                .message
                .get(&field.name)
                .with_context(|| format!("message is missing field {:?}", field.name))?;
            buffer.extend_from_slice(&encode_value(&field.kind, value)?);
        }
        Ok(signing::keccak256(&buffer))
    }

    /// Computes the 32-byte message the signing callback is expected to sign.
    pub fn signing_digest(&self) -> Result<[u8; 32]> {
        Ok(hashed_eip712_message(
            &self.domain.separator(),
            &self.struct_hash()?,
        ))
    }
}

fn encode_type(name: &str, fields: &[TypedDataField]) -> String {
    let fields = fields
        .iter()
        .map(|field| format!("{} {}", field.kind, field.name))
        .collect::<Vec<_>>()
        .join(",");
    format!("{name}({fields})")
}

/// Encodes a single message value to its 32-byte EIP-712 data word.
fn encode_value(kind: &str, value: &Value) -> Result<[u8; 32]> {
    let mut word = [0u8; 32];
    match kind {
        "address" => {
            let bytes = hex_bytes(value)?;
            anyhow::ensure!(bytes.len() == 20, "address must be 20 bytes");
            word[12..].copy_from_slice(&bytes);
        }
        "bytes32" => {
            let bytes = hex_bytes(value)?;
            anyhow::ensure!(bytes.len() == 32, "bytes32 must be 32 bytes");
            word.copy_from_slice(&bytes);
        }
        // Dynamic byte strings are encoded as the hash of their contents.
        "bytes" => word = signing::keccak256(&hex_bytes(value)?),
        "uint256" => {
            let value = match value {
                Value::Number(number) => U256::from(
                    number
                        .as_u64()
                        .context("uint256 number must be an unsigned integer")?,
                ),
                Value::String(s) => U256::from_dec_str(s)
                    .map_err(|err| anyhow::anyhow!("invalid decimal uint256 {s:?}: {err:?}"))?,
                _ => bail!("uint256 must be a number or decimal string"),
            };
            value.to_big_endian(&mut word);
        }
        _ => bail!("unsupported typed data field type {kind:?}"),
    }
    Ok(word)
}

fn hex_bytes(value: &Value) -> Result<Vec<u8>> {
    let s = value.as_str().context("expected a hex string")?;
    let s = s
        .strip_prefix("0x")
        .with_context(|| format!("{s:?} is missing the '0x' prefix"))?;
    hex::decode(s).with_context(|| format!("failed to decode {s:?} as hex"))
}
