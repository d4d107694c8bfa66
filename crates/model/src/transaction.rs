//! Transaction requests as plain data.

use crate::{bytes_hex, u256_decimal};
use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};

/// A fully populated transaction request for an external submission layer to
/// send. This layer never submits anything itself.
#[derive(Eq, PartialEq, Clone, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub to: H160,
    #[serde(with = "u256_decimal")]
    pub value: U256,
    #[serde(with = "bytes_hex")]
    pub data: Vec<u8>,
}

impl Debug for TransactionRequest {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("TransactionRequest")
            .field("to", &self.to)
            .field("value", &self.value)
            .field("data", &format_args!("0x{}", hex::encode(&self.data)))
            .finish()
    }
}
