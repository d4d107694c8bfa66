//! Two-phase owner addition through the delay module.
//!
//! Adding an owner is a privileged action: it is first enqueued with an
//! owner-signed module transaction and can only be dispatched after the delay
//! module's cooldown has elapsed. The owner set is kept as a linked list
//! starting at [`model::SENTINEL_ADDRESS`], and a newly added owner is
//! prepended to it.

use crate::{encode_call, parts::predict_delay_address, Operation};
use anyhow::{ensure, Result};
use maplit::btreemap;
use model::{
    typed_data::{Eip712Domain, TypedData, TypedDataField},
    TransactionRequest,
};
use primitive_types::{H160, H256, U256};
use serde_json::json;
use std::future::Future;
use web3::ethabi::Token;

/// The deployed account the action applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AccountConfig {
    pub account: H160,
    pub chain_id: u64,
}

/// Builds the transaction that enqueues the owner addition in the account's
/// delay module.
///
/// The queued module transaction has to be authorized by an existing owner,
/// so the supplied signing callback is invoked once with the typed data to
/// sign and must resolve to the 65 signature bytes. Callback failures are
/// propagated unchanged and no request is produced. The builder does not
/// submit anything.
pub async fn populate_add_owner_enqueue<S, F>(
    config: &AccountConfig,
    new_owner: H160,
    sign: S,
) -> Result<TransactionRequest>
where
    S: FnOnce(TypedData) -> F,
    F: Future<Output = Result<Vec<u8>>>,
{
    let delay = predict_delay_address(config.account);
    let data = queue_call(delay, new_owner);

    let signature = sign(module_tx_typed_data(config.chain_id, delay, &data)).await?;
    ensure!(
        signature.len() == 65,
        "expected a 65 byte ECDSA signature, got {} bytes",
        signature.len(),
    );

    Ok(TransactionRequest {
        to: delay,
        value: U256::zero(),
        // The delay module recovers the signer from the trailing bytes.
        data: [data, signature].concat(),
    })
}

/// Builds the transaction that dispatches a previously enqueued owner
/// addition.
///
/// No signature is required: the call is gated purely by the delay module's
/// cooldown check, and it reverts until the cooldown of the matching enqueue
/// has elapsed.
pub fn populate_add_owner_dispatch(account: H160, new_owner: H160) -> TransactionRequest {
    let delay = predict_delay_address(account);
    TransactionRequest {
        to: delay,
        value: U256::zero(),
        data: execute_call(delay, new_owner),
    }
}

/// The inner instruction installing the new owner into the delay module's
/// owner list.
fn enable_module_call(new_owner: H160) -> Vec<u8> {
    encode_call(b"enableModule(address)", &[Token::Address(new_owner)])
}

fn queue_call(delay: H160, new_owner: H160) -> Vec<u8> {
    encode_call(
        b"execTransactionFromModule(address,uint256,bytes,uint8)",
        &module_tx_tokens(delay, new_owner),
    )
}

fn execute_call(delay: H160, new_owner: H160) -> Vec<u8> {
    encode_call(
        b"executeNextTx(address,uint256,bytes,uint8)",
        &module_tx_tokens(delay, new_owner),
    )
}

fn module_tx_tokens(delay: H160, new_owner: H160) -> [Token; 4] {
    [
        Token::Address(delay),
        Token::Uint(U256::zero()),
        Token::Bytes(enable_module_call(new_owner)),
        Token::Uint(U256::from(Operation::Call as u8)),
    ]
}

/// The typed data an owner signs to authorize a queued module transaction.
fn module_tx_typed_data(chain_id: u64, delay: H160, data: &[u8]) -> TypedData {
    let salt = H256::zero();
    TypedData {
        domain: Eip712Domain {
            chain_id,
            verifying_contract: delay,
        },
        types: btreemap! {
            "ModuleTx".to_string() => vec![
                TypedDataField::new("data", "bytes"),
                TypedDataField::new("salt", "bytes32"),
            ],
        },
        primary_type: "ModuleTx".to_string(),
        message: json!({
            "data": format!("0x{}", hex::encode(data)),
            "salt": format!("0x{}", hex::encode(salt)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use model::{signature::EcdsaSignature, Signer};
    use std::sync::{Arc, Mutex};

    const CHAIN_ID: u64 = 31337;

    fn config() -> AccountConfig {
        AccountConfig {
            account: H160([0xac; 20]),
            chain_id: CHAIN_ID,
        }
    }

    #[tokio::test]
    async fn enqueue_targets_the_delay_module_and_embeds_the_signature() {
        let config = config();
        let new_owner = H160([0x06; 20]);

        let request = populate_add_owner_enqueue(&config, new_owner, |typed| async move {
            assert_eq!(typed.domain.chain_id, CHAIN_ID);
            assert_eq!(
                typed.domain.verifying_contract,
                predict_delay_address(config.account)
            );
            assert_eq!(typed.primary_type, "ModuleTx");
            Ok(vec![0x42; 65])
        })
        .await
        .unwrap();

        assert_eq!(request.to, predict_delay_address(config.account));
        assert_eq!(request.value, U256::zero());
        assert_eq!(&request.data[request.data.len() - 65..], [0x42; 65]);
        // The signed payload is the queueing call itself.
        assert_eq!(
            &request.data[..request.data.len() - 65],
            queue_call(request.to, new_owner),
        );
    }

    #[tokio::test]
    async fn enqueue_propagates_signing_failures() {
        let result = populate_add_owner_enqueue(&config(), H160([0x06; 20]), |_| async {
            Err(anyhow!("signer unavailable"))
        })
        .await;
        assert_eq!(result.unwrap_err().to_string(), "signer unavailable");
    }

    #[tokio::test]
    async fn enqueue_rejects_malformed_signatures() {
        let result = populate_add_owner_enqueue(&config(), H160([0x06; 20]), |_| async {
            Ok(vec![0x42; 64])
        })
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn embedded_signature_recovers_to_the_signing_owner() {
        let signer = Signer::from_bytes(&[0x07; 32]).unwrap();
        let captured = Arc::new(Mutex::new(None));

        let request = populate_add_owner_enqueue(&config(), H160([0x06; 20]), {
            let captured = Arc::clone(&captured);
            move |typed| async move {
                let signature =
                    signer.sign_typed_data(&typed.domain.separator(), &typed.struct_hash()?);
                *captured.lock().unwrap() = Some(typed);
                Ok(signature.to_bytes().to_vec())
            }
        })
        .await
        .unwrap();

        let typed = captured.lock().unwrap().take().unwrap();
        let signature = EcdsaSignature::from_bytes(
            request.data[request.data.len() - 65..].try_into().unwrap(),
        );
        assert_eq!(
            signature.recover(&typed.domain.separator(), &typed.struct_hash().unwrap()),
            Some(signer.address()),
        );
    }

    #[tokio::test]
    async fn enqueue_and_dispatch_reference_the_same_module_and_owner() {
        let config = config();
        let new_owner = H160([0x06; 20]);

        let enqueue = populate_add_owner_enqueue(&config, new_owner, |_| async {
            Ok(vec![0x42; 65])
        })
        .await
        .unwrap();
        let dispatch = populate_add_owner_dispatch(config.account, new_owner);

        assert_eq!(enqueue.to, dispatch.to);
        // Both payloads embed the same owner installation instruction.
        let inner = enable_module_call(new_owner);
        for data in [&enqueue.data, &dispatch.data] {
            assert!(data.windows(inner.len()).any(|window| window == inner));
        }
    }

    #[test]
    fn dispatch_requires_no_signature_material() {
        let dispatch = populate_add_owner_dispatch(H160([0xac; 20]), H160([0x06; 20]));
        assert_eq!(dispatch.data.len() % 32, 4);
        assert_eq!(dispatch.value, U256::zero());
    }
}
