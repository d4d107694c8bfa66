//! Deterministic addresses of the module parts attached to an account.

use crate::encode_call;
use hex_literal::hex;
use primitive_types::H160;
use web3::{
    ethabi::{encode, Token},
    signing,
};

/// The canonical module proxy factory, deployed at the same address on every
/// supported network.
pub const MODULE_PROXY_FACTORY: H160 = H160(hex!("000000000000aDdB49795b0f9bA5BC298cDda236"));

/// The delay modifier implementation every account's delay module proxies to.
const DELAY_SINGLETON: H160 = H160(hex!("d62129bf40cd1694b3d9d9847367783a1a4d5cb4"));

/// The fixed factory nonce used when deploying account parts. One delay module
/// per account.
const SALT_NONCE: [u8; 32] = [0; 32];

/// Predicts the address of the delay module attached to the given account.
///
/// The module is a minimal proxy deployed through the module proxy factory
/// with CREATE2, so its address is a pure function of the factory, the proxy
/// init code and the setup parameters.
pub fn predict_delay_address(account: H160) -> H160 {
    let salt = {
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(&signing::keccak256(&set_up_call(account)));
        preimage[32..].copy_from_slice(&SALT_NONCE);
        signing::keccak256(&preimage)
    };
    create2_target_address(MODULE_PROXY_FACTORY, &salt, &proxy_init_code_digest())
}

/// The initializer the account factory passes when deploying the delay
/// module. The proxy address commits to these exact bytes. Owner, avatar and
/// target all start out as the account itself.
fn set_up_call(account: H160) -> Vec<u8> {
    let parameters = encode(&[
        Token::Address(account),
        Token::Address(account),
        Token::Address(account),
    ]);
    encode_call(b"setUp(bytes)", &[Token::Bytes(parameters)])
}

/// Digest of the minimal proxy creation code pointing at the delay singleton.
fn proxy_init_code_digest() -> [u8; 32] {
    let mut init_code = [0u8; 54];
    init_code[..19].copy_from_slice(&hex!("602d8060093d393df3363d3d373d3d3d363d73"));
    init_code[19..39].copy_from_slice(DELAY_SINGLETON.as_bytes());
    init_code[39..].copy_from_slice(&hex!("5af43d82803e903d91602b57fd5bf3"));
    signing::keccak256(&init_code)
}

fn create2_target_address(creator: H160, salt: &[u8; 32], init_code_digest: &[u8; 32]) -> H160 {
    let mut preimage = [0xff; 85];
    preimage[1..21].copy_from_slice(creator.as_bytes());
    preimage[21..53].copy_from_slice(salt);
    preimage[53..85].copy_from_slice(init_code_digest);
    H160::from_slice(&signing::keccak256(&preimage)[12..])
}
