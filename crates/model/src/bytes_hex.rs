//! Serialization of `Vec<u8>` as a `0x`-prefixed hex string.

use serde::{de, Deserialize, Deserializer, Serializer};
use std::borrow::Cow;

pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Cow::<str>::deserialize(deserializer)?;
    let s = s.strip_prefix("0x").ok_or_else(|| {
        de::Error::custom(format!("{s:?} can't be decoded as hex because it does not start with '0x'"))
    })?;
    hex::decode(s).map_err(|err| de::Error::custom(format!("failed to decode {s:?} as hex: {err}")))
}
