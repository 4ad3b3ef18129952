use cosmwasm_std::{Api, Addr, MessageInfo, Uint128};
use pushfeed_common::hashing::{dapi_name_hash, dapi_name_to_bytes32};

use crate::error::ContractError;

/// Decodes a hex field, with or without `0x` prefix.
pub fn decode_hex(input: &str, field: &str) -> Result<Vec<u8>, ContractError> {
    hex::decode(input.trim_start_matches("0x")).map_err(|_| ContractError::InvalidHex {
        field: field.to_string(),
    })
}

/// Decodes a hex field that must be exactly `N` bytes long.
pub fn decode_fixed<const N: usize>(input: &str, field: &str) -> Result<[u8; N], ContractError> {
    let bytes = decode_hex(input, field)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidLength {
            field: field.to_string(),
            expected: N,
            got: bytes.len(),
        })
}

pub fn decode_ids(ids: &[String], field: &str) -> Result<Vec<[u8; 32]>, ContractError> {
    ids.iter().map(|id| decode_fixed::<32>(id, field)).collect()
}

/// bytes32 encoding of a dAPI name. Fails `NameZero` for the empty name.
pub fn dapi_name_bytes(dapi_name: &str) -> Result<[u8; 32], ContractError> {
    let name = dapi_name_to_bytes32(dapi_name).ok_or_else(|| ContractError::InvalidLength {
        field: "dapi_name".to_string(),
        expected: 32,
        got: dapi_name.len(),
    })?;
    if name == [0u8; 32] {
        return Err(ContractError::NameZero);
    }
    Ok(name)
}

pub fn dapi_name_key(dapi_name: &str) -> Result<[u8; 32], ContractError> {
    Ok(dapi_name_hash(&dapi_name_bytes(dapi_name)?))
}

/// Canonical bytes of a chain address, as bound inside digests.
pub fn canonical_bytes(api: &dyn Api, addr: &Addr) -> Result<Vec<u8>, ContractError> {
    Ok(api.addr_canonicalize(addr.as_str())?.as_slice().to_vec())
}

/// Sum of attached funds, which must all be in `denom`.
pub fn attached_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    if let Some(other) = info.funds.iter().find(|c| c.denom != denom) {
        return Err(ContractError::WrongDenom {
            denom: other.denom.clone(),
        });
    }
    Ok(info.funds.iter().map(|c| c.amount).sum())
}
