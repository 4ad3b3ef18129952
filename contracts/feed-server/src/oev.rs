use std::collections::BTreeSet;

use cosmwasm_std::{Deps, DepsMut, Env, Event, MessageInfo, Response, StdError, StdResult, Storage};
use pushfeed_common::hashing::{oev_constituent_digest, OevUpdate};
use pushfeed_common::{check_freshness, decode_data, derive_beacon_set_id, DataFeed, PackedOevSignature};

use crate::error::ContractError;
use crate::helpers::{attached_amount, canonical_bytes, decode_fixed, decode_hex};
use crate::msg::OevUpdateParams;
use crate::state::{BEACON_SET_CONSTITUENTS, CONFIG, OEV_PROXY_BALANCES, OEV_PROXY_DATA_FEEDS};
use crate::verify::verify_signer;

/// Update the OEV overlay of `oev_proxy` with a value the searcher bid for.
///
/// Signatures bind the proxy, the feed, the update id, the payload, the
/// searcher (the sender) and the bid, so a signed update cannot be replayed
/// by anyone else or under a different bid.
pub fn update_oev_proxy_data_feed_with_signed_data(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    params: OevUpdateParams,
) -> Result<Response, ContractError> {
    let OevUpdateParams {
        oev_proxy,
        data_feed_id,
        update_id,
        timestamp,
        data,
        packed_oev_update_signatures,
        bid_amount,
    } = params;

    let config = CONFIG.load(deps.storage)?;
    let oev_proxy = deps.api.addr_validate(&oev_proxy)?;
    let data_feed_id = decode_fixed::<32>(&data_feed_id, "data_feed_id")?;
    let update_id = decode_fixed::<32>(&update_id, "update_id")?;
    let data = decode_hex(&data, "data")?;

    let attached = attached_amount(&info, &config.bid_denom)?;
    if attached != bid_amount {
        return Err(ContractError::BidAmountMismatch {
            declared: bid_amount,
            attached,
        });
    }

    let entries = packed_oev_update_signatures
        .iter()
        .map(|packed| {
            let bytes = decode_hex(packed, "packed_oev_update_signatures")?;
            PackedOevSignature::decode(&bytes).ok_or_else(|| ContractError::MalformedPayload {
                reason: format!(
                    "packed OEV signature must be 52 or 117 bytes, got {}",
                    bytes.len()
                ),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let oev_proxy_bytes = canonical_bytes(deps.api, &oev_proxy)?;
    let searcher_bytes = canonical_bytes(deps.api, &info.sender)?;
    let update_hash = OevUpdate {
        oev_proxy: &oev_proxy_bytes,
        data_feed_id: &data_feed_id,
        update_id: &update_id,
        timestamp,
        data: &data,
        searcher: &searcher_bytes,
        bid_amount: bid_amount.u128(),
    }
    .hash();

    let verified = verify_oev_signatures(deps.as_ref(), &data_feed_id, &update_hash, &entries)?;

    let value = decode_data(&data)?;
    let key = (&oev_proxy, data_feed_id.as_slice());
    let stored = OEV_PROXY_DATA_FEEDS
        .may_load(deps.storage, key)?
        .unwrap_or(DataFeed::UNINITIALIZED);
    check_freshness(timestamp, stored.timestamp, env.block.time.seconds())?;
    OEV_PROXY_DATA_FEEDS.save(deps.storage, key, &DataFeed { value, timestamp })?;

    let balance = OEV_PROXY_BALANCES
        .may_load(deps.storage, &oev_proxy)?
        .unwrap_or_default()
        .checked_add(bid_amount)
        .map_err(StdError::from)?;
    OEV_PROXY_BALANCES.save(deps.storage, &oev_proxy, &balance)?;

    Ok(Response::new()
        .add_attribute("action", "update_oev_proxy_data_feed_with_signed_data")
        .add_attribute("oev_proxy", oev_proxy.to_string())
        .add_attribute("data_feed_id", hex::encode(data_feed_id))
        .add_event(
            Event::new("pushfeed_oev_proxy_updated")
                .add_attribute("oev_proxy", oev_proxy.to_string())
                .add_attribute("data_feed_id", hex::encode(data_feed_id))
                .add_attribute("update_id", hex::encode(update_id))
                .add_attribute("value", value.to_string())
                .add_attribute("timestamp", timestamp.to_string())
                .add_attribute("searcher", info.sender.to_string())
                .add_attribute("bid_amount", bid_amount.to_string())
                .add_attribute("signatures", verified.to_string()),
        ))
}

/// Checks the entries against the target feed and returns how many signatures verified.
///
/// One entry: it must derive to the target and carry a signature.
/// Several entries: they must form the target Beacon set and signatures from
/// distinct Beacons must be a strict majority of the entries. Any signature present must be valid.
fn verify_oev_signatures(
    deps: Deps,
    data_feed_id: &[u8; 32],
    update_hash: &[u8; 32],
    entries: &[PackedOevSignature],
) -> Result<usize, ContractError> {
    match entries {
        [] => Err(ContractError::FeedIdMismatch),
        [entry] => {
            if entry.beacon_id() != *data_feed_id {
                return Err(ContractError::FeedIdMismatch);
            }
            if entry.is_abstention() {
                return Err(ContractError::MissingSignature);
            }
            verify_entry(deps, update_hash, entry)?;
            Ok(1)
        }
        _ => {
            let beacon_ids: Vec<[u8; 32]> = entries.iter().map(|e| e.beacon_id()).collect();
            if !forms_beacon_set(deps.storage, data_feed_id, &beacon_ids)? {
                return Err(ContractError::FeedIdMismatch);
            }

            // A Beacon listed more than once counts once toward the majority.
            let mut signed = BTreeSet::new();
            for entry in entries.iter().filter(|e| !e.is_abstention()) {
                verify_entry(deps, update_hash, entry)?;
                signed.insert(entry.beacon_id());
            }
            let verified = signed.len();
            if verified * 2 <= entries.len() {
                return Err(ContractError::InsufficientSignatures {
                    verified,
                    total: entries.len(),
                });
            }
            Ok(verified)
        }
    }
}

fn verify_entry(
    deps: Deps,
    update_hash: &[u8; 32],
    entry: &PackedOevSignature,
) -> Result<(), ContractError> {
    let digest = oev_constituent_digest(update_hash, &entry.template_id);
    verify_signer(deps.api, &digest, &entry.signature, &entry.airnode)?;
    Ok(())
}

/// Whether `beacon_ids` are the constituents of `beacon_set_id`.
///
/// Entries in aggregation order match by hash. Otherwise the ids are compared
/// as a multiset against the constituents recorded when the set was last updated.
fn forms_beacon_set(
    storage: &dyn Storage,
    beacon_set_id: &[u8; 32],
    beacon_ids: &[[u8; 32]],
) -> StdResult<bool> {
    if derive_beacon_set_id(beacon_ids) == *beacon_set_id {
        return Ok(true);
    }
    let Some(constituents) = BEACON_SET_CONSTITUENTS.may_load(storage, beacon_set_id)? else {
        return Ok(false);
    };
    let Some(mut known) = constituents
        .iter()
        .map(|id| hex::decode(id).ok())
        .collect::<Option<Vec<_>>>()
    else {
        return Ok(false);
    };
    let mut given: Vec<Vec<u8>> = beacon_ids.iter().map(|id| id.to_vec()).collect();
    known.sort();
    given.sort();
    Ok(known == given)
}
