use cosmwasm_std::{to_json_binary, Addr, Binary, Deps, StdResult, Storage};
use pushfeed_common::{derive_beacon_id, derive_beacon_set_id, DataFeed};

use crate::error::ContractError;
use crate::helpers::{dapi_name_key, decode_fixed, decode_ids};
use crate::state::{
    BEACON_SET_CONSTITUENTS, CONFIG, DAPI_NAME_HASH_TO_DATA_FEED_ID, DATA_FEEDS,
    OEV_PROXY_BALANCES, OEV_PROXY_DATA_FEEDS, SUBSCRIPTIONS,
};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_data_feed(deps: Deps, data_feed_id: String) -> Result<Binary, ContractError> {
    let id = decode_fixed::<32>(&data_feed_id, "data_feed_id")?;
    let feed = DATA_FEEDS.may_load(deps.storage, &id)?;
    Ok(to_json_binary(&feed)?)
}

pub fn query_oev_proxy_data_feed(
    deps: Deps,
    oev_proxy: String,
    data_feed_id: String,
) -> Result<Binary, ContractError> {
    let oev_proxy = deps.api.addr_validate(&oev_proxy)?;
    let id = decode_fixed::<32>(&data_feed_id, "data_feed_id")?;
    let feed = OEV_PROXY_DATA_FEEDS.may_load(deps.storage, (&oev_proxy, id.as_slice()))?;
    Ok(to_json_binary(&feed)?)
}

pub fn query_oev_proxy_balance(deps: Deps, oev_proxy: String) -> StdResult<Binary> {
    let oev_proxy = deps.api.addr_validate(&oev_proxy)?;
    let balance = OEV_PROXY_BALANCES
        .may_load(deps.storage, &oev_proxy)?
        .unwrap_or_default();
    to_json_binary(&balance)
}

pub fn query_dapi_name_to_data_feed_id(
    deps: Deps,
    dapi_name: String,
) -> Result<Binary, ContractError> {
    let name_hash = dapi_name_key(&dapi_name)?;
    let id = DAPI_NAME_HASH_TO_DATA_FEED_ID
        .may_load(deps.storage, &name_hash)?
        .map(hex::encode);
    Ok(to_json_binary(&id)?)
}

pub fn query_subscription(deps: Deps, subscription_id: String) -> Result<Binary, ContractError> {
    let id = decode_fixed::<32>(&subscription_id, "subscription_id")?;
    let subscription = SUBSCRIPTIONS.may_load(deps.storage, &id)?;
    Ok(to_json_binary(&subscription)?)
}

pub fn query_beacon_set_constituents(
    deps: Deps,
    beacon_set_id: String,
) -> Result<Binary, ContractError> {
    let id = decode_fixed::<32>(&beacon_set_id, "beacon_set_id")?;
    let constituents = BEACON_SET_CONSTITUENTS.may_load(deps.storage, &id)?;
    Ok(to_json_binary(&constituents)?)
}

fn stored_or_uninitialized(storage: &dyn Storage, data_feed_id: &[u8]) -> StdResult<DataFeed> {
    Ok(DATA_FEEDS
        .may_load(storage, data_feed_id)?
        .unwrap_or(DataFeed::UNINITIALIZED))
}

/// The overlay wins only when strictly newer than the public record.
fn freshest_for_oev_proxy(
    storage: &dyn Storage,
    oev_proxy: &Addr,
    data_feed_id: &[u8],
) -> StdResult<DataFeed> {
    let public = stored_or_uninitialized(storage, data_feed_id)?;
    let overlay = OEV_PROXY_DATA_FEEDS
        .may_load(storage, (oev_proxy, data_feed_id))?
        .unwrap_or(DataFeed::UNINITIALIZED);
    Ok(if overlay.timestamp > public.timestamp {
        overlay
    } else {
        public
    })
}

fn resolve_dapi_name_hash(
    storage: &dyn Storage,
    name_hash: &[u8; 32],
) -> Result<Vec<u8>, ContractError> {
    DAPI_NAME_HASH_TO_DATA_FEED_ID
        .may_load(storage, name_hash)?
        .ok_or(ContractError::NameNotBound)
}

fn initialized(feed: DataFeed) -> Result<Binary, ContractError> {
    if !feed.is_initialized() {
        return Err(ContractError::NotInitialized);
    }
    Ok(to_json_binary(&feed)?)
}

pub fn read_data_feed_with_id(deps: Deps, data_feed_id: String) -> Result<Binary, ContractError> {
    let id = decode_fixed::<32>(&data_feed_id, "data_feed_id")?;
    initialized(stored_or_uninitialized(deps.storage, &id)?)
}

pub fn read_data_feed_with_dapi_name(
    deps: Deps,
    dapi_name: String,
) -> Result<Binary, ContractError> {
    let name_hash = dapi_name_key(&dapi_name)?;
    let id = resolve_dapi_name_hash(deps.storage, &name_hash)?;
    initialized(stored_or_uninitialized(deps.storage, &id)?)
}

pub fn read_data_feed_with_dapi_name_hash(
    deps: Deps,
    dapi_name_hash: String,
) -> Result<Binary, ContractError> {
    let name_hash = decode_fixed::<32>(&dapi_name_hash, "dapi_name_hash")?;
    let id = resolve_dapi_name_hash(deps.storage, &name_hash)?;
    initialized(stored_or_uninitialized(deps.storage, &id)?)
}

pub fn read_data_feed_with_id_as_oev_proxy(
    deps: Deps,
    oev_proxy: String,
    data_feed_id: String,
) -> Result<Binary, ContractError> {
    let oev_proxy = deps.api.addr_validate(&oev_proxy)?;
    let id = decode_fixed::<32>(&data_feed_id, "data_feed_id")?;
    initialized(freshest_for_oev_proxy(deps.storage, &oev_proxy, &id)?)
}

pub fn read_data_feed_with_dapi_name_as_oev_proxy(
    deps: Deps,
    oev_proxy: String,
    dapi_name: String,
) -> Result<Binary, ContractError> {
    let oev_proxy = deps.api.addr_validate(&oev_proxy)?;
    let name_hash = dapi_name_key(&dapi_name)?;
    let id = resolve_dapi_name_hash(deps.storage, &name_hash)?;
    initialized(freshest_for_oev_proxy(deps.storage, &oev_proxy, &id)?)
}

pub fn query_derive_beacon_id(
    airnode: String,
    template_id: String,
) -> Result<Binary, ContractError> {
    let airnode = decode_fixed::<20>(&airnode, "airnode")?;
    let template_id = decode_fixed::<32>(&template_id, "template_id")?;
    Ok(to_json_binary(&hex::encode(derive_beacon_id(
        &airnode,
        &template_id,
    )))?)
}

pub fn query_derive_beacon_set_id(beacon_ids: Vec<String>) -> Result<Binary, ContractError> {
    let ids = decode_ids(&beacon_ids, "beacon_ids")?;
    Ok(to_json_binary(&hex::encode(derive_beacon_set_id(&ids)))?)
}
