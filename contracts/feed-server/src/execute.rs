use cosmwasm_std::{
    coins, to_json_binary, BankMsg, DepsMut, Env, Event, Int256, MessageInfo, QueryRequest,
    Response, StdError, Storage, SubMsg, WasmQuery,
};
use pushfeed_common::guard::narrow_to_int224;
use pushfeed_common::hashing::{keccak256, relayed_data_digest, signed_data_digest};
use pushfeed_common::{
    aggregate, check_freshness, decode_data, derive_beacon_id, derive_beacon_set_id, DataFeed,
    SubscriptionTarget,
};

use crate::error::ContractError;
use crate::helpers::{canonical_bytes, dapi_name_key, decode_fixed, decode_hex, decode_ids};
use crate::msg::{
    OevBeneficiaryResponse, OevProxyQueryMsg, RegisterSubscriptionParams, SignedDataParams,
    UpdateConfigParams,
};
use crate::state::{
    Action, Subscription, BEACON_SET_CONSTITUENTS, CONFIG, DAPI_NAME_HASH_TO_DATA_FEED_ID,
    DATA_FEEDS, OEV_PROXY_BALANCES, SUBSCRIPTIONS,
};
use crate::verify::verify_signer;

pub const WITHDRAW_REPLY_ID: u64 = 1;

const FULFILL_BEACON_SUBSCRIPTION: &[u8] = b"FulfillBeaconSubscription";
const FULFILL_BEACON_SET_SUBSCRIPTION: &[u8] = b"FulfillBeaconSetSubscription";

/// Update a Beacon with data signed by its Airnode.
///
/// With a relayer the signature also binds the relayer address, so the same
/// signed value cannot be delivered under someone else's name.
pub fn update_beacon_with_signed_data(
    deps: DepsMut,
    env: Env,
    params: SignedDataParams,
) -> Result<Response, ContractError> {
    let SignedDataParams {
        airnode,
        relayer,
        template_id,
        timestamp,
        data,
        signature,
    } = params;

    let airnode = decode_fixed::<20>(&airnode, "airnode")?;
    let template_id = decode_fixed::<32>(&template_id, "template_id")?;
    let relayer = relayer
        .as_deref()
        .map(|r| decode_fixed::<20>(r, "relayer"))
        .transpose()?;
    let data = decode_hex(&data, "data")?;
    let signature = decode_hex(&signature, "signature")?;

    let digest = match &relayer {
        Some(relayer) => relayed_data_digest(&template_id, timestamp, &data, relayer),
        None => signed_data_digest(&template_id, timestamp, &data),
    };
    verify_signer(deps.api, &digest, &signature, &airnode)?;

    let value = decode_data(&data)?;
    let beacon_id = derive_beacon_id(&airnode, &template_id);
    let mut event = apply_beacon_update(deps.storage, &env, &beacon_id, timestamp, value)?;

    let action = match relayer {
        Some(relayer) => {
            event = event.add_attribute("relayer", hex::encode(relayer));
            "update_beacon_with_relayed_signed_data"
        }
        None => "update_beacon_with_signed_data",
    };

    Ok(Response::new()
        .add_attribute("action", action)
        .add_attribute("beacon_id", hex::encode(beacon_id))
        .add_event(event))
}

/// Freshness-gated write of a verified Beacon value.
fn apply_beacon_update(
    storage: &mut dyn Storage,
    env: &Env,
    beacon_id: &[u8; 32],
    timestamp: u32,
    value: Int256,
) -> Result<Event, ContractError> {
    let stored = DATA_FEEDS
        .may_load(storage, beacon_id)?
        .unwrap_or(DataFeed::UNINITIALIZED);
    check_freshness(timestamp, stored.timestamp, env.block.time.seconds())?;

    DATA_FEEDS.save(storage, beacon_id, &DataFeed { value, timestamp })?;

    Ok(Event::new("pushfeed_beacon_updated")
        .add_attribute("beacon_id", hex::encode(beacon_id))
        .add_attribute("value", value.to_string())
        .add_attribute("timestamp", timestamp.to_string()))
}

/// Median of the current records of `beacon_ids`. Missing Beacons count as `(0, 0)`.
pub fn aggregate_beacons(
    storage: &dyn Storage,
    beacon_ids: &[[u8; 32]],
) -> Result<DataFeed, ContractError> {
    if beacon_ids.len() < 2 {
        return Err(ContractError::InsufficientConstituents {
            got: beacon_ids.len(),
        });
    }
    let feeds = beacon_ids
        .iter()
        .map(|id| {
            Ok(DATA_FEEDS
                .may_load(storage, id)?
                .unwrap_or(DataFeed::UNINITIALIZED))
        })
        .collect::<Result<Vec<_>, StdError>>()?;
    aggregate(&feeds).ok_or(ContractError::InsufficientConstituents { got: feeds.len() })
}

/// Update a Beacon set from the current values of its Beacons. Anyone can call.
///
/// An unchanged timestamp is accepted as long as the value changes.
pub fn update_beacon_set_with_beacons(
    deps: DepsMut,
    beacon_ids: Vec<String>,
) -> Result<Response, ContractError> {
    if beacon_ids.len() < 2 {
        return Err(ContractError::InsufficientConstituents {
            got: beacon_ids.len(),
        });
    }
    let ids = decode_ids(&beacon_ids, "beacon_ids")?;
    let updated = aggregate_beacons(deps.storage, &ids)?;
    let beacon_set_id = derive_beacon_set_id(&ids);

    let stored = DATA_FEEDS
        .may_load(deps.storage, &beacon_set_id)?
        .unwrap_or(DataFeed::UNINITIALIZED);
    // A zero median timestamp would read back as uninitialized.
    if updated.timestamp == 0 {
        return Err(ContractError::DoesNotAdvanceTimestamp {
            candidate: 0,
            stored: stored.timestamp,
        });
    }
    if updated.timestamp == stored.timestamp {
        if updated.value == stored.value {
            return Err(ContractError::NoChangeToApply);
        }
    } else if updated.timestamp < stored.timestamp {
        return Err(ContractError::DoesNotAdvanceTimestamp {
            candidate: updated.timestamp,
            stored: stored.timestamp,
        });
    }

    DATA_FEEDS.save(deps.storage, &beacon_set_id, &updated)?;
    if !BEACON_SET_CONSTITUENTS.has(deps.storage, &beacon_set_id) {
        let normalized: Vec<String> = ids.iter().map(hex::encode).collect();
        BEACON_SET_CONSTITUENTS.save(deps.storage, &beacon_set_id, &normalized)?;
    }

    Ok(Response::new()
        .add_attribute("action", "update_beacon_set_with_beacons")
        .add_attribute("beacon_set_id", hex::encode(beacon_set_id))
        .add_event(
            Event::new("pushfeed_beacon_set_updated")
                .add_attribute("beacon_set_id", hex::encode(beacon_set_id))
                .add_attribute("value", updated.value.to_string())
                .add_attribute("timestamp", updated.timestamp.to_string()),
        ))
}

/// Register a publish/subscribe subscription. Anyone can call.
///
/// The id binds the fulfillment kind, the target feed, the encoded
/// conditions, the relayer and the sponsor.
pub fn register_subscription(
    deps: DepsMut,
    env: Env,
    params: RegisterSubscriptionParams,
) -> Result<Response, ContractError> {
    let RegisterSubscriptionParams {
        target,
        conditions,
        relayer,
        sponsor,
    } = params;

    let (target, data_feed_id, fulfill_kind) = match target {
        SubscriptionTarget::Beacon {
            airnode,
            template_id,
        } => {
            let airnode = decode_fixed::<20>(&airnode, "airnode")?;
            let template_id = decode_fixed::<32>(&template_id, "template_id")?;
            (
                SubscriptionTarget::Beacon {
                    airnode: hex::encode(airnode),
                    template_id: hex::encode(template_id),
                },
                derive_beacon_id(&airnode, &template_id),
                FULFILL_BEACON_SUBSCRIPTION,
            )
        }
        SubscriptionTarget::BeaconSet { beacon_ids } => {
            if beacon_ids.len() < 2 {
                return Err(ContractError::InsufficientConstituents {
                    got: beacon_ids.len(),
                });
            }
            let ids = decode_ids(&beacon_ids, "beacon_ids")?;
            (
                SubscriptionTarget::BeaconSet {
                    beacon_ids: ids.iter().map(hex::encode).collect(),
                },
                derive_beacon_set_id(&ids),
                FULFILL_BEACON_SET_SUBSCRIPTION,
            )
        }
    };

    narrow_to_int224(conditions.deviation_reference)?;
    let relayer = decode_fixed::<20>(&relayer, "relayer")?;
    let sponsor = deps.api.addr_validate(&sponsor)?;
    let sponsor_bytes = canonical_bytes(deps.api, &sponsor)?;

    let subscription_id = keccak256(&[
        fulfill_kind,
        &data_feed_id,
        &conditions.encode(),
        &relayer,
        &sponsor_bytes,
    ]);
    if SUBSCRIPTIONS.has(deps.storage, &subscription_id) {
        return Err(ContractError::SubscriptionAlreadyRegistered {
            subscription_id: hex::encode(subscription_id),
        });
    }

    if let SubscriptionTarget::BeaconSet { beacon_ids } = &target {
        if !BEACON_SET_CONSTITUENTS.has(deps.storage, &data_feed_id) {
            BEACON_SET_CONSTITUENTS.save(deps.storage, &data_feed_id, beacon_ids)?;
        }
    }

    let subscription = Subscription {
        target,
        data_feed_id: hex::encode(data_feed_id),
        conditions,
        relayer: hex::encode(relayer),
        sponsor: sponsor.clone(),
        registered_at: env.block.time,
    };
    SUBSCRIPTIONS.save(deps.storage, &subscription_id, &subscription)?;

    Ok(Response::new()
        .add_attribute("action", "register_subscription")
        .add_attribute("subscription_id", hex::encode(subscription_id))
        .add_event(
            Event::new("pushfeed_subscription_registered")
                .add_attribute("subscription_id", hex::encode(subscription_id))
                .add_attribute("data_feed_id", subscription.data_feed_id)
                .add_attribute("relayer", subscription.relayer)
                .add_attribute("sponsor", sponsor.to_string()),
        ))
}

fn load_subscription(
    storage: &dyn Storage,
    subscription_id: &str,
) -> Result<Subscription, ContractError> {
    let id = decode_fixed::<32>(subscription_id, "subscription_id")?;
    SUBSCRIPTIONS
        .may_load(storage, &id)?
        .ok_or_else(|| ContractError::SubscriptionNotRegistered {
            subscription_id: hex::encode(id),
        })
}

/// Fulfill a Beacon subscription. The Airnode signs for the subscription's relayer.
pub fn fulfill_beacon_subscription(
    deps: DepsMut,
    env: Env,
    subscription_id: String,
    timestamp: u32,
    data: String,
    signature: String,
) -> Result<Response, ContractError> {
    let subscription = load_subscription(deps.storage, &subscription_id)?;
    let SubscriptionTarget::Beacon {
        airnode,
        template_id,
    } = subscription.target
    else {
        return Err(ContractError::SubscriptionKindMismatch {
            subscription_id,
            expected: "Beacon".to_string(),
        });
    };

    let response = update_beacon_with_signed_data(
        deps,
        env,
        SignedDataParams {
            airnode,
            relayer: Some(subscription.relayer),
            template_id,
            timestamp,
            data,
            signature,
        },
    )?;
    Ok(response.add_attribute("subscription_id", subscription_id))
}

/// Fulfill a Beacon set subscription by recomputing the set. Anyone can call.
pub fn fulfill_beacon_set_subscription(
    deps: DepsMut,
    subscription_id: String,
) -> Result<Response, ContractError> {
    let subscription = load_subscription(deps.storage, &subscription_id)?;
    let SubscriptionTarget::BeaconSet { beacon_ids } = subscription.target else {
        return Err(ContractError::SubscriptionKindMismatch {
            subscription_id,
            expected: "Beacon set".to_string(),
        });
    };

    let response = update_beacon_set_with_beacons(deps, beacon_ids)?;
    Ok(response.add_attribute("subscription_id", subscription_id))
}

/// Bind a dAPI name to a data feed id. Admin or dAPI name setters only.
///
/// Rebinding to the same id succeeds and emits the event again.
pub fn set_dapi_name(
    deps: DepsMut,
    info: MessageInfo,
    dapi_name: String,
    data_feed_id: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.is_authorized(&info.sender, Action::SetDapiName) {
        return Err(ContractError::Unauthorized {
            reason: "only admin or dAPI name setters can set dAPI names".to_string(),
        });
    }

    let name_hash = dapi_name_key(&dapi_name)?;
    let data_feed_id = if data_feed_id.is_empty() {
        [0u8; 32]
    } else {
        decode_fixed::<32>(&data_feed_id, "data_feed_id")?
    };

    if data_feed_id == [0u8; 32] {
        DAPI_NAME_HASH_TO_DATA_FEED_ID.remove(deps.storage, &name_hash);
    } else {
        DAPI_NAME_HASH_TO_DATA_FEED_ID.save(deps.storage, &name_hash, &data_feed_id.to_vec())?;
    }

    Ok(Response::new()
        .add_attribute("action", "set_dapi_name")
        .add_attribute("dapi_name", dapi_name.clone())
        .add_event(
            Event::new("pushfeed_dapi_name_set")
                .add_attribute("dapi_name", dapi_name)
                .add_attribute("dapi_name_hash", hex::encode(name_hash))
                .add_attribute("data_feed_id", hex::encode(data_feed_id))
                .add_attribute("setter", info.sender.to_string()),
        ))
}

/// Send the bids collected for an OEV proxy to its beneficiary. Anyone can call.
///
/// The transfer runs as a sub-message; if it fails, `reply` aborts the whole
/// transaction and the balance is restored with it.
pub fn withdraw(deps: DepsMut, oev_proxy: String) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let oev_proxy = deps.api.addr_validate(&oev_proxy)?;

    let beneficiary_query = QueryRequest::Wasm(WasmQuery::Smart {
        contract_addr: oev_proxy.to_string(),
        msg: to_json_binary(&OevProxyQueryMsg::OevBeneficiary {})?,
    });
    let OevBeneficiaryResponse { beneficiary } = deps.querier.query(&beneficiary_query)?;
    let beneficiary = match beneficiary.filter(|b| !b.is_empty()) {
        Some(b) => deps.api.addr_validate(&b)?,
        None => {
            return Err(ContractError::BeneficiaryZero {
                oev_proxy: oev_proxy.to_string(),
            })
        }
    };

    let balance = OEV_PROXY_BALANCES
        .may_load(deps.storage, &oev_proxy)?
        .unwrap_or_default();
    if balance.is_zero() {
        return Err(ContractError::NoPendingBalance {
            oev_proxy: oev_proxy.to_string(),
        });
    }
    OEV_PROXY_BALANCES.remove(deps.storage, &oev_proxy);

    let send_msg = BankMsg::Send {
        to_address: beneficiary.to_string(),
        amount: coins(balance.u128(), config.bid_denom.clone()),
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_error(send_msg, WITHDRAW_REPLY_ID))
        .add_attribute("action", "withdraw")
        .add_attribute("oev_proxy", oev_proxy.to_string())
        .add_attribute("amount", balance.to_string())
        .add_event(
            Event::new("pushfeed_oev_withdrawn")
                .add_attribute("oev_proxy", oev_proxy.to_string())
                .add_attribute("beneficiary", beneficiary.to_string())
                .add_attribute("amount", balance.to_string())
                .add_attribute("denom", config.bid_denom),
        ))
}

/// Update the dAPI name setter list. Admin only.
pub fn update_dapi_name_setters(
    deps: DepsMut,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if !config.is_authorized(&info.sender, Action::UpdateDapiNameSetters) {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update dAPI name setters".to_string(),
        });
    }

    for addr_str in &remove {
        let addr = deps.api.addr_validate(addr_str)?;
        config.dapi_name_setters.retain(|a| *a != addr);
    }

    for addr_str in &add {
        let addr = deps.api.addr_validate(addr_str)?;
        if !config.dapi_name_setters.contains(&addr) {
            config.dapi_name_setters.push(addr);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_dapi_name_setters")
        .add_attribute("added", add.join(","))
        .add_attribute("removed", remove.join(",")))
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    params: UpdateConfigParams,
) -> Result<Response, ContractError> {
    let UpdateConfigParams { admin, bid_denom } = params;

    let mut config = CONFIG.load(deps.storage)?;

    if !config.is_authorized(&info.sender, Action::UpdateConfig) {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(denom) = bid_denom {
        if denom.is_empty() {
            return Err(StdError::generic_err("bid_denom must not be empty").into());
        }
        config.bid_denom = denom;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
