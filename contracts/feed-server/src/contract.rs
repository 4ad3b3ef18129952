use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError,
    SubMsgResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::condition;
use crate::error::ContractError;
use crate::execute::{self, WITHDRAW_REPLY_ID};
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MigrateMsg, OevUpdateParams, QueryMsg,
    RegisterSubscriptionParams, SignedDataParams, UpdateConfigParams,
};
use crate::oev;
use crate::query;
use crate::state::{ServerConfig, CONFIG};
use pushfeed_common::SubscriptionTarget;

const CONTRACT_NAME: &str = "crates.io:pushfeed-server";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.bid_denom.is_empty() {
        return Err(StdError::generic_err("bid_denom must not be empty").into());
    }

    let mut dapi_name_setters = Vec::new();
    for setter in &msg.dapi_name_setters {
        dapi_name_setters.push(deps.api.addr_validate(setter)?);
    }

    let config = ServerConfig {
        admin: info.sender.clone(),
        dapi_name_setters,
        bid_denom: msg.bid_denom,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "pushfeed-server")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateBeaconWithSignedData {
            airnode,
            template_id,
            timestamp,
            data,
            signature,
        } => execute::update_beacon_with_signed_data(
            deps,
            env,
            SignedDataParams {
                airnode,
                relayer: None,
                template_id,
                timestamp,
                data,
                signature,
            },
        ),
        ExecuteMsg::UpdateBeaconWithRelayedSignedData {
            airnode,
            relayer,
            template_id,
            timestamp,
            data,
            signature,
        } => execute::update_beacon_with_signed_data(
            deps,
            env,
            SignedDataParams {
                airnode,
                relayer: Some(relayer),
                template_id,
                timestamp,
                data,
                signature,
            },
        ),
        ExecuteMsg::UpdateBeaconSetWithBeacons { beacon_ids } => {
            execute::update_beacon_set_with_beacons(deps, beacon_ids)
        }
        ExecuteMsg::UpdateOevProxyDataFeedWithSignedData {
            oev_proxy,
            data_feed_id,
            update_id,
            timestamp,
            data,
            packed_oev_update_signatures,
            bid_amount,
        } => oev::update_oev_proxy_data_feed_with_signed_data(
            deps,
            env,
            info,
            OevUpdateParams {
                oev_proxy,
                data_feed_id,
                update_id,
                timestamp,
                data,
                packed_oev_update_signatures,
                bid_amount,
            },
        ),
        ExecuteMsg::Withdraw { oev_proxy } => execute::withdraw(deps, oev_proxy),
        ExecuteMsg::SetDapiName {
            dapi_name,
            data_feed_id,
        } => execute::set_dapi_name(deps, info, dapi_name, data_feed_id),
        ExecuteMsg::RegisterBeaconUpdateSubscription {
            airnode,
            template_id,
            conditions,
            relayer,
            sponsor,
        } => execute::register_subscription(
            deps,
            env,
            RegisterSubscriptionParams {
                target: SubscriptionTarget::Beacon {
                    airnode,
                    template_id,
                },
                conditions,
                relayer,
                sponsor,
            },
        ),
        ExecuteMsg::RegisterBeaconSetUpdateSubscription {
            beacon_ids,
            conditions,
            relayer,
            sponsor,
        } => execute::register_subscription(
            deps,
            env,
            RegisterSubscriptionParams {
                target: SubscriptionTarget::BeaconSet { beacon_ids },
                conditions,
                relayer,
                sponsor,
            },
        ),
        ExecuteMsg::FulfillBeaconSubscription {
            subscription_id,
            timestamp,
            data,
            signature,
        } => execute::fulfill_beacon_subscription(
            deps,
            env,
            subscription_id,
            timestamp,
            data,
            signature,
        ),
        ExecuteMsg::FulfillBeaconSetSubscription { subscription_id } => {
            execute::fulfill_beacon_set_subscription(deps, subscription_id)
        }
        ExecuteMsg::UpdateDapiNameSetters { add, remove } => {
            execute::update_dapi_name_setters(deps, info, add, remove)
        }
        ExecuteMsg::UpdateConfig { admin, bid_denom } => execute::update_config(
            deps,
            info,
            UpdateConfigParams { admin, bid_denom },
        ),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Config {} => Ok(query::query_config(deps)?),
        QueryMsg::DataFeed { data_feed_id } => query::query_data_feed(deps, data_feed_id),
        QueryMsg::OevProxyDataFeed {
            oev_proxy,
            data_feed_id,
        } => query::query_oev_proxy_data_feed(deps, oev_proxy, data_feed_id),
        QueryMsg::OevProxyBalance { oev_proxy } => {
            Ok(query::query_oev_proxy_balance(deps, oev_proxy)?)
        }
        QueryMsg::DapiNameToDataFeedId { dapi_name } => {
            query::query_dapi_name_to_data_feed_id(deps, dapi_name)
        }
        QueryMsg::Subscription { subscription_id } => {
            query::query_subscription(deps, subscription_id)
        }
        QueryMsg::BeaconSetConstituents { beacon_set_id } => {
            query::query_beacon_set_constituents(deps, beacon_set_id)
        }
        QueryMsg::ReadDataFeedWithId { data_feed_id } => {
            query::read_data_feed_with_id(deps, data_feed_id)
        }
        QueryMsg::ReadDataFeedWithDapiName { dapi_name } => {
            query::read_data_feed_with_dapi_name(deps, dapi_name)
        }
        QueryMsg::ReadDataFeedWithDapiNameHash { dapi_name_hash } => {
            query::read_data_feed_with_dapi_name_hash(deps, dapi_name_hash)
        }
        QueryMsg::ReadDataFeedWithIdAsOevProxy {
            oev_proxy,
            data_feed_id,
        } => query::read_data_feed_with_id_as_oev_proxy(deps, oev_proxy, data_feed_id),
        QueryMsg::ReadDataFeedWithDapiNameAsOevProxy {
            oev_proxy,
            dapi_name,
        } => query::read_data_feed_with_dapi_name_as_oev_proxy(deps, oev_proxy, dapi_name),
        QueryMsg::ConditionSubscriptionUpdate {
            subscription_id,
            data,
            condition_parameters,
        } => condition::query_condition_subscription_update(
            deps,
            env,
            subscription_id,
            data,
            condition_parameters,
        ),
        QueryMsg::DeriveBeaconId {
            airnode,
            template_id,
        } => query::query_derive_beacon_id(airnode, template_id),
        QueryMsg::DeriveBeaconSetId { beacon_ids } => query::query_derive_beacon_set_id(beacon_ids),
    }
}

/// A failed OEV withdrawal transfer aborts the transaction, restoring the balance.
#[entry_point]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        WITHDRAW_REPLY_ID => match msg.result {
            SubMsgResult::Err(reason) => Err(ContractError::WithdrawalFailed { reason }),
            SubMsgResult::Ok(_) => Ok(Response::new()),
        },
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
