use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use pushfeed_common::{DataFeed, SubscriptionTarget, UpdateConditions};

pub const CONFIG: Item<ServerConfig> = Item::new("config");

/// Beacons and Beacon sets, keyed by data feed id.
pub const DATA_FEEDS: Map<&[u8], DataFeed> = Map::new("data_feeds");

/// OEV overlay records, keyed by (OEV proxy, data feed id).
pub const OEV_PROXY_DATA_FEEDS: Map<(&Addr, &[u8]), DataFeed> = Map::new("oev_data_feeds");

/// Bids collected per OEV proxy, waiting to be withdrawn to its beneficiary.
pub const OEV_PROXY_BALANCES: Map<&Addr, Uint128> = Map::new("oev_balances");

/// Beacon ids (hex) of every Beacon set that has been updated at least once.
pub const BEACON_SET_CONSTITUENTS: Map<&[u8], Vec<String>> = Map::new("beacon_sets");

/// keccak256(dAPI name) -> data feed id
pub const DAPI_NAME_HASH_TO_DATA_FEED_ID: Map<&[u8], Vec<u8>> = Map::new("dapi_names");

pub const SUBSCRIPTIONS: Map<&[u8], Subscription> = Map::new("subscriptions");

/// Capabilities checked through [`ServerConfig::is_authorized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SetDapiName,
    UpdateDapiNameSetters,
    UpdateConfig,
}

#[cw_serde]
pub struct ServerConfig {
    pub admin: Addr,
    pub dapi_name_setters: Vec<Addr>,
    /// Denom OEV bids are paid in
    pub bid_denom: String,
}

impl ServerConfig {
    pub fn is_authorized(&self, caller: &Addr, action: Action) -> bool {
        if *caller == self.admin {
            return true;
        }
        match action {
            Action::SetDapiName => self.dapi_name_setters.contains(caller),
            Action::UpdateDapiNameSetters | Action::UpdateConfig => false,
        }
    }
}

#[cw_serde]
pub struct Subscription {
    pub target: SubscriptionTarget,
    /// Hex id of the Beacon or Beacon set kept up to date
    pub data_feed_id: String,
    pub conditions: UpdateConditions,
    /// Hex, 20 bytes
    pub relayer: String,
    pub sponsor: Addr,
    pub registered_at: Timestamp,
}
