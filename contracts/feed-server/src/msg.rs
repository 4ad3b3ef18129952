use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use pushfeed_common::{DataFeed, SubscriptionTarget, UpdateConditions};

use crate::state::{ServerConfig, Subscription};

#[cw_serde]
pub struct InstantiateMsg {
    /// Accounts allowed to bind dAPI names besides the admin
    pub dapi_name_setters: Vec<String>,
    /// Denom OEV bids are paid in
    pub bid_denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Update a Beacon with data signed by its Airnode.
    UpdateBeaconWithSignedData {
        /// Hex-encoded Airnode address (20 bytes)
        airnode: String,
        /// Hex-encoded template id (32 bytes)
        template_id: String,
        timestamp: u32,
        /// Hex-encoded int224 value as a 32-byte word
        data: String,
        /// Hex-encoded `r || s || v` signature (65 bytes)
        signature: String,
    },
    /// Update a Beacon with data signed by its Airnode for delivery by a relayer.
    UpdateBeaconWithRelayedSignedData {
        airnode: String,
        /// Hex-encoded relayer Airnode address (20 bytes)
        relayer: String,
        template_id: String,
        timestamp: u32,
        data: String,
        signature: String,
    },
    /// Aggregate Beacons into the Beacon set they form, in the given order.
    UpdateBeaconSetWithBeacons { beacon_ids: Vec<String> },
    /// Update the value only `oev_proxy` reads, paying `bid_amount`.
    UpdateOevProxyDataFeedWithSignedData {
        oev_proxy: String,
        data_feed_id: String,
        /// Hex-encoded 32-byte id, used to correlate events
        update_id: String,
        timestamp: u32,
        data: String,
        /// Hex-encoded `airnode || template_id || signature`, one per Beacon
        packed_oev_update_signatures: Vec<String>,
        bid_amount: Uint128,
    },
    /// Send the bids collected for `oev_proxy` to its beneficiary. Anyone can call.
    Withdraw { oev_proxy: String },
    /// Bind a dAPI name to a data feed id. An empty id clears the binding.
    SetDapiName {
        dapi_name: String,
        data_feed_id: String,
    },
    RegisterBeaconUpdateSubscription {
        airnode: String,
        template_id: String,
        conditions: UpdateConditions,
        relayer: String,
        sponsor: String,
    },
    RegisterBeaconSetUpdateSubscription {
        beacon_ids: Vec<String>,
        conditions: UpdateConditions,
        relayer: String,
        sponsor: String,
    },
    /// Fulfill a Beacon subscription with data relayed on behalf of its Airnode.
    FulfillBeaconSubscription {
        subscription_id: String,
        timestamp: u32,
        data: String,
        signature: String,
    },
    /// Recompute the Beacon set a subscription targets.
    FulfillBeaconSetSubscription { subscription_id: String },
    /// Update dAPI name setters (admin only).
    UpdateDapiNameSetters {
        add: Vec<String>,
        remove: Vec<String>,
    },
    /// Update configuration (admin only).
    UpdateConfig {
        admin: Option<String>,
        bid_denom: Option<String>,
    },
}

/// Signed Beacon update, direct (`relayer: None`) or relayed.
pub struct SignedDataParams {
    pub airnode: String,
    pub relayer: Option<String>,
    pub template_id: String,
    pub timestamp: u32,
    pub data: String,
    pub signature: String,
}

pub struct OevUpdateParams {
    pub oev_proxy: String,
    pub data_feed_id: String,
    pub update_id: String,
    pub timestamp: u32,
    pub data: String,
    pub packed_oev_update_signatures: Vec<String>,
    pub bid_amount: Uint128,
}

pub struct RegisterSubscriptionParams {
    pub target: SubscriptionTarget,
    pub conditions: UpdateConditions,
    pub relayer: String,
    pub sponsor: String,
}

pub struct UpdateConfigParams {
    pub admin: Option<String>,
    pub bid_denom: Option<String>,
}

#[cw_serde]
pub struct MigrateMsg {}

/// Query served by OEV proxy contracts.
#[cw_serde]
pub enum OevProxyQueryMsg {
    OevBeneficiary {},
}

#[cw_serde]
pub struct OevBeneficiaryResponse {
    pub beneficiary: Option<String>,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ServerConfig)]
    Config {},

    /// Stored record, `None` if never written.
    #[returns(Option<DataFeed>)]
    DataFeed { data_feed_id: String },

    #[returns(Option<DataFeed>)]
    OevProxyDataFeed {
        oev_proxy: String,
        data_feed_id: String,
    },

    #[returns(Uint128)]
    OevProxyBalance { oev_proxy: String },

    #[returns(Option<String>)]
    DapiNameToDataFeedId { dapi_name: String },

    #[returns(Option<Subscription>)]
    Subscription { subscription_id: String },

    #[returns(Option<Vec<String>>)]
    BeaconSetConstituents { beacon_set_id: String },

    #[returns(DataFeed)]
    ReadDataFeedWithId { data_feed_id: String },

    #[returns(DataFeed)]
    ReadDataFeedWithDapiName { dapi_name: String },

    #[returns(DataFeed)]
    ReadDataFeedWithDapiNameHash { dapi_name_hash: String },

    /// The fresher of the OEV overlay record and the public record.
    #[returns(DataFeed)]
    ReadDataFeedWithIdAsOevProxy {
        oev_proxy: String,
        data_feed_id: String,
    },

    #[returns(DataFeed)]
    ReadDataFeedWithDapiNameAsOevProxy {
        oev_proxy: String,
        dapi_name: String,
    },

    /// Whether a subscription update with `data` is due.
    #[returns(bool)]
    ConditionSubscriptionUpdate {
        subscription_id: String,
        data: String,
        /// Hex-encoded 96-byte update conditions
        condition_parameters: String,
    },

    #[returns(String)]
    DeriveBeaconId {
        airnode: String,
        template_id: String,
    },

    #[returns(String)]
    DeriveBeaconSetId { beacon_ids: Vec<String> },
}
