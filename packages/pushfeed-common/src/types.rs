use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Int256, Uint256};

/// A stored `(value, timestamp)` pair. Beacons, Beacon sets and OEV overlay
/// records all share this shape.
///
/// `timestamp == 0` marks a record that has never been written.
#[cw_serde]
#[derive(Copy, Eq)]
pub struct DataFeed {
    /// Always within the int224 range.
    pub value: Int256,
    pub timestamp: u32,
}

impl DataFeed {
    pub const UNINITIALIZED: DataFeed = DataFeed {
        value: Int256::zero(),
        timestamp: 0,
    };

    pub fn is_initialized(&self) -> bool {
        self.timestamp != 0
    }
}

/// Update conditions attached to a publish/subscribe subscription.
#[cw_serde]
pub struct UpdateConditions {
    /// Deviation that makes an update due, where 1e8 is 100%. Zero disables the check.
    pub deviation_threshold_percentage: Uint256,
    /// Value deviation is measured from. Must fit int224.
    pub deviation_reference: Int256,
    /// Seconds after which an update is due regardless of deviation. Zero disables the check.
    pub heartbeat_interval: u64,
}

/// What a subscription keeps up to date.
#[cw_serde]
pub enum SubscriptionTarget {
    Beacon {
        /// Hex, 20 bytes
        airnode: String,
        /// Hex, 32 bytes
        template_id: String,
    },
    BeaconSet {
        /// Hex, 32 bytes each, in Beacon set order
        beacon_ids: Vec<String>,
    },
}
