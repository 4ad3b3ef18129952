pub mod conditions;
pub mod freshness;
pub mod guard;
pub mod hashing;
pub mod median;
pub mod oev;
pub mod types;

pub use conditions::{update_in_percentage, update_is_due, HUNDRED_PERCENT};
pub use freshness::{check_freshness, FreshnessError};
pub use guard::{decode_data, encode_data, DecodeError, INT224_MAX, INT224_MIN};
pub use hashing::{derive_beacon_id, derive_beacon_set_id, keccak256};
pub use median::aggregate;
pub use oev::PackedOevSignature;
pub use types::{DataFeed, SubscriptionTarget, UpdateConditions};
