use cosmwasm_std::{to_json_binary, Binary, Deps, Env};
use pushfeed_common::guard::DATA_LENGTH;
use pushfeed_common::{
    decode_data, derive_beacon_set_id, update_is_due, DataFeed, SubscriptionTarget,
    UpdateConditions,
};

use crate::error::ContractError;
use crate::execute::aggregate_beacons;
use crate::helpers::{decode_fixed, decode_hex};
use crate::state::{DATA_FEEDS, SUBSCRIPTIONS};

/// Whether fulfilling `subscription_id` with `data` is due now.
///
/// For a Beacon subscription `data` is the candidate value. For a Beacon set
/// subscription it is the concatenated Beacon ids, and the candidate is the
/// median of their current values.
pub fn query_condition_subscription_update(
    deps: Deps,
    env: Env,
    subscription_id: String,
    data: String,
    condition_parameters: String,
) -> Result<Binary, ContractError> {
    let id = decode_fixed::<32>(&subscription_id, "subscription_id")?;
    let subscription = SUBSCRIPTIONS.may_load(deps.storage, &id)?.ok_or_else(|| {
        ContractError::SubscriptionNotRegistered {
            subscription_id: hex::encode(id),
        }
    })?;
    let data_feed_id = decode_fixed::<32>(&subscription.data_feed_id, "data_feed_id")?;
    let data = decode_hex(&data, "data")?;

    let beacon_ids = match subscription.target {
        SubscriptionTarget::Beacon { .. } => {
            if data.len() != DATA_LENGTH {
                return Err(ContractError::DataLengthIncorrect { got: data.len() });
            }
            None
        }
        SubscriptionTarget::BeaconSet { .. } => {
            if data.len() < 2 * DATA_LENGTH || data.len() % DATA_LENGTH != 0 {
                return Err(ContractError::DataLengthIncorrect { got: data.len() });
            }
            let ids: Vec<[u8; 32]> = data
                .chunks_exact(DATA_LENGTH)
                .map(|chunk| {
                    let mut id = [0u8; 32];
                    id.copy_from_slice(chunk);
                    id
                })
                .collect();
            Some(ids)
        }
    };

    let parameters = decode_hex(&condition_parameters, "condition_parameters")?;
    let conditions = UpdateConditions::decode(&parameters)?.ok_or(
        ContractError::IncorrectParameterLength {
            got: parameters.len(),
        },
    )?;

    let updated_value = match beacon_ids {
        None => decode_data(&data)?,
        Some(ids) => {
            if derive_beacon_set_id(&ids) != data_feed_id {
                return Err(ContractError::FeedIdMismatch);
            }
            aggregate_beacons(deps.storage, &ids)?.value
        }
    };

    let current = DATA_FEEDS
        .may_load(deps.storage, &data_feed_id)?
        .unwrap_or(DataFeed::UNINITIALIZED);
    let due = update_is_due(&current, updated_value, &conditions, env.block.time.seconds());
    Ok(to_json_binary(&due)?)
}
