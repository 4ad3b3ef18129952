use cosmwasm_std::{Int256, Uint256};

use crate::guard::{narrow_to_int224, DecodeError};
use crate::types::{DataFeed, UpdateConditions};

/// Fixed-point scale for percentages: 1e8 is 100%.
pub const HUNDRED_PERCENT: u64 = 100_000_000;

/// Encoded condition parameters are three 32-byte words.
pub const CONDITION_PARAMETERS_LENGTH: usize = 96;

impl UpdateConditions {
    /// `threshold (uint256) || reference (int256) || heartbeat (uint256)`
    pub fn encode(&self) -> [u8; CONDITION_PARAMETERS_LENGTH] {
        let mut out = [0u8; CONDITION_PARAMETERS_LENGTH];
        out[..32].copy_from_slice(&self.deviation_threshold_percentage.to_be_bytes());
        out[32..64].copy_from_slice(&self.deviation_reference.to_be_bytes());
        out[88..].copy_from_slice(&self.heartbeat_interval.to_be_bytes());
        out
    }

    /// Decodes parameters produced by [`UpdateConditions::encode`].
    ///
    /// Returns `Ok(None)` when the length is wrong. A heartbeat that does not fit
    /// `u64` saturates, which makes it unreachable.
    pub fn decode(parameters: &[u8]) -> Result<Option<Self>, DecodeError> {
        if parameters.len() != CONDITION_PARAMETERS_LENGTH {
            return Ok(None);
        }
        let mut word = [0u8; 32];

        word.copy_from_slice(&parameters[..32]);
        let deviation_threshold_percentage = Uint256::from_be_bytes(word);

        word.copy_from_slice(&parameters[32..64]);
        let deviation_reference = narrow_to_int224(Int256::from_be_bytes(word))?;

        let heartbeat_interval = if parameters[64..88].iter().any(|b| *b != 0) {
            u64::MAX
        } else {
            let mut tail = [0u8; 8];
            tail.copy_from_slice(&parameters[88..]);
            u64::from_be_bytes(tail)
        };

        Ok(Some(UpdateConditions {
            deviation_threshold_percentage,
            deviation_reference,
            heartbeat_interval,
        }))
    }
}

fn unsigned_abs(value: Int256) -> Uint256 {
    let magnitude = if value.is_negative() {
        Int256::zero() - value
    } else {
        value
    };
    Uint256::from_be_bytes(magnitude.to_be_bytes())
}

/// `|updated - initial| * 1e8 / |initial - reference|`, or `Uint256::MAX` when
/// the initial value sits exactly on the reference.
///
/// All inputs are int224, so the differences and the scaled product fit 256 bits.
pub fn update_in_percentage(initial: Int256, updated: Int256, reference: Int256) -> Uint256 {
    let delta = unsigned_abs(updated - initial);
    let base = unsigned_abs(initial - reference);
    if base.is_zero() {
        return Uint256::MAX;
    }
    delta * Uint256::from(HUNDRED_PERCENT) / base
}

/// Whether publishing `updated_value` over `current` is due under `conditions` at `now`.
///
/// A never-written feed is always due. Otherwise either the heartbeat has
/// elapsed or the deviation reached the threshold.
pub fn update_is_due(
    current: &DataFeed,
    updated_value: Int256,
    conditions: &UpdateConditions,
    now: u64,
) -> bool {
    if !current.is_initialized() {
        return true;
    }
    let heartbeat_due = conditions.heartbeat_interval != 0
        && (current.timestamp as u64)
            .checked_add(conditions.heartbeat_interval)
            .is_some_and(|due_at| due_at <= now);
    let deviation_due = !conditions.deviation_threshold_percentage.is_zero()
        && update_in_percentage(current.value, updated_value, conditions.deviation_reference)
            >= conditions.deviation_threshold_percentage;
    heartbeat_due || deviation_due
}
