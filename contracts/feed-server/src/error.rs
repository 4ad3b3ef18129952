use cosmwasm_std::{StdError, Uint128};
use pushfeed_common::{DecodeError, FreshnessError};
use thiserror::Error;

use crate::verify::VerifyError;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("invalid hex input: {field}")]
    InvalidHex { field: String },

    #[error("invalid length for {field}: expected {expected} bytes, got {got}")]
    InvalidLength {
        field: String,
        expected: usize,
        got: usize,
    },

    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("value {value} does not fit in int224")]
    ValueOutOfRange { value: String },

    #[error("invalid signature: {reason}")]
    InvalidSignatureShape { reason: String },

    #[error("signature mismatch: expected signer {expected}, recovered {recovered}")]
    SignatureMismatch { expected: String, recovered: String },

    #[error("missing signature for single Beacon OEV update")]
    MissingSignature,

    #[error("data feed id mismatch")]
    FeedIdMismatch,

    #[error("insufficient signatures: {verified} of {total}")]
    InsufficientSignatures { verified: usize, total: usize },

    #[error("timestamp {candidate} does not advance stored timestamp {stored}")]
    DoesNotAdvanceTimestamp { candidate: u32, stored: u32 },

    #[error("timestamp {candidate} not plausible at {now}")]
    TimestampNotPlausible { candidate: u32, now: u64 },

    #[error("Beacon set needs at least 2 Beacons, got {got}")]
    InsufficientConstituents { got: usize },

    #[error("update does not change the Beacon set")]
    NoChangeToApply,

    #[error("subscription {subscription_id} not registered")]
    SubscriptionNotRegistered { subscription_id: String },

    #[error("subscription {subscription_id} already registered")]
    SubscriptionAlreadyRegistered { subscription_id: String },

    #[error("subscription {subscription_id} does not target a {expected}")]
    SubscriptionKindMismatch {
        subscription_id: String,
        expected: String,
    },

    #[error("incorrect condition parameter length: {got}")]
    IncorrectParameterLength { got: usize },

    #[error("data length not correct: {got}")]
    DataLengthIncorrect { got: usize },

    #[error("dAPI name is zero")]
    NameZero,

    #[error("dAPI name not set")]
    NameNotBound,

    #[error("data feed not initialized")]
    NotInitialized,

    #[error("OEV beneficiary not set for {oev_proxy}")]
    BeneficiaryZero { oev_proxy: String },

    #[error("no pending OEV balance for {oev_proxy}")]
    NoPendingBalance { oev_proxy: String },

    #[error("withdrawal failed: {reason}")]
    WithdrawalFailed { reason: String },

    #[error("bid amount {declared} does not match attached {attached}")]
    BidAmountMismatch { declared: Uint128, attached: Uint128 },

    #[error("wrong denom: {denom}")]
    WrongDenom { denom: String },

    #[error("unknown reply id {id}")]
    UnknownReplyId { id: u64 },
}

impl ContractError {
    /// Stable label off-chain automation branches on.
    pub fn code(&self) -> &'static str {
        match self {
            ContractError::Std(_) => "Std",
            ContractError::Unauthorized { .. } => "Unauthorized",
            ContractError::InvalidHex { .. } => "InvalidHex",
            ContractError::InvalidLength { .. } => "InvalidLength",
            ContractError::MalformedPayload { .. } => "MalformedPayload",
            ContractError::ValueOutOfRange { .. } => "ValueOutOfRange",
            ContractError::InvalidSignatureShape { .. } => "InvalidSignatureShape",
            ContractError::SignatureMismatch { .. } => "SignatureMismatch",
            ContractError::MissingSignature => "MissingSignature",
            ContractError::FeedIdMismatch => "FeedIdMismatch",
            ContractError::InsufficientSignatures { .. } => "InsufficientSignatures",
            ContractError::DoesNotAdvanceTimestamp { .. } => "DoesNotAdvanceTimestamp",
            ContractError::TimestampNotPlausible { .. } => "TimestampNotPlausible",
            ContractError::InsufficientConstituents { .. } => "InsufficientConstituents",
            ContractError::NoChangeToApply => "NoChangeToApply",
            ContractError::SubscriptionNotRegistered { .. } => "SubscriptionNotRegistered",
            ContractError::SubscriptionAlreadyRegistered { .. } => "SubscriptionAlreadyRegistered",
            ContractError::SubscriptionKindMismatch { .. } => "SubscriptionKindMismatch",
            ContractError::IncorrectParameterLength { .. } => "IncorrectParameterLength",
            ContractError::DataLengthIncorrect { .. } => "DataLengthIncorrect",
            ContractError::NameZero => "NameZero",
            ContractError::NameNotBound => "NameNotBound",
            ContractError::NotInitialized => "NotInitialized",
            ContractError::BeneficiaryZero { .. } => "BeneficiaryZero",
            ContractError::NoPendingBalance { .. } => "NoPendingBalance",
            ContractError::WithdrawalFailed { .. } => "WithdrawalFailed",
            ContractError::BidAmountMismatch { .. } => "BidAmountMismatch",
            ContractError::WrongDenom { .. } => "WrongDenom",
            ContractError::UnknownReplyId { .. } => "UnknownReplyId",
        }
    }
}

impl From<DecodeError> for ContractError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::MalformedPayload { .. } => ContractError::MalformedPayload {
                reason: err.to_string(),
            },
            DecodeError::ValueOutOfRange { value } => ContractError::ValueOutOfRange {
                value: value.to_string(),
            },
        }
    }
}

impl From<FreshnessError> for ContractError {
    fn from(err: FreshnessError) -> Self {
        match err {
            FreshnessError::DoesNotAdvanceTimestamp { candidate, stored } => {
                ContractError::DoesNotAdvanceTimestamp { candidate, stored }
            }
            FreshnessError::TimestampNotPlausible { candidate, now } => {
                ContractError::TimestampNotPlausible { candidate, now }
            }
        }
    }
}

impl From<VerifyError> for ContractError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::SignatureMismatch {
                expected,
                recovered,
            } => ContractError::SignatureMismatch {
                expected: hex::encode(expected),
                recovered: hex::encode(recovered),
            },
            other => ContractError::InvalidSignatureShape {
                reason: other.to_string(),
            },
        }
    }
}
