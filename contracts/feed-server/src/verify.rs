use cosmwasm_std::Api;
use pushfeed_common::hashing::{address_from_pubkey, eth_signed_message_hash, ADDRESS_LENGTH};
use pushfeed_common::oev::SIGNATURE_LENGTH;

/// Errors from secp256k1 signer recovery.
#[derive(Debug, PartialEq, Eq)]
pub enum VerifyError {
    InvalidSignatureLength(usize),
    InvalidRecoveryId(u8),
    RecoveryFailed(String),
    SignatureMismatch {
        expected: [u8; ADDRESS_LENGTH],
        recovered: [u8; ADDRESS_LENGTH],
    },
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyError::InvalidSignatureLength(len) => write!(
                f,
                "invalid signature length (expected {} bytes, got {})",
                SIGNATURE_LENGTH, len
            ),
            VerifyError::InvalidRecoveryId(v) => write!(f, "invalid recovery id {}", v),
            VerifyError::RecoveryFailed(msg) => write!(f, "public key recovery failed: {}", msg),
            VerifyError::SignatureMismatch {
                expected,
                recovered,
            } => write!(
                f,
                "recovered signer {} is not {}",
                hex::encode(recovered),
                hex::encode(expected)
            ),
        }
    }
}

/// Recovers the signer of `digest` from a 65-byte `r || s || v` signature.
///
/// The signature is over the Ethereum signed-message hash of the digest.
/// `v` may be given as 0/1 or 27/28.
pub fn recover_signer(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &[u8],
) -> Result<[u8; ADDRESS_LENGTH], VerifyError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(VerifyError::InvalidSignatureLength(signature.len()));
    }
    let recovery_param = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        v => return Err(VerifyError::InvalidRecoveryId(v)),
    };

    let message_hash = eth_signed_message_hash(digest);
    let pubkey = api
        .secp256k1_recover_pubkey(&message_hash, &signature[..64], recovery_param)
        .map_err(|e| VerifyError::RecoveryFailed(e.to_string()))?;

    address_from_pubkey(&pubkey)
        .ok_or_else(|| VerifyError::RecoveryFailed("unexpected public key encoding".to_string()))
}

/// Checks that `signature` over `digest` was produced by `expected`.
pub fn verify_signer(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &[u8],
    expected: &[u8; ADDRESS_LENGTH],
) -> Result<(), VerifyError> {
    let recovered = recover_signer(api, digest, signature)?;
    if &recovered != expected {
        return Err(VerifyError::SignatureMismatch {
            expected: *expected,
            recovered,
        });
    }
    Ok(())
}
