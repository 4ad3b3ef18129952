use sha3::{Digest, Keccak256};

/// Length of an Airnode (signer) identity in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Length of every id and digest handled by the server.
pub const HASH_LENGTH: usize = 32;

const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak-256 over the concatenation of `parts`.
pub fn keccak256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Left-pads an unsigned integer into a 32-byte big-endian word.
pub fn uint_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Derives the address of an uncompressed secp256k1 public key (65 bytes, 0x04 prefix).
///
/// Returns `None` when the key is not in uncompressed form.
pub fn address_from_pubkey(pubkey: &[u8]) -> Option<[u8; ADDRESS_LENGTH]> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return None;
    }
    let hash = keccak256(&[&pubkey[1..]]);
    let mut address = [0u8; ADDRESS_LENGTH];
    address.copy_from_slice(&hash[12..]);
    Some(address)
}

/// The hash a signer actually signs for a given digest.
///
/// `keccak256("\x19Ethereum Signed Message:\n32" || digest)`
pub fn eth_signed_message_hash(digest: &[u8; 32]) -> [u8; 32] {
    keccak256(&[ETH_SIGNED_MESSAGE_PREFIX, digest])
}

/// `beaconId = keccak256(airnode || templateId)`
pub fn derive_beacon_id(airnode: &[u8; ADDRESS_LENGTH], template_id: &[u8; 32]) -> [u8; 32] {
    keccak256(&[airnode, template_id])
}

/// `beaconSetId = keccak256(beaconId_1 || ... || beaconId_n)`
///
/// Order matters: the same Beacons in a different order form a different set id.
pub fn derive_beacon_set_id(beacon_ids: &[[u8; 32]]) -> [u8; 32] {
    let parts: Vec<&[u8]> = beacon_ids.iter().map(|id| id.as_slice()).collect();
    keccak256(&parts)
}

/// Digest an Airnode signs for a direct Beacon update.
pub fn signed_data_digest(template_id: &[u8; 32], timestamp: u32, data: &[u8]) -> [u8; 32] {
    keccak256(&[template_id, &uint_word(timestamp as u128), data])
}

/// Digest an Airnode signs for an update that is relayed by another party.
pub fn relayed_data_digest(
    template_id: &[u8; 32],
    timestamp: u32,
    data: &[u8],
    relayer: &[u8; ADDRESS_LENGTH],
) -> [u8; 32] {
    keccak256(&[template_id, &uint_word(timestamp as u128), data, relayer])
}

/// Fields bound by an OEV update signature.
#[derive(Debug, Clone, Copy)]
pub struct OevUpdate<'a> {
    /// Canonical address of the OEV proxy (the override context).
    pub oev_proxy: &'a [u8],
    pub data_feed_id: &'a [u8; 32],
    pub update_id: &'a [u8; 32],
    pub timestamp: u32,
    pub data: &'a [u8],
    /// Canonical address of the searcher paying the bid.
    pub searcher: &'a [u8],
    pub bid_amount: u128,
}

impl OevUpdate<'_> {
    /// `keccak256(oevProxy || dataFeedId || updateId || timestamp || data || searcher || bid)`
    pub fn hash(&self) -> [u8; 32] {
        keccak256(&[
            self.oev_proxy,
            self.data_feed_id,
            self.update_id,
            &uint_word(self.timestamp as u128),
            self.data,
            self.searcher,
            &uint_word(self.bid_amount),
        ])
    }
}

/// Per-constituent digest for an OEV update: each Airnode signs the update hash
/// together with its own template id.
pub fn oev_constituent_digest(oev_update_hash: &[u8; 32], template_id: &[u8; 32]) -> [u8; 32] {
    keccak256(&[oev_update_hash, template_id])
}

/// Encodes a human readable dAPI name as bytes32 (right zero-padded).
///
/// Returns `None` if the name does not fit in 32 bytes.
pub fn dapi_name_to_bytes32(name: &str) -> Option<[u8; 32]> {
    let bytes = name.as_bytes();
    if bytes.len() > 32 {
        return None;
    }
    let mut out = [0u8; 32];
    out[..bytes.len()].copy_from_slice(bytes);
    Some(out)
}

pub fn dapi_name_hash(name: &[u8; 32]) -> [u8; 32] {
    keccak256(&[name])
}
