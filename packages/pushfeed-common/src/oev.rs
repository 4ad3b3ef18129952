use crate::hashing::{derive_beacon_id, ADDRESS_LENGTH, HASH_LENGTH};

/// Byte length of a recoverable secp256k1 signature (`r || s || v`).
pub const SIGNATURE_LENGTH: usize = 65;

const HEADER_LENGTH: usize = ADDRESS_LENGTH + HASH_LENGTH;

/// One entry of an OEV update: `airnode(20) || templateId(32) || signature(0 | 65)`.
///
/// An empty signature is an abstention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedOevSignature {
    pub airnode: [u8; ADDRESS_LENGTH],
    pub template_id: [u8; HASH_LENGTH],
    pub signature: Vec<u8>,
}

impl PackedOevSignature {
    /// Returns `None` unless the entry is exactly 52 or 117 bytes long.
    pub fn decode(packed: &[u8]) -> Option<Self> {
        if packed.len() != HEADER_LENGTH && packed.len() != HEADER_LENGTH + SIGNATURE_LENGTH {
            return None;
        }
        let mut airnode = [0u8; ADDRESS_LENGTH];
        airnode.copy_from_slice(&packed[..ADDRESS_LENGTH]);
        let mut template_id = [0u8; HASH_LENGTH];
        template_id.copy_from_slice(&packed[ADDRESS_LENGTH..HEADER_LENGTH]);
        Some(PackedOevSignature {
            airnode,
            template_id,
            signature: packed[HEADER_LENGTH..].to_vec(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LENGTH + self.signature.len());
        out.extend_from_slice(&self.airnode);
        out.extend_from_slice(&self.template_id);
        out.extend_from_slice(&self.signature);
        out
    }

    pub fn beacon_id(&self) -> [u8; 32] {
        derive_beacon_id(&self.airnode, &self.template_id)
    }

    pub fn is_abstention(&self) -> bool {
        self.signature.is_empty()
    }
}
