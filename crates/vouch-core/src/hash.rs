/// 64-bit structural hash used to align array elements during comparison.
pub(crate) type HashCode = [u8; 8];

/// Compute the FNV-1a hash of the provided bytes.
#[must_use]
pub(crate) fn hash_bytes(input: &[u8]) -> HashCode {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut hash = OFFSET_BASIS;
    for byte in input {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash.to_le_bytes()
}
