// Size of a message block in bytes (512 bits)
pub const BLOCKSIZE: usize = 64;

// Bytes reserved at the end of the padded message for the bit length
pub const LENGTH_FIELD: usize = 8;

// Number of words in the expanded message schedule, one per round
pub const SCHEDULE_LEN: usize = 80;

// Size of the final digest in bytes
pub const DIGEST_LEN: usize = 20;

// Initial hash value H(0)
pub const INITIAL_HASH: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

// One constant per band of twenty rounds
pub const ROUND_CONSTANTS: [u32; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];
