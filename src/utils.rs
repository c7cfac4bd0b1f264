use crate::constants::{BLOCKSIZE, LENGTH_FIELD};
use crate::error::Sha1Error;

// Pads the message so its length is a multiple of 512 bits: a single 1 bit (0x80),
// zero bytes up to 448 mod 512 bits, then the original bit length as a big-endian u64
pub fn pad(data: &[u8]) -> Result<Vec<u8>, Sha1Error> {
    let num_bits = (data.len() as u64)
        .checked_mul(8)
        .ok_or(Sha1Error::MessageTooLong { len: data.len() })?;

    // Bytes of zero fill so that data + 0x80 + zeros lands on 56 mod 64
    let zero_bytes = (BLOCKSIZE - LENGTH_FIELD - 1 + BLOCKSIZE - data.len() % BLOCKSIZE) % BLOCKSIZE;

    let mut padded_message = Vec::with_capacity(data.len() + 1 + zero_bytes + LENGTH_FIELD);
    padded_message.extend_from_slice(data);
    padded_message.push(0x80);
    padded_message.resize(padded_message.len() + zero_bytes, 0x00);
    padded_message.extend_from_slice(&num_bits.to_be_bytes());

    debug_assert_eq!(padded_message.len() % BLOCKSIZE, 0);
    Ok(padded_message)
}

// Splits the padded message into consecutive 64-byte blocks
pub fn split(data: &[u8]) -> Result<Vec<[u8; BLOCKSIZE]>, Sha1Error> {
    if data.len() % BLOCKSIZE != 0 {
        return Err(Sha1Error::UnalignedLength { len: data.len() });
    }

    let mut blocks: Vec<[u8; BLOCKSIZE]> = Vec::with_capacity(data.len() / BLOCKSIZE);
    for chunk in data.chunks_exact(BLOCKSIZE) {
        let mut block = [0_u8; BLOCKSIZE];
        block.copy_from_slice(chunk);
        blocks.push(block);
    }

    Ok(blocks)
}

// ============== Operations on Words ================== //
pub fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

pub fn parity(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

pub fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}
