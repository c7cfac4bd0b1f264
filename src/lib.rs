mod constants;
mod digest;
mod error;
mod observer;
mod utils;

pub use crate::constants::{BLOCKSIZE, DIGEST_LEN, INITIAL_HASH, ROUND_CONSTANTS, SCHEDULE_LEN};
pub use crate::digest::Digest;
pub use crate::error::Sha1Error;
pub use crate::observer::{NoopObserver, Observer};
pub use crate::utils::{pad, split};

use crate::utils::{ch, maj, parity};

// Mixing function and constant for round t, one band per twenty rounds
#[inline(always)]
fn round_function(t: usize, x: u32, y: u32, z: u32) -> (u32, u32) {
    match t {
        0..=19 => (ch(x, y, z), ROUND_CONSTANTS[0]),
        20..=39 => (parity(x, y, z), ROUND_CONSTANTS[1]),
        40..=59 => (maj(x, y, z), ROUND_CONSTANTS[2]),
        _ => (parity(x, y, z), ROUND_CONSTANTS[3]),
    }
}

/// Expands a 64-byte block into the 80-word message schedule.
pub fn schedule(block: &[u8; BLOCKSIZE]) -> [u32; SCHEDULE_LEN] {
    schedule_observed(block, NoopObserver)
}

/// Like [`schedule`], reporting every word to `observer`.
pub fn schedule_observed<O: Observer>(
    block: &[u8; BLOCKSIZE],
    mut observer: O,
) -> [u32; SCHEDULE_LEN] {
    let mut message_schedule = [0_u32; SCHEDULE_LEN];

    // The first 16 words are the block itself, read big-endian
    for (t, bytes) in block.chunks_exact(4).enumerate() {
        message_schedule[t] = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        observer.word(t, message_schedule[t]);
    }

    for t in 16..SCHEDULE_LEN {
        message_schedule[t] = (message_schedule[t - 3]
            ^ message_schedule[t - 8]
            ^ message_schedule[t - 14]
            ^ message_schedule[t - 16])
            .rotate_left(1);
        observer.word(t, message_schedule[t]);
    }

    message_schedule
}

/// Folds one message schedule into the hash state with the 80 compression rounds.
pub fn compress(state: [u32; 5], message_schedule: &[u32; SCHEDULE_LEN]) -> [u32; 5] {
    compress_observed(state, message_schedule, NoopObserver)
}

/// Like [`compress`], reporting each round and the resulting state to `observer`.
pub fn compress_observed<O: Observer>(
    state: [u32; 5],
    message_schedule: &[u32; SCHEDULE_LEN],
    mut observer: O,
) -> [u32; 5] {
    // Initialize the five working variables with the last hash value
    let [mut a, mut b, mut c, mut d, mut e] = state;

    for (t, &word) in message_schedule.iter().enumerate() {
        let (f, k) = round_function(t, b, c, d);
        observer.round(t, k, f, &[a, b, c, d, e]);

        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(word);

        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    // Update the hash value
    let mut hash_value = state;
    for (h, v) in hash_value.iter_mut().zip([a, b, c, d, e]) {
        *h = h.wrapping_add(v);
    }

    observer.compressed(&hash_value);
    hash_value
}

/// Runs the full pipeline, reporting every stage to `observer`.
pub fn try_digest_observed<O: Observer>(data: &[u8], mut observer: O) -> Result<Digest, Sha1Error> {
    // Preprocess
    let padded_message = pad(data)?;
    observer.padded(&padded_message);

    let message_blocks = split(&padded_message)?;
    observer.blocks(message_blocks.len());
    log::debug!(
        "hashing {} bytes as {} block(s) of padded input",
        data.len(),
        message_blocks.len()
    );

    // Process each message block, chaining the state from one to the next
    let mut hash_value = INITIAL_HASH;
    for (i, block) in message_blocks.iter().enumerate() {
        observer.block(i, block);
        let message_schedule = schedule_observed(block, &mut observer);
        hash_value = compress_observed(hash_value, &message_schedule, &mut observer);
        log::trace!("block {i}: state {:08x?}", hash_value);
    }

    Ok(Digest::from_state(hash_value))
}

/// Hashes `data`, returning an error instead of panicking when the message is too long.
pub fn try_digest(data: &[u8]) -> Result<Digest, Sha1Error> {
    try_digest_observed(data, NoopObserver)
}

/// Hashes `data`, reporting every stage to `observer`.
///
/// # Panics
/// If the bit length of `data` does not fit in 64 bits.
pub fn digest_observed<O: Observer>(data: &[u8], observer: O) -> Digest {
    match try_digest_observed(data, observer) {
        Ok(digest) => digest,
        Err(err) => panic!("sha-1 precondition violated: {err}"),
    }
}

/// Hashes `data` into a [`Digest`].
///
/// # Panics
/// If the bit length of `data` does not fit in 64 bits.
pub fn digest(data: &[u8]) -> Digest {
    digest_observed(data, NoopObserver)
}

/// Computes the SHA-1 digest of `data` as 40 lowercase hex characters.
pub fn hash(data: &[u8]) -> String {
    digest(data).to_hex()
}

/// Checks `data` against an expected hex digest.
pub fn verify(data: &[u8], expected: &str) -> Result<bool, Sha1Error> {
    let expected: Digest = expected.parse()?;
    Ok(digest(data).ct_eq(&expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash() {
        assert_eq!(hash(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(hash(b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(
            hash(b"The quick brown fox jumps over the lazy dog"),
            "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"
        );
    }

    #[test]
    fn test_hash_two_blocks() {
        let message: &str = "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
        assert_eq!(pad(message.as_bytes()).unwrap().len(), 128);
        assert_eq!(hash(message.as_bytes()), "84983e441c3bd26ebaae4aa1f95129e5e54670f1");
    }

    #[test]
    fn test_hash_million_a() {
        let message = vec![b'a'; 1_000_000];
        assert_eq!(hash(&message), "34aa973cd4c4daa4f61eeb2bdbad27316534016f");
    }

    #[test]
    fn test_hash_is_deterministic() {
        let message = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(hash(message), hash(message));
    }

    #[test]
    fn test_single_bit_flip_changes_digest() {
        assert_eq!(
            hash(b"The quick brown fox jumps over the lazy cog"),
            "de9f2c7fd25e1b3afad3e85a0bd17d9b100db4b3"
        );

        let message = b"abc".to_vec();
        for bit in 0..24 {
            let mut flipped = message.clone();
            flipped[bit / 8] ^= 1 << (bit % 8);
            assert_ne!(hash(&flipped), hash(&message));
        }
    }

    #[test]
    fn test_schedule() {
        let block = split(&pad(b"abc").unwrap()).unwrap()[0];
        let w = schedule(&block);

        assert_eq!(w[0], 0x61626380);
        assert!(w[1..15].iter().all(|&word| word == 0));
        assert_eq!(w[15], 0x00000018);
        assert_eq!(w[16], 0xc2c4c700);
        for t in 16..80 {
            assert_eq!(w[t], (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1));
        }
    }

    #[test]
    fn test_compress_single_block() {
        let block = split(&pad(b"abc").unwrap()).unwrap()[0];
        let state = compress(INITIAL_HASH, &schedule(&block));
        assert_eq!(state, [0xa9993e36, 0x4706816a, 0xba3e2571, 0x7850c26c, 0x9cd0d89d]);
    }

    #[test]
    fn test_verify() {
        assert_eq!(verify(b"abc", "A9993E364706816ABA3E25717850C26C9CD0D89D"), Ok(true));
        assert_eq!(verify(b"abd", "a9993e364706816aba3e25717850c26c9cd0d89d"), Ok(false));
        assert!(verify(b"abc", "a9993e36").is_err());
    }

    #[derive(Default)]
    struct Recorder {
        padded_len: usize,
        blocks: usize,
        block_indices: Vec<usize>,
        words: usize,
        rounds: Vec<(usize, u32)>,
        states: Vec<[u32; 5]>,
    }

    impl Observer for Recorder {
        fn padded(&mut self, padded: &[u8]) {
            self.padded_len = padded.len();
        }

        fn blocks(&mut self, count: usize) {
            self.blocks = count;
        }

        fn block(&mut self, index: usize, _block: &[u8; BLOCKSIZE]) {
            self.block_indices.push(index);
        }

        fn word(&mut self, _index: usize, _word: u32) {
            self.words += 1;
        }

        fn round(&mut self, index: usize, k: u32, _f: u32, _vars: &[u32; 5]) {
            self.rounds.push((index, k));
        }

        fn compressed(&mut self, state: &[u32; 5]) {
            self.states.push(*state);
        }
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let mut recorder = Recorder::default();
        let result = digest_observed(&[0x61; 56], &mut recorder);

        assert_eq!(recorder.padded_len, 128);
        assert_eq!(recorder.blocks, 2);
        assert_eq!(recorder.block_indices, vec![0, 1]);
        assert_eq!(recorder.words, 160);
        assert_eq!(recorder.rounds.len(), 160);
        assert_eq!(recorder.rounds[0], (0, 0x5A827999));
        assert_eq!(recorder.rounds[20], (20, 0x6ED9EBA1));
        assert_eq!(recorder.rounds[59], (59, 0x8F1BBCDC));
        assert_eq!(recorder.rounds[79], (79, 0xCA62C1D6));
        assert_eq!(recorder.rounds[80], (0, 0x5A827999));
        assert_eq!(recorder.states.last().copied(), Some(result.state()));
        assert_eq!(result, digest(&[0x61; 56]));
    }
}
