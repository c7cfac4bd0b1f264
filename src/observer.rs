use crate::constants::BLOCKSIZE;

/// Hook into the stages of a hash computation.
///
/// Every method defaults to doing nothing, so an implementation only overrides
/// the stages it wants to see. The pipeline is generic over the observer, which
/// lets [`NoopObserver`] compile down to the plain hashing loop.
pub trait Observer {
    /// Called once with the padded message.
    fn padded(&mut self, _padded: &[u8]) {}

    /// Called once with the number of blocks the padded message was split into.
    fn blocks(&mut self, _count: usize) {}

    /// Called before a block is scheduled and compressed.
    fn block(&mut self, _index: usize, _block: &[u8; BLOCKSIZE]) {}

    /// Called for each of the 80 words of a message schedule, in order.
    fn word(&mut self, _index: usize, _word: u32) {}

    /// Called at the start of each compression round with the round constant,
    /// the mixing function output and the working variables `a..e`.
    fn round(&mut self, _index: usize, _k: u32, _f: u32, _vars: &[u32; 5]) {}

    /// Called after a block has been folded into the hash state.
    fn compressed(&mut self, _state: &[u32; 5]) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn padded(&mut self, padded: &[u8]) {
        (**self).padded(padded)
    }

    fn blocks(&mut self, count: usize) {
        (**self).blocks(count)
    }

    fn block(&mut self, index: usize, block: &[u8; BLOCKSIZE]) {
        (**self).block(index, block)
    }

    fn word(&mut self, index: usize, word: u32) {
        (**self).word(index, word)
    }

    fn round(&mut self, index: usize, k: u32, f: u32, vars: &[u32; 5]) {
        (**self).round(index, k, f, vars)
    }

    fn compressed(&mut self, state: &[u32; 5]) {
        (**self).compressed(state)
    }
}
