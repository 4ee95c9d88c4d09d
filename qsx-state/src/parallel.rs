//! Chunk dispatch shared by the gate kernels
//!
//! Every kernel in this crate walks the buffer in aligned chunks whose halves
//! form the disjoint index pairs of a target qubit, so each pair is touched
//! by exactly one worker. Small buffers stay on the calling thread; large
//! ones fan out across the rayon pool.

use qsx_core::types::Complex;
use rayon::prelude::*;

/// Buffers below this many scalars are processed sequentially.
pub(crate) const PARALLEL_THRESHOLD: usize = 1 << 12;

/// Run `f` over consecutive `size`-scalar chunks with their chunk index.
pub(crate) fn for_each_chunk<F>(buf: &mut [Complex], size: usize, f: F)
where
    F: Fn(usize, &mut [Complex]) + Send + Sync,
{
    if buf.len() >= PARALLEL_THRESHOLD {
        buf.par_chunks_mut(size)
            .enumerate()
            .for_each(|(i, chunk)| f(i, chunk));
    } else {
        for (i, chunk) in buf.chunks_mut(size).enumerate() {
            f(i, chunk);
        }
    }
}
