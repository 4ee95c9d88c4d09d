//! Binary state-vector snapshots
//!
//! Layout: an 8-byte magic `QSXSNP1\0`, a u32 format version, a u32 flags
//! word (reserved, zero), a u64 qubit count, then the 2^n amplitudes as
//! native-endian (re, im) float pairs. Loading verifies the header and the
//! exact payload length and takes the amplitudes as stored, so a save/load
//! round trip reproduces the buffer bit for bit.

use crate::error::StateError;
use crate::state_vector::StateVector;
use crate::Result;
use qsx_core::types::{Complex, Real};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: &[u8; 8] = b"QSXSNP1\0";
const VERSION: u32 = 1;
const REAL_SIZE: usize = std::mem::size_of::<Real>();

impl StateVector {
    /// Write the state to a snapshot file
    ///
    /// # Errors
    /// Propagates I/O failures as [`StateError::Io`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(MAGIC)?;
        out.write_all(&VERSION.to_ne_bytes())?;
        out.write_all(&0u32.to_ne_bytes())?;
        out.write_all(&(self.num_qubits() as u64).to_ne_bytes())?;
        for amp in self.amplitudes() {
            out.write_all(&amp.re.to_ne_bytes())?;
            out.write_all(&amp.im.to_ne_bytes())?;
        }
        out.flush()?;
        Ok(())
    }

    /// Read a snapshot file back into a state vector
    ///
    /// With `expected_qubits` set, a snapshot of any other size is rejected.
    ///
    /// # Errors
    /// Returns [`StateError::InvalidFormat`] on a magic, version, or qubit
    /// count mismatch and on a truncated or oversized payload;
    /// [`StateError::Io`] on underlying read failures.
    pub fn load(path: impl AsRef<Path>, expected_qubits: Option<usize>) -> Result<Self> {
        let mut input = BufReader::new(File::open(path)?);

        let mut magic = [0u8; 8];
        read_chunk(&mut input, &mut magic, "magic")?;
        if magic[..7] != MAGIC[..7] {
            return Err(StateError::InvalidFormat("bad magic".into()));
        }

        let mut word = [0u8; 4];
        read_chunk(&mut input, &mut word, "version")?;
        let version = u32::from_ne_bytes(word);
        if version != VERSION {
            return Err(StateError::InvalidFormat(format!(
                "unsupported version {}",
                version
            )));
        }
        read_chunk(&mut input, &mut word, "flags")?;

        let mut qword = [0u8; 8];
        read_chunk(&mut input, &mut qword, "qubit count")?;
        let num_qubits = u64::from_ne_bytes(qword) as usize;
        if let Some(expected) = expected_qubits {
            if num_qubits != expected {
                return Err(StateError::InvalidFormat(format!(
                    "snapshot has {} qubits, expected {}",
                    num_qubits, expected
                )));
            }
        }
        let dimension = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or(StateError::DimensionOverflow { num_qubits })?;

        let mut amplitudes = Vec::with_capacity(dimension);
        let mut real = [0u8; REAL_SIZE];
        for _ in 0..dimension {
            read_chunk(&mut input, &mut real, "amplitudes")?;
            let re = Real::from_ne_bytes(real);
            read_chunk(&mut input, &mut real, "amplitudes")?;
            let im = Real::from_ne_bytes(real);
            amplitudes.push(Complex::new(re, im));
        }
        let mut probe = [0u8; 1];
        if input.read(&mut probe)? != 0 {
            return Err(StateError::InvalidFormat("trailing data".into()));
        }

        Self::from_amplitudes(num_qubits, amplitudes)
    }
}

fn read_chunk(input: &mut impl Read, buf: &mut [u8], what: &str) -> Result<()> {
    input
        .read_exact(buf)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => {
                StateError::InvalidFormat(format!("truncated {}", what))
            }
            _ => StateError::Io(e),
        })
}
