//! Checkerboard test pattern.
//!
//! The pattern is a pure function of byte position, so a read-back
//! buffer can be checked without keeping a copy of what was written:
//! even offsets hold `i & 0x55`, odd offsets hold `i & 0xAA`.

/// Pattern byte at `index`.
#[inline]
pub fn expected(index: usize) -> u8 {
    if index & 1 == 0 {
        (index & 0x55) as u8
    } else {
        (index & 0xAA) as u8
    }
}

/// Fill `buffer` with the pattern, starting from offset zero.
pub fn fill(buffer: &mut [u8]) {
    for (index, byte) in buffer.iter_mut().enumerate() {
        *byte = expected(index);
    }
}

/// Description of a failed buffer check.
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Position of the first byte that did not match.
    pub index: usize,
    /// Pattern byte that should have been there.
    pub expected: u8,
    /// Byte actually found.
    pub actual: u8,
    /// Total number of mismatching bytes in the buffer.
    pub mismatches: usize,
}

/// Check every byte of `buffer` against the pattern.
///
/// The whole buffer is scanned even after the first failure; the error
/// carries the first failing position and the total mismatch count.
pub fn verify(buffer: &[u8]) -> Result<(), Mismatch> {
    let mut first: Option<Mismatch> = None;
    let mut mismatches = 0;
    for (index, &actual) in buffer.iter().enumerate() {
        let expected = expected(index);
        if actual != expected {
            mismatches += 1;
            first.get_or_insert(Mismatch {
                index,
                expected,
                actual,
                mismatches: 0,
            });
        }
    }
    match first {
        None => Ok(()),
        Some(mut m) => {
            m.mismatches = mismatches;
            Err(m)
        }
    }
}
