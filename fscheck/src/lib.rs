//! Smoke test for a filesystem driver on block storage.
//!
//! Brings a volume up from scratch and checks the basic read/write
//! contract end to end: mount, format, create a file, write a known
//! pattern in bursts, close, reopen, read it back in bursts and
//! compare every byte. Meant for board bring-up, where the question is
//! "does the storage stack work at all", not "how fast is it".
//!
//! The driver under test is anything implementing
//! [`fsapi::Filesystem`]; this crate contains no filesystem of its
//! own.

#![cfg_attr(not(test), no_std)]

pub mod pattern;
pub mod report;
pub mod sequencer;

pub use report::{Outcome, Suite};
pub use sequencer::{CheckError, DATA_SIZE, TEST_SIZE};

use fsapi::Filesystem;

/// Name the storage test case reports under.
pub const STORAGE_TEST_NAME: &str = "storage read/write test";

/// Run the storage read/write test case and report its outcome.
///
/// `buffer` is the caller-owned test buffer; on constrained targets it
/// should live in static storage rather than on the stack.
pub fn storage_read_write_test<F: Filesystem>(
    fs: &mut F,
    buffer: &mut [u8; DATA_SIZE],
) -> Outcome {
    Outcome::new(STORAGE_TEST_NAME, sequencer::run(fs, buffer))
}
