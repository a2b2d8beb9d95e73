//! The mount/format/write/read/verify sequence.
//!
//! One linear pass over the driver under test. Every step that fails
//! aborts the run with a diagnostic naming the step; nothing is
//! retried.

use fsapi::{DeviceId, Filesystem, FsError, Mode, PartitionScheme};

use crate::pattern::{self, Mismatch};

/// Size of one write or read burst, and of the test buffer.
pub const DATA_SIZE: usize = 2048;

/// Total number of bytes written to the test file. A multiple of
/// [`DATA_SIZE`] greater than it, so the file takes more than one
/// write call and the driver's position tracking across calls gets
/// exercised.
pub const TEST_SIZE: usize = 4 * 1024;

/// Allocation unit handed to the format call, in bytes.
pub const ALLOC_UNIT: u32 = 512;

/// Logical drive the test runs on.
pub const DEVICE: DeviceId = DeviceId(0);

/// Root directory of the volume.
pub const ROOT_DIR: &str = "";

/// File created, rewritten and read back by the test.
pub const FILE_NAME: &str = "Basic.bin";

/// Why the storage test failed. One variant per sequence step.
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// Mounting the volume failed.
    Mount(FsError),
    /// Probing the root directory failed for a reason other than a
    /// missing filesystem.
    Probe(FsError),
    /// Creating the filesystem failed.
    Format(FsError),
    /// Opening the test file failed, in either phase.
    Open(FsError),
    /// A write burst failed or came up short.
    Write(FsError),
    /// A read burst failed or ended early.
    Read(FsError),
    /// Closing the file failed, in either phase.
    Close(FsError),
    /// The data read back did not match the pattern.
    Compare(Mismatch),
}

impl CheckError {
    /// Diagnostic for the step that failed.
    pub fn reason(&self) -> &'static str {
        match self {
            CheckError::Mount(_) => "mount error",
            CheckError::Probe(_) => "opendir error",
            CheckError::Format(_) => "make file system error",
            CheckError::Open(_) => "file open error",
            CheckError::Write(_) => "file write error",
            CheckError::Read(_) => "file read error",
            CheckError::Close(_) => "file close error",
            CheckError::Compare(_) => "data compare error",
        }
    }
}

/// Drive `fs` through the whole smoke-test sequence.
///
/// Mounts the volume, formats it, writes [`TEST_SIZE`] bytes of the
/// checkerboard pattern in [`DATA_SIZE`] bursts, closes and reopens
/// the file, reads it back in the same bursts and checks every byte.
/// `buffer` is reused for both phases; its previous contents do not
/// matter.
pub fn run<F: Filesystem>(fs: &mut F, buffer: &mut [u8; DATA_SIZE]) -> Result<(), CheckError> {
    let mut volume = fs.mount(DEVICE).map_err(CheckError::Mount)?;

    // Probe for an existing filesystem. A missing filesystem is fine,
    // the volume gets formatted next; note that a volume that probes
    // clean is formatted as well, so every run starts empty.
    match fs.open_root_dir(&mut volume, ROOT_DIR) {
        Ok(()) | Err(FsError::NoFilesystem) => {
            fs.make_filesystem(DEVICE, PartitionScheme::Fdisk, ALLOC_UNIT)
                .map_err(CheckError::Format)?;
        }
        Err(e) => return Err(CheckError::Probe(e)),
    }

    let mut file = fs
        .open_file(&mut volume, FILE_NAME, Mode::ReadWriteCreateOrTruncate)
        .map_err(CheckError::Open)?;

    pattern::fill(buffer);
    let mut written = 0;
    while written < TEST_SIZE {
        let accepted = fs.write(&mut file, buffer).map_err(CheckError::Write)?;
        if accepted != buffer.len() {
            return Err(CheckError::Write(FsError::NotEnoughSpace));
        }
        written += accepted;
    }

    fs.close_file(file).map_err(CheckError::Close)?;

    let mut file = fs
        .open_file(&mut volume, FILE_NAME, Mode::ReadOnly)
        .map_err(CheckError::Open)?;

    buffer.fill(0);
    let length = fs.file_length(&file) as usize;
    let mut consumed = 0;
    while consumed < length {
        // Each burst lands at the start of the buffer. The pattern
        // repeats every DATA_SIZE bytes, so the burst left in the
        // buffer at the end stands for all of them.
        let read = fs.read(&mut file, buffer).map_err(CheckError::Read)?;
        if read == 0 {
            return Err(CheckError::Read(FsError::EndOfFile));
        }
        consumed += read;
    }

    fs.close_file(file).map_err(CheckError::Close)?;

    pattern::verify(buffer).map_err(CheckError::Compare)
}
