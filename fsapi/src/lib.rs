//! Interface to the filesystem driver under test.
//!
//! The validation harness never talks to a concrete filesystem. It
//! drives any implementation of [`Filesystem`] through mount, format,
//! open, write, read and close, and only looks at the status each
//! operation reports. Handle types are chosen by the driver; the
//! harness treats them as opaque.

#![no_std]

/// Logical drive number, as passed to mount and format.
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeviceId(pub u8);

/// Status codes a filesystem driver can report.
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FsError {
    /// The underlying block device failed.
    DiskError,
    /// The underlying block device is not ready.
    NotReady,
    /// The volume carries no recognisable filesystem.
    NoFilesystem,
    /// The named file does not exist.
    NotFound,
    /// There is no free space left on the volume.
    NotEnoughSpace,
    /// A read ran past the end of the file.
    EndOfFile,
    /// The handle does not refer to a valid open object.
    InvalidObject,
    /// The medium is write protected.
    WriteProtected,
    /// A parameter was out of range for the driver.
    InvalidParameter,
}

/// File opening modes.
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Open an existing file for reading.
    ReadOnly,
    /// Create the file, or truncate it if it already exists, and open
    /// it for writing.
    ReadWriteCreateOrTruncate,
}

/// Partition layout used when creating a filesystem.
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PartitionScheme {
    /// The volume lives inside a partition described by an MBR.
    Fdisk,
    /// The volume spans the whole device, no partition table.
    SuperFloppy,
}

/// A filesystem driver on a block storage device.
///
/// `Volume` is the driver's state for a mounted volume and `File` its
/// state for an open file. [`close_file`](Filesystem::close_file)
/// takes the file by value, so a closed handle cannot be used again.
pub trait Filesystem {
    /// State for a mounted volume.
    type Volume;
    /// State for an open file.
    type File;

    /// Mount the volume on the given logical drive.
    fn mount(&mut self, device: DeviceId) -> Result<Self::Volume, FsError>;

    /// Open the root directory of the volume as a listing.
    ///
    /// Reports [`FsError::NoFilesystem`] when the medium holds no
    /// recognisable filesystem, which callers may treat differently
    /// from other failures.
    fn open_root_dir(&mut self, volume: &mut Self::Volume, path: &str) -> Result<(), FsError>;

    /// Create a blank filesystem on the device, destroying whatever
    /// is on it. `alloc_unit` is the allocation unit size in bytes.
    fn make_filesystem(
        &mut self,
        device: DeviceId,
        scheme: PartitionScheme,
        alloc_unit: u32,
    ) -> Result<(), FsError>;

    /// Open the file at `path` on the volume root.
    fn open_file(
        &mut self,
        volume: &mut Self::Volume,
        path: &str,
        mode: Mode,
    ) -> Result<Self::File, FsError>;

    /// Write `data` at the file's current position. Returns the number
    /// of bytes the driver accepted, which may be short of
    /// `data.len()` when the volume fills up.
    fn write(&mut self, file: &mut Self::File, data: &[u8]) -> Result<usize, FsError>;

    /// Read from the file's current position into `data`. Returns the
    /// number of bytes read, zero at end of file.
    fn read(&mut self, file: &mut Self::File, data: &mut [u8]) -> Result<usize, FsError>;

    /// Size in bytes recorded in the open file's metadata.
    fn file_length(&self, file: &Self::File) -> u32;

    /// Close the file, flushing any buffered state.
    fn close_file(&mut self, file: Self::File) -> Result<(), FsError>;
}
