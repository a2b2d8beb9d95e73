//! In-memory filesystem driver for exercising the harness on the host.
//!
//! `RamFs` keeps its files in a map and records every trait call it
//! receives, so tests can assert on ordering as well as on results.
//! It can be told to fail a particular operation or to corrupt a byte
//! on the way out of a read.

use std::collections::BTreeMap;

use fsapi::{DeviceId, Filesystem, FsError, Mode, PartitionScheme};

/// Operations the harness can invoke, as recorded in the call log.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Op {
    Mount,
    OpenRootDir,
    MakeFilesystem,
    OpenFile,
    Write,
    Read,
    CloseFile,
}

pub struct RamVolume;

pub struct RamFile {
    name: String,
    mode: Mode,
    pos: usize,
}

pub struct RamFs {
    formatted: bool,
    files: BTreeMap<String, Vec<u8>>,
    /// Every trait call received, in order.
    pub ops: Vec<Op>,
    fail_on: Option<(Op, usize)>,
    corrupt_read_at: Option<usize>,
    accept_at_most: Option<usize>,
    eof_at: Option<usize>,
}

#[allow(dead_code)]
impl RamFs {
    /// A blank, never formatted medium.
    pub fn new() -> Self {
        Self {
            formatted: false,
            files: BTreeMap::new(),
            ops: Vec::new(),
            fail_on: None,
            corrupt_read_at: None,
            accept_at_most: None,
            eof_at: None,
        }
    }

    /// A medium that already carries a (possibly populated) filesystem.
    pub fn formatted() -> Self {
        Self {
            formatted: true,
            ..Self::new()
        }
    }

    /// Fail the first occurrence of `op` with a disk error.
    pub fn fail_on(self, op: Op) -> Self {
        self.fail_on_nth(op, 1)
    }

    /// Fail the `nth` occurrence of `op` (1-based) with a disk error.
    pub fn fail_on_nth(mut self, op: Op, nth: usize) -> Self {
        self.fail_on = Some((op, nth));
        self
    }

    /// Flip the byte at absolute file offset `offset` in read results.
    pub fn corrupt_read_at(mut self, offset: usize) -> Self {
        self.corrupt_read_at = Some(offset);
        self
    }

    /// Accept at most `limit` bytes per write call, reporting success
    /// with a short byte count the way a full volume does.
    pub fn accept_at_most(mut self, limit: usize) -> Self {
        self.accept_at_most = Some(limit);
        self
    }

    /// Report end of file from absolute offset `offset` onwards,
    /// regardless of the length recorded in the file's metadata.
    pub fn eof_at(mut self, offset: usize) -> Self {
        self.eof_at = Some(offset);
        self
    }

    pub fn file(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(|c| c.as_slice())
    }

    pub fn insert_file(&mut self, name: &str, data: &[u8]) {
        self.files.insert(name.to_string(), data.to_vec());
    }

    fn step(&mut self, op: Op) -> Result<(), FsError> {
        self.ops.push(op);
        if let Some((fail_op, nth)) = self.fail_on {
            if fail_op == op {
                if nth == 1 {
                    self.fail_on = None;
                    return Err(FsError::DiskError);
                }
                self.fail_on = Some((fail_op, nth - 1));
            }
        }
        Ok(())
    }
}

impl Filesystem for RamFs {
    type Volume = RamVolume;
    type File = RamFile;

    fn mount(&mut self, _device: DeviceId) -> Result<RamVolume, FsError> {
        self.step(Op::Mount)?;
        Ok(RamVolume)
    }

    fn open_root_dir(&mut self, _volume: &mut RamVolume, _path: &str) -> Result<(), FsError> {
        self.step(Op::OpenRootDir)?;
        if self.formatted {
            Ok(())
        } else {
            Err(FsError::NoFilesystem)
        }
    }

    fn make_filesystem(
        &mut self,
        _device: DeviceId,
        _scheme: PartitionScheme,
        alloc_unit: u32,
    ) -> Result<(), FsError> {
        self.step(Op::MakeFilesystem)?;
        if alloc_unit == 0 {
            return Err(FsError::InvalidParameter);
        }
        self.formatted = true;
        self.files.clear();
        Ok(())
    }

    fn open_file(
        &mut self,
        _volume: &mut RamVolume,
        path: &str,
        mode: Mode,
    ) -> Result<RamFile, FsError> {
        self.step(Op::OpenFile)?;
        if !self.formatted {
            return Err(FsError::NoFilesystem);
        }
        match mode {
            Mode::ReadOnly => {
                if !self.files.contains_key(path) {
                    return Err(FsError::NotFound);
                }
            }
            Mode::ReadWriteCreateOrTruncate => {
                self.files.insert(path.to_string(), Vec::new());
            }
        }
        Ok(RamFile {
            name: path.to_string(),
            mode,
            pos: 0,
        })
    }

    fn write(&mut self, file: &mut RamFile, data: &[u8]) -> Result<usize, FsError> {
        self.step(Op::Write)?;
        if file.mode != Mode::ReadWriteCreateOrTruncate {
            return Err(FsError::InvalidObject);
        }
        let contents = self.files.get_mut(&file.name).ok_or(FsError::InvalidObject)?;
        let n = self.accept_at_most.map_or(data.len(), |limit| limit.min(data.len()));
        contents.extend_from_slice(&data[..n]);
        file.pos += n;
        Ok(n)
    }

    fn read(&mut self, file: &mut RamFile, data: &mut [u8]) -> Result<usize, FsError> {
        self.step(Op::Read)?;
        if file.mode != Mode::ReadOnly {
            return Err(FsError::InvalidObject);
        }
        let contents = self.files.get(&file.name).ok_or(FsError::InvalidObject)?;
        let mut readable = contents.len();
        if let Some(offset) = self.eof_at {
            readable = readable.min(offset);
        }
        let n = data.len().min(readable.saturating_sub(file.pos));
        data[..n].copy_from_slice(&contents[file.pos..file.pos + n]);
        if let Some(offset) = self.corrupt_read_at {
            if (file.pos..file.pos + n).contains(&offset) {
                data[offset - file.pos] ^= 0xFF;
            }
        }
        file.pos += n;
        Ok(n)
    }

    fn file_length(&self, file: &RamFile) -> u32 {
        self.files.get(&file.name).map_or(0, |c| c.len() as u32)
    }

    fn close_file(&mut self, _file: RamFile) -> Result<(), FsError> {
        self.step(Op::CloseFile)
    }
}
