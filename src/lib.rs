use std::{
    fs::{File, OpenOptions},
    io::{self, Seek, SeekFrom, Write},
    os::unix::prelude::FileExt,
    path::Path,
};

use log::{debug, info, warn};
use memmap::{MmapMut, MmapOptions};

pub mod config;
pub mod error;
pub mod marker;

use config::{check_block_size, check_block_size_for};
pub use config::{MarkConfig, Method, DEFAULT_BLOCK_SIZE};
pub use error::MarkError;
use marker::{block_offsets, format_marker, marker_len, parse_marker};

pub type Result<T> = std::result::Result<T, MarkError>;

/// Outcome of a successful marking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkSummary {
    pub file_len: u64,
    pub block_size: u64,
    pub markers: u64,
}

/// A block whose leading bytes do not hold the expected marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub offset: u64,
    /// The offset encoded at this position, if the bytes decode as a marker.
    pub found: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub file_len: u64,
    pub blocks: u64,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Places marker bytes at absolute offsets of the target file.
trait MarkerSink {
    fn put(&mut self, offset: u64, marker: &[u8]) -> io::Result<()>;
}

struct SeekSink<'a> {
    underlying: &'a mut File,
}

impl MarkerSink for SeekSink<'_> {
    fn put(&mut self, offset: u64, marker: &[u8]) -> io::Result<()> {
        self.underlying.seek(SeekFrom::Start(offset))?;
        self.underlying.write_all(marker)
    }
}

struct PwriteSink<'a> {
    underlying: &'a File,
}

impl MarkerSink for PwriteSink<'_> {
    fn put(&mut self, offset: u64, marker: &[u8]) -> io::Result<()> {
        self.underlying.write_all_at(marker, offset)
    }
}

struct MmapSink {
    buf: MmapMut,
}

impl MmapSink {
    /// Maps `len` bytes rather than the metadata length, which is zero for
    /// block devices.
    fn open(underlying: &File, len: u64) -> Result<Self> {
        let len = usize::try_from(len).map_err(|_| {
            MarkError::Map(io::Error::new(
                io::ErrorKind::InvalidInput,
                "file too large to map",
            ))
        })?;
        let buf = unsafe { MmapOptions::new().len(len).map_mut(underlying) }
            .map_err(MarkError::Map)?;
        Ok(Self { buf })
    }

    fn flush(&self) -> Result<()> {
        self.buf.flush().map_err(MarkError::Map)
    }
}

impl MarkerSink for MmapSink {
    fn put(&mut self, offset: u64, marker: &[u8]) -> io::Result<()> {
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset exceeds mapping"))?;
        self.buf
            .get_mut(start..start + marker.len())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "marker outside mapping"))?
            .copy_from_slice(marker);
        Ok(())
    }
}

/// Marks `path` in place with the default write method.
pub fn mark_file<P: AsRef<Path>>(path: P, block_size: u64) -> Result<MarkSummary> {
    mark(&MarkConfig::new(path.as_ref()).with_block_size(block_size))
}

/// Overwrites the start of every block of the configured file with its offset
/// marker.
///
/// The file must already exist; it is never created, truncated or resized. A
/// marker for a short final block is clipped at the end of the file. On error
/// the file is left marked up to the failing block.
pub fn mark(config: &MarkConfig) -> Result<MarkSummary> {
    config.validate()?;

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(&config.path)
        .map_err(|source| MarkError::Open {
            path: config.path.clone(),
            source,
        })?;
    let file_len = file.seek(SeekFrom::End(0)).map_err(MarkError::Length)?;
    let block_size = config.block_size;
    check_block_size_for(file_len, block_size)?;

    let markers = match config.method {
        Method::Seek => write_markers(
            &mut SeekSink {
                underlying: &mut file,
            },
            file_len,
            block_size,
        )?,
        Method::Pwrite => write_markers(&mut PwriteSink { underlying: &file }, file_len, block_size)?,
        // Zero-length files cannot be mapped.
        Method::Mmap if file_len == 0 => 0,
        Method::Mmap => {
            let mut sink = MmapSink::open(&file, file_len)?;
            let markers = write_markers(&mut sink, file_len, block_size)?;
            sink.flush()?;
            markers
        }
    };

    info!(
        "marked {} blocks of {} bytes in {:?} ({} bytes)",
        markers,
        block_size,
        config.path,
        file_len
    );
    Ok(MarkSummary {
        file_len,
        block_size,
        markers,
    })
}

fn write_markers<S: MarkerSink>(sink: &mut S, file_len: u64, block_size: u64) -> Result<u64> {
    let mut markers = 0;
    for offset in block_offsets(file_len, block_size) {
        let marker = format_marker(offset);
        let len = clipped_len(offset, file_len);
        if len < marker.len() {
            warn!(
                "final block at {:#x} is {} bytes, marker clipped",
                offset,
                file_len - offset
            );
        }
        debug!("writing {} at {:#x}", marker, offset);
        sink.put(offset, &marker.as_bytes()[..len])
            .map_err(|source| MarkError::Write { offset, source })?;
        markers += 1;
    }
    Ok(markers)
}

fn clipped_len(offset: u64, file_len: u64) -> usize {
    let room = file_len.saturating_sub(offset);
    (marker_len(offset) as u64).min(room) as usize
}

/// Reads back every block marker of `path` and reports the blocks that do not
/// carry their own offset.
pub fn verify<P: AsRef<Path>>(path: P, block_size: u64) -> Result<VerifyReport> {
    check_block_size(block_size)?;

    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| MarkError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let file_len = file.seek(SeekFrom::End(0)).map_err(MarkError::Length)?;
    check_block_size_for(file_len, block_size)?;

    let mut blocks = 0;
    let mut mismatches = Vec::new();
    for offset in block_offsets(file_len, block_size) {
        let expected = format_marker(offset);
        let expected = &expected.as_bytes()[..clipped_len(offset, file_len)];
        let mut buf = vec![0; expected.len()];
        file.read_exact_at(&mut buf, offset)
            .map_err(|source| MarkError::Read { offset, source })?;
        if buf != expected {
            let found = parse_marker(&buf);
            debug!("block {:#x} holds {:?}", offset, found);
            mismatches.push(Mismatch { offset, found });
        }
        blocks += 1;
    }

    Ok(VerifyReport {
        file_len,
        blocks,
        mismatches,
    })
}
