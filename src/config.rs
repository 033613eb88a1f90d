use std::path::PathBuf;

use clap::ValueEnum;

use crate::{
    error::MarkError,
    marker::{marker_len, MIN_MARKER_LEN},
    Result,
};

pub const DEFAULT_BLOCK_SIZE: u64 = 512;

/// How markers are written into the target file.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Seek to each block and write through the file cursor.
    #[default]
    Seek,
    /// Positional writes that leave the file cursor alone.
    Pwrite,
    /// Copy markers into a shared mapping of the file.
    Mmap,
}

/// Settings for a single marking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkConfig {
    pub path: PathBuf,
    pub block_size: u64,
    pub method: Method,
}

impl MarkConfig {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            block_size: DEFAULT_BLOCK_SIZE,
            method: Method::default(),
        }
    }

    pub fn with_block_size(mut self, block_size: u64) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_block_size(self.block_size)
    }
}

/// Block sizes below the marker length would let adjacent markers overwrite
/// each other.
pub fn check_block_size(block_size: u64) -> Result<()> {
    if block_size < MIN_MARKER_LEN as u64 {
        return Err(MarkError::InvalidBlockSize { block_size });
    }
    Ok(())
}

/// Like [`check_block_size`], but also rejects block sizes too small for the
/// widest marker a file of `file_len` bytes needs. Markers only widen past
/// offset `0xffffffff`, so the last block decides.
pub fn check_block_size_for(file_len: u64, block_size: u64) -> Result<()> {
    check_block_size(block_size)?;
    if file_len == 0 {
        return Ok(());
    }
    let last = (file_len - 1) / block_size * block_size;
    if marker_len(last) as u64 > block_size {
        return Err(MarkError::InvalidBlockSize { block_size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MarkConfig::new("fixture.bin");
        assert_eq!(config.block_size, 512);
        assert_eq!(config.method, Method::Seek);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_block_size_must_fit_a_marker() {
        for block_size in [0, 1, 9] {
            let config = MarkConfig::new("fixture.bin").with_block_size(block_size);
            assert!(matches!(
                config.validate(),
                Err(MarkError::InvalidBlockSize { block_size: b }) if b == block_size
            ));
        }
        assert!(check_block_size(10).is_ok());
    }

    #[test]
    fn test_block_size_must_fit_widest_marker() {
        assert!(check_block_size_for(0, 10).is_ok());
        assert!(check_block_size_for(0x1_0000_0000, 10).is_ok());
        assert!(matches!(
            check_block_size_for(0x1_0000_0014, 10),
            Err(MarkError::InvalidBlockSize { block_size: 10 })
        ));
        assert!(check_block_size_for(0x1_0000_0014, 11).is_ok());
        assert!(check_block_size_for(0x10_0000_0000, 11).is_ok());
        assert!(check_block_size_for(0x10_0000_000b, 11).is_err());
        assert!(check_block_size_for(u64::MAX, 18).is_ok());
        assert!(check_block_size_for(u64::MAX, 17).is_err());
        assert!(check_block_size_for(4096, 9).is_err());
    }
}
