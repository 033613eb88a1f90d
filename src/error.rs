use std::{fmt, io, path::PathBuf};

/// Errors that can occur while marking or verifying a file.
#[derive(Debug)]
pub enum MarkError {
    /// The block size is too small to hold the widest marker the file needs.
    InvalidBlockSize { block_size: u64 },
    /// The target file could not be opened.
    Open { path: PathBuf, source: io::Error },
    /// Seeking to the end of the file to read its length failed.
    Length(io::Error),
    /// Seeking to or writing the marker of a block failed.
    Write { offset: u64, source: io::Error },
    /// Reading back the marker of a block failed.
    Read { offset: u64, source: io::Error },
    /// Mapping or flushing the file mapping failed.
    Map(io::Error),
}

impl fmt::Display for MarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkError::InvalidBlockSize { block_size } => {
                write!(f, "Invalid block size {block_size}: too small to hold a block marker")
            }
            MarkError::Open { path, .. } => {
                write!(f, "Unable to open {}", path.display())
            }
            MarkError::Length(_) => write!(f, "Unable to determine file length"),
            MarkError::Write { offset, .. } => {
                write!(f, "Write error at offset {offset:#x}")
            }
            MarkError::Read { offset, .. } => {
                write!(f, "Read error at offset {offset:#x}")
            }
            MarkError::Map(_) => write!(f, "Unable to map file"),
        }
    }
}

impl std::error::Error for MarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MarkError::InvalidBlockSize { .. } => None,
            MarkError::Open { source, .. }
            | MarkError::Write { source, .. }
            | MarkError::Read { source, .. } => Some(source),
            MarkError::Length(source) | MarkError::Map(source) => Some(source),
        }
    }
}
