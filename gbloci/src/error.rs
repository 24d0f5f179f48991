//! extract the genomic locus around a labelled CDS from GenBank files
//!
//! Error kinds surfaced by configuration, loading and writing.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type LocusResult<T> = Result<T, LocusError>;

/// Errors raised while configuring or running an extraction.
///
/// `InvalidInput` and `NegativeExtension` are fatal configuration errors,
/// `Io` covers the output side, and `Parse` is reported by the run controller
/// without aborting the process.
#[derive(Debug, Error)]
pub enum LocusError {
    #[error("ERROR: {} is not a file", .0.display())]
    InvalidInput(PathBuf),

    #[error("ERROR: --{flag} must be non-negative, got {value}")]
    NegativeExtension { flag: &'static str, value: i64 },

    #[error("ERROR: cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ERROR: not able to parse file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}
