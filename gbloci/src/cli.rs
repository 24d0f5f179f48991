//! extract the genomic locus around a labelled CDS from GenBank files
//!
//! Scans the CDS features of a GenBank file for a label (gene, protein id,
//! locus tag, ...) and writes the surrounding locus, flanks included, as a
//! new GenBank record per hit.

use clap::Parser;
use log::Level;

use std::{fmt, path::PathBuf};

use crate::{
    consts::{DEFAULT_EXTENSION, DEFAULT_OUTDIR},
    error::{LocusError, LocusResult},
};

#[derive(Parser, Debug, Clone)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Args {
    /// Path to GenBank file (.gb, .gbk, .gbff, optionally .gz)
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Target label (gene, protein_id, locus_tag, ...)
    #[arg(short = 'l', long)]
    pub label: String,

    /// Bases to extend at either side of the target feature
    #[arg(
        short = 'e',
        long,
        default_value_t = DEFAULT_EXTENSION,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub extension: i64,

    /// Bases to extend upstream of the target feature [default: --extension]
    #[arg(
        short = 'u',
        long,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub upstream: Option<i64>,

    /// Bases to extend downstream of the target feature [default: --extension]
    #[arg(
        short = 'd',
        long,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub downstream: Option<i64>,

    /// Output directory for extracted loci
    #[arg(short = 'o', long, default_value = DEFAULT_OUTDIR)]
    pub outdir: PathBuf,

    /// Logging verbosity level
    #[arg(short = 'L', long, default_value = "info")]
    pub level: Level,
}

impl Args {
    /// Creates arguments with default extension, output directory and level.
    pub fn new<P: Into<PathBuf>, S: Into<String>>(input: P, label: S) -> Self {
        Self {
            input: input.into(),
            label: label.into(),
            extension: DEFAULT_EXTENSION,
            upstream: None,
            downstream: None,
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            level: Level::Info,
        }
    }

    /// Checks the input path and extension sizes and resolves the
    /// upstream/downstream overrides.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use gbloci::Args;
    ///
    /// let mut args = Args::new("contig.gbk", "dnaA");
    /// args.upstream = Some(500);
    /// let config = args.validate()?;
    /// assert_eq!(config.upstream, 500);
    /// assert_eq!(config.downstream, 20000);
    /// ```
    pub fn validate(&self) -> LocusResult<ExtractionConfig> {
        if !self.input.is_file() {
            return Err(LocusError::InvalidInput(self.input.clone()));
        }

        let extension = non_negative("extension", self.extension)?;
        let upstream = match self.upstream {
            Some(value) => non_negative("upstream", value)?,
            None => extension,
        };
        let downstream = match self.downstream {
            Some(value) => non_negative("downstream", value)?,
            None => extension,
        };

        Ok(ExtractionConfig {
            label: self.label.clone(),
            upstream,
            downstream,
        })
    }
}

fn non_negative(flag: &'static str, value: i64) -> LocusResult<i64> {
    if value < 0 {
        Err(LocusError::NegativeExtension { flag, value })
    } else {
        Ok(value)
    }
}

/// Formats the Args struct as a comma-separated string of key=value pairs.
impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input={}, label={}, extension={}, upstream={}, downstream={}, outdir={}, level={}",
            self.input.display(),
            self.label,
            self.extension,
            display_override(self.upstream),
            display_override(self.downstream),
            self.outdir.display(),
            self.level,
        )
    }
}

fn display_override(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Validated extraction parameters, in base pairs relative to the
/// transcriptional direction of the matched feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub label: String,
    pub upstream: i64,
    pub downstream: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn overrides_fall_back_to_extension() {
        let input = NamedTempFile::new().expect("failed to create temporary file");
        let mut args = Args::new(input.path(), "dnaA");
        args.extension = 1000;
        args.downstream = Some(250);

        let config = args.validate().expect("valid arguments");
        assert_eq!(
            config,
            ExtractionConfig {
                label: "dnaA".to_string(),
                upstream: 1000,
                downstream: 250,
            }
        );
    }

    #[test]
    fn missing_input_is_rejected() {
        let args = Args::new("does/not/exist.gbk", "dnaA");
        assert!(matches!(
            args.validate(),
            Err(LocusError::InvalidInput(path)) if path == PathBuf::from("does/not/exist.gbk")
        ));
    }

    #[test]
    fn negative_upstream_is_rejected() {
        let input = NamedTempFile::new().expect("failed to create temporary file");
        let mut args = Args::new(input.path(), "dnaA");
        args.upstream = Some(-5);

        assert!(matches!(
            args.validate(),
            Err(LocusError::NegativeExtension {
                flag: "upstream",
                value: -5
            })
        ));
    }

    #[test]
    fn clap_rejects_negative_extension() {
        let parsed = Args::try_parse_from(["gbloci", "-i", "x.gbk", "-l", "dnaA", "-e", "-1"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn clap_defaults() {
        let args = Args::try_parse_from(["gbloci", "-i", "x.gbk", "-l", "dnaA"])
            .expect("required arguments given");
        assert_eq!(args.extension, 20000);
        assert_eq!(args.upstream, None);
        assert_eq!(args.outdir, PathBuf::from("./output"));
        assert_eq!(args.level, Level::Info);
    }
}
