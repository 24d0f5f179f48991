use crate::{
    cli::Args,
    consts::{OUTPUT_EXTENSION, RC_SUFFIX},
    error::{LocusError, LocusResult},
    locus::{Locus, Strand, find_loci, orient},
};

use flate2::read::MultiGzDecoder;
use gb_io::{reader::SeqReader, seq::Seq};
use log::{error, info, warn};

use std::{
    fs::{File, create_dir_all},
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

/// How a run ended when no fatal error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Paths of the written loci, in extraction order.
    Extracted(Vec<PathBuf>),
    NothingFound,
    /// The input could not be parsed; nothing was written.
    Unparseable,
}

impl RunOutcome {
    pub fn extractions(&self) -> usize {
        match self {
            RunOutcome::Extracted(paths) => paths.len(),
            RunOutcome::NothingFound | RunOutcome::Unparseable => 0,
        }
    }
}

/// Main processing function: validates arguments, scans every record of the
/// input for the target label and writes one GenBank file per hit.
///
/// Configuration and output errors are returned; a parse failure is reported
/// and ends the run with [`RunOutcome::Unparseable`].
pub fn gbloci(args: &Args) -> LocusResult<RunOutcome> {
    let config = args.validate()?;

    create_dir_all(&args.outdir).map_err(|source| LocusError::Io {
        path: args.outdir.clone(),
        source,
    })?;

    info!(
        "Attempting to extract locus around feature with label '{}'",
        config.label
    );

    let records = match load_records(&args.input) {
        Ok(records) => records,
        Err(e) => {
            error!("{}", e);
            return Ok(RunOutcome::Unparseable);
        }
    };

    let mut extraction = Extraction::new(&args.outdir, input_stem(&args.input), &config.label);
    for record in &records {
        for locus in find_loci(record, &config) {
            extraction.write(record, &locus)?;
        }
    }

    let outcome = extraction.finish();
    match outcome.extractions() {
        0 => warn!(
            "Finished, but nothing found with target label '{}'",
            config.label
        ),
        n => info!("Finished, {} extraction(s) done", n),
    }

    Ok(outcome)
}

/// Output state of one run: where loci go and what has been written so far.
/// The running number of the next locus is shared by all records.
struct Extraction<'a> {
    outdir: &'a Path,
    stem: String,
    label: &'a str,
    written: Vec<PathBuf>,
}

impl<'a> Extraction<'a> {
    fn new(outdir: &'a Path, stem: String, label: &'a str) -> Self {
        Self {
            outdir,
            stem,
            label,
            written: Vec::new(),
        }
    }

    fn write(&mut self, record: &Seq, locus: &Locus) -> LocusResult<()> {
        let path = output_path(
            self.outdir,
            &self.stem,
            self.label,
            self.written.len() + 1,
            locus.strand,
        );

        info!(
            "Writing {} (feature {}..{} on strand {}, window {}, {} bp)",
            path.display(),
            locus.feature.start,
            locus.feature.end,
            locus.strand,
            locus.window,
            locus.window.width()
        );

        write_record(&path, &orient(record, locus))?;
        self.written.push(path);

        Ok(())
    }

    fn finish(self) -> RunOutcome {
        if self.written.is_empty() {
            RunOutcome::NothingFound
        } else {
            RunOutcome::Extracted(self.written)
        }
    }
}

/// Parses every record of a GenBank file, gzip-compressed or not.
pub fn load_records(path: &Path) -> LocusResult<Vec<Seq>> {
    info!("Reading records from file {}", path.display());

    let parse_error = |reason: String| LocusError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| parse_error(e.to_string()))?;
    let reader: Box<dyn Read> = if is_compressed_path(path) {
        Box::new(MultiGzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let records = SeqReader::new(reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| parse_error(e.to_string()))?;

    info!("Read {} records from file {}", records.len(), path.display());

    Ok(records)
}

/// Writes a single record as GenBank; the file is closed before returning.
pub fn write_record(path: &Path, record: &Seq) -> LocusResult<()> {
    let io_error = |source: io::Error| LocusError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    gb_io::writer::write(&mut writer, record).map_err(io_error)?;
    writer.flush().map_err(io_error)
}

/// Builds `{outdir}/{stem}_{label}_{n}[_rc].gbk`.
pub fn output_path(outdir: &Path, stem: &str, label: &str, n: usize, strand: Strand) -> PathBuf {
    let rc = if strand.is_reverse() { RC_SUFFIX } else { "" };
    outdir.join(format!("{stem}_{label}_{n}{rc}.{OUTPUT_EXTENSION}"))
}

/// File name without its format extension, and without `.gz` before that.
pub fn input_stem(path: &Path) -> String {
    let path = if is_compressed_path(path) {
        path.file_stem().map(Path::new).unwrap_or(path)
    } else {
        path
    };

    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_compressed_path(path: &Path) -> bool {
    matches!(path.extension().and_then(|ext| ext.to_str()), Some("gz"))
}
