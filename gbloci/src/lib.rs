//! extract the genomic locus around a labelled CDS from GenBank files
//!
//! Scans the CDS features of a GenBank file for a label (gene, protein_id,
//! proteinId, locus_tag or name) and writes the locus around every hit,
//! flanks included, to its own GenBank file. Borders that would cut a
//! neighbouring CDS are moved to keep it whole, and hits on the reverse strand
//! are reverse-complemented so the target always reads 5'->3'.
//!
//! # Usage
//!
//! ```bash
//! Usage: gbloci [OPTIONS] --input <INPUT> --label <LABEL>
//!
//! Options:
//!   -i, --input <INPUT>            Path to GenBank file (.gb, .gbk, .gbff, optionally .gz)
//!   -l, --label <LABEL>            Target label (gene, protein_id, locus_tag, ...)
//!   -e, --extension <EXTENSION>    Bases to extend at either side of the target feature [default: 20000]
//!   -u, --upstream <UPSTREAM>      Bases to extend upstream of the target feature [default: --extension]
//!   -d, --downstream <DOWNSTREAM>  Bases to extend downstream of the target feature [default: --extension]
//!   -o, --outdir <OUTDIR>          Output directory for extracted loci [default: ./output]
//!   -L, --level <LEVEL>            Logging verbosity level [default: info]
//!   -h, --help                     Print help
//!   -V, --version                  Print version
//! ```

pub mod cli;
pub mod consts;
pub mod core;
pub mod error;
pub mod locus;

pub use cli::{Args, ExtractionConfig};
pub use crate::core::{RunOutcome, gbloci};
pub use error::{LocusError, LocusResult};
pub use locus::{ExtractionWindow, Locus, Span, Strand};
