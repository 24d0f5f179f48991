//! extract the genomic locus around a labelled CDS from GenBank files

/// Qualifiers whose first value is compared against the target label.
pub const LABEL_QUALIFIERS: [&str; 5] = ["gene", "protein_id", "proteinId", "locus_tag", "name"];

/// Feature kind scanned for labels and used for border snapping.
pub const CODING_KIND: &str = "CDS";

/// Extra bases kept beyond a neighbouring CDS when a border is snapped to it.
pub const BORDER_PADDING: i64 = 10;

pub const DEFAULT_EXTENSION: i64 = 20_000;
pub const DEFAULT_OUTDIR: &str = "./output";

pub const RC_SUFFIX: &str = "_rc";
pub const OUTPUT_EXTENSION: &str = "gbk";
