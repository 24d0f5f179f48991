//! extract the genomic locus around a labelled CDS from GenBank files
//!
//! Label matching, strand-aware window extension, border snapping to
//! neighbouring CDS features and orientation of the extracted locus.

use gb_io::seq::{Feature, Location, Qualifier, Seq, Topology};
use log::{debug, warn};

use std::{fmt, ops::Range};

use crate::{
    cli::ExtractionConfig,
    consts::{BORDER_PADDING, CODING_KIND, LABEL_QUALIFIERS, RC_SUFFIX},
};

/// Half-open `[start, end)` bounds of a CDS feature.
pub type Span = Range<i64>;

/// Transcriptional direction of a matched feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Forward only if every component of the location reads forward;
    /// `complement(..)` flips and mixed compound locations count as reverse.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use gb_io::seq::Location;
    /// use gbloci::Strand;
    ///
    /// let loc = Location::Complement(Box::new(Location::simple_range(0, 30)));
    /// assert_eq!(Strand::from_location(&loc), Strand::Reverse);
    /// ```
    pub fn from_location(location: &Location) -> Self {
        if reads_forward(location, false) {
            Strand::Forward
        } else {
            Strand::Reverse
        }
    }

    pub fn is_reverse(self) -> bool {
        self == Strand::Reverse
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

fn reads_forward(location: &Location, flipped: bool) -> bool {
    match location {
        Location::Complement(inner) => reads_forward(inner, !flipped),
        Location::Join(parts)
        | Location::Order(parts)
        | Location::Bond(parts)
        | Location::OneOf(parts) => parts.iter().all(|part| reads_forward(part, flipped)),
        _ => !flipped,
    }
}

/// Sub-range of a record to extract, `0 <= start <= end <= record length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionWindow {
    pub start: i64,
    pub end: i64,
}

impl ExtractionWindow {
    /// Extends a feature by the configured flanks. Upstream and downstream are
    /// taken relative to the feature's strand, so they swap sides for reverse
    /// features.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use gbloci::{ExtractionWindow, Strand};
    ///
    /// let fw = ExtractionWindow::extend(&(1000..1500), Strand::Forward, 200, 300, 5000);
    /// assert_eq!((fw.start, fw.end), (800, 1800));
    ///
    /// let rv = ExtractionWindow::extend(&(1000..1500), Strand::Reverse, 200, 300, 5000);
    /// assert_eq!((rv.start, rv.end), (700, 1700));
    /// ```
    pub fn extend(
        feature: &Span,
        strand: Strand,
        upstream: i64,
        downstream: i64,
        record_len: i64,
    ) -> Self {
        let (left, right) = match strand {
            Strand::Forward => (upstream, downstream),
            Strand::Reverse => (downstream, upstream),
        };

        Self {
            start: feature.start.saturating_sub(left).max(0),
            end: feature.end.saturating_add(right).min(record_len),
        }
    }

    /// Moves each border out of any CDS it would cut, then clamps the result
    /// back into `[0, record_len]`.
    pub fn snap(self, spans: &[Span], record_len: i64) -> Self {
        let start = check_borders_left(spans, self.start);
        let end = check_borders_right(spans, self.end);

        if start != self.start {
            debug!("Left border {} snapped to {}", self.start, start);
        }
        if end != self.end {
            debug!("Right border {} snapped to {}", self.end, end);
        }

        let snapped = Self {
            start: start.clamp(0, record_len),
            end: end.clamp(0, record_len),
        };

        if snapped.start != start || snapped.end != end {
            debug!(
                "Snapped window {}..{} clamped to {}..{}",
                start, end, snapped.start, snapped.end
            );
        }

        snapped
    }

    /// Number of bases covered by the window.
    pub fn width(&self) -> i64 {
        self.end - self.start
    }
}

impl fmt::Display for ExtractionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Pulls a left border that falls inside a CDS to 10bp before that CDS.
///
/// Expects `spans` sorted by ascending start: the scan stops at the first
/// span starting past `pos`.
pub fn check_borders_left(spans: &[Span], pos: i64) -> i64 {
    for span in spans {
        if span.contains(&pos) {
            return span.start - BORDER_PADDING;
        } else if span.start > pos {
            return pos;
        }
    }

    pos
}

/// Pushes a right border that falls inside a CDS to 10bp after that CDS.
///
/// When several spans cover `pos` the one reaching furthest right wins, so
/// the order of `spans` does not matter.
pub fn check_borders_right(spans: &[Span], pos: i64) -> i64 {
    spans
        .iter()
        .filter(|span| span.contains(&pos))
        .map(|span| span.end + BORDER_PADDING)
        .max()
        .unwrap_or(pos)
}

/// Returns true if any label qualifier has a first value equal to `target`.
///
/// Only the first entry of each qualifier is consulted and a valueless entry
/// never matches.
pub fn matches(qualifiers: &[Qualifier], target: &str) -> bool {
    LABEL_QUALIFIERS
        .iter()
        .any(|name| first_value(qualifiers, name) == Some(target))
}

fn first_value<'a>(qualifiers: &'a [Qualifier], name: &str) -> Option<&'a str> {
    qualifiers
        .iter()
        .find(|(key, _)| &**key == name)
        .and_then(|(_, value)| value.as_deref())
}

pub fn is_coding(feature: &Feature) -> bool {
    &*feature.kind == CODING_KIND
}

/// Smallest span covering every component of a location, whatever order
/// the components are listed in.
pub fn location_span(location: &Location) -> Option<Span> {
    match location {
        Location::Complement(inner) => location_span(inner),
        Location::Join(parts)
        | Location::Order(parts)
        | Location::Bond(parts)
        | Location::OneOf(parts) => parts
            .iter()
            .filter_map(location_span)
            .reduce(|a, b| a.start.min(b.start)..a.end.max(b.end)),
        other => other
            .find_bounds()
            .ok()
            .map(|(start, end)| start.min(end)..start.max(end)),
    }
}

/// Collects the bounds of every CDS in a record, sorted by ascending start.
pub fn coding_spans(record: &Seq) -> Vec<Span> {
    let mut spans: Vec<Span> = record
        .features
        .iter()
        .filter(|feature| is_coding(feature))
        .filter_map(|feature| location_span(&feature.location))
        .collect();

    spans.sort_by_key(|span| span.start);
    spans
}

/// A matched CDS together with the window to extract around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locus {
    pub feature: Span,
    pub strand: Strand,
    pub window: ExtractionWindow,
}

/// Finds every CDS of `record` carrying the configured label, in file order,
/// and computes its snapped extraction window.
pub fn find_loci(record: &Seq, config: &ExtractionConfig) -> Vec<Locus> {
    let spans = coding_spans(record);
    let record_len = record.len();

    record
        .features
        .iter()
        .filter(|feature| is_coding(feature) && matches(&feature.qualifiers, &config.label))
        .filter_map(|feature| {
            let Some(span) = location_span(&feature.location) else {
                warn!(
                    "WARN: skipping CDS '{}' with unresolvable location {:?}",
                    config.label, feature.location
                );
                return None;
            };

            let strand = Strand::from_location(&feature.location);
            let window = ExtractionWindow::extend(
                &span,
                strand,
                config.upstream,
                config.downstream,
                record_len,
            )
            .snap(&spans, record_len);

            Some(Locus {
                feature: span,
                strand,
                window,
            })
        })
        .collect()
}

/// Slices the locus out of `record`; reverse hits are reverse-complemented
/// so the matched CDS reads 5'->3' and get an `_rc` suffixed identifier.
pub fn orient(record: &Seq, locus: &Locus) -> Seq {
    let extracted = record.extract_range(locus.window.start, locus.window.end);
    let mut oriented = match locus.strand {
        Strand::Forward => extracted,
        Strand::Reverse => extracted.revcomp(),
    };

    copy_header(record, &mut oriented);
    // a locus is a fragment, even of a circular replicon
    oriented.topology = Topology::Linear;

    if locus.strand.is_reverse() {
        mark_reverse_complement(&mut oriented);
    }

    oriented
}

/// `extract_range` and `revcomp` start from an empty record; carry the
/// source record's identifiers and annotations over to the locus.
fn copy_header(record: &Seq, locus: &mut Seq) {
    locus.name = record.name.clone();
    locus.date = record.date.clone();
    locus.molecule_type = record.molecule_type.clone();
    locus.division = record.division.clone();
    locus.definition = record.definition.clone();
    locus.accession = record.accession.clone();
    locus.version = record.version.clone();
    locus.source = record.source.clone();
    locus.dblink = record.dblink.clone();
    locus.keywords = record.keywords.clone();
    locus.references = record.references.clone();
    locus.comments = record.comments.clone();
}

fn mark_reverse_complement(seq: &mut Seq) {
    if let Some(version) = seq.version.as_mut() {
        version.push_str(RC_SUFFIX);
    } else if let Some(name) = seq.name.as_mut() {
        name.push_str(RC_SUFFIX);
    }
}
