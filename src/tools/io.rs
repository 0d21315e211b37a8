//! To take charge of io : reading the sparse distance matrix, dumping cluster assignments.
//!
//! The input is a text file with one edge by line : `label1 label2 distance`, fields separated by
//! whitespaces, as dumped by `usearch -calc_distmx` for example.
//!
//! - lines with less than 3 fields are skipped. Fields after the third are ignored.
//! - a header is possible with first lines beginning with '#' or '%'
//! - the distance must be a finite non negative float, otherwise reading fails.
//!
//! The file is read line by line, reusing the same buffer, so memory does not depend on the number of edges.

use anyhow::{anyhow, Context};

use num_traits::Float;

use std::fmt::Debug;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use csv::{QuoteStyle, WriterBuilder};

use crate::assignment::ClusterAssignment;
use crate::clustparams::OutputLayout;

/// Streaming reader of edges.
pub struct EdgeReader<R> {
    reader: R,
    line: String,
    /// number of lines read
    nb_lines: usize,
    /// lines skipped for lack of fields
    nb_skipped: usize,
    nb_header_lines: usize,
    in_header: bool,
}

impl EdgeReader<BufReader<File>> {
    /// opens file at path
    pub fn from_path(filepath: &Path) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .open(filepath)
            .with_context(|| format!("could not open input file {}", filepath.display()))?;
        log::debug!("EdgeReader opened file {:?}", filepath.as_os_str());
        Ok(EdgeReader::new(BufReader::new(file)))
    }
} // end of impl EdgeReader<BufReader<File>>

impl<R: BufRead> EdgeReader<R> {
    pub fn new(reader: R) -> Self {
        EdgeReader {
            reader,
            line: String::new(),
            nb_lines: 0,
            nb_skipped: 0,
            nb_header_lines: 0,
            in_header: true,
        }
    }

    /// number of lines read so far
    pub fn get_nb_lines(&self) -> usize {
        self.nb_lines
    }

    /// number of lines skipped as they had less than 3 fields
    pub fn get_nb_skipped(&self) -> usize {
        self.nb_skipped
    }

    pub fn get_nb_header_lines(&self) -> usize {
        self.nb_header_lines
    }

    /// returns next edge as (label1, label2, distance) or None at end of stream.
    /// Labels borrow the reader buffer, they are valid until next call.
    pub fn next_edge<F>(&mut self) -> anyhow::Result<Option<(&str, &str, F)>>
    where
        F: Float + FromStr,
    {
        loop {
            self.line.clear();
            let nb_read = self
                .reader
                .read_line(&mut self.line)
                .with_context(|| format!("read error after line {}", self.nb_lines))?;
            if nb_read == 0 {
                return Ok(None);
            }
            self.nb_lines += 1;
            if self.in_header {
                if self.line.starts_with(|c| c == '#' || c == '%') {
                    self.nb_header_lines += 1;
                    continue;
                }
                self.in_header = false;
                log::debug!("edge file has {} header lines", self.nb_header_lines);
            }
            if self.line.split_whitespace().nth(2).is_none() {
                self.nb_skipped += 1;
                log::debug!("skipping line {} : less than 3 fields", self.nb_lines);
                continue;
            }
            break;
        }
        //
        let line_num = self.nb_lines;
        let mut fields = self.line.split_whitespace();
        let (label1, label2, field) = match (fields.next(), fields.next(), fields.next()) {
            (Some(l1), Some(l2), Some(d)) => (l1, l2, d),
            _ => return Err(anyhow!("line {} : expecting 3 fields", line_num)),
        };
        let dist = match field.parse::<F>() {
            Ok(dist) => dist,
            Err(_) => {
                log::error!("line {} : could not parse distance field {:?}", line_num, field);
                return Err(anyhow!(
                    "line {} : could not parse distance field {:?}",
                    line_num,
                    field
                ));
            }
        };
        if !dist.is_finite() || dist < F::zero() {
            return Err(anyhow!(
                "line {} : distance must be finite and non negative, got {:?}",
                line_num,
                field
            ));
        }
        Ok(Some((label1, label2, dist)))
    } // end of next_edge
} // end of impl EdgeReader

/// Dumps assignment in tab separated rows, sorted by cluster id then label.
///  - OutputLayout::PerLabel   : `cluster_id \t label`
///  - OutputLayout::PerCluster : `cluster_id \t member1, member2, ...`
///
/// Returns the number of rows written.
pub fn write_assignment<W: Write>(
    writer: W,
    assignment: &ClusterAssignment,
    layout: OutputLayout,
) -> anyhow::Result<usize> {
    //
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .has_headers(false)
        .from_writer(writer);
    let mut nb_rows = 0;
    match layout {
        OutputLayout::PerLabel => {
            for (id, label) in assignment.get_sorted_rows() {
                wtr.write_record([id.to_string().as_str(), label])?;
                nb_rows += 1;
            }
        }
        OutputLayout::PerCluster => {
            for (id, members) in assignment.get_clusters().iter().enumerate() {
                wtr.write_record([id.to_string(), members.join(", ")])?;
                nb_rows += 1;
            }
        }
    }
    wtr.flush()?;
    //
    Ok(nb_rows)
} // end of write_assignment

/// creates (or truncates) file at path and dumps assignment in it. See [write_assignment]
pub fn write_assignment_to_path(
    filepath: &Path,
    assignment: &ClusterAssignment,
    layout: OutputLayout,
) -> anyhow::Result<usize> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(filepath)
        .with_context(|| format!("could not create output file {}", filepath.display()))?;
    let nb_rows = write_assignment(BufWriter::new(file), assignment, layout)
        .with_context(|| format!("error writing output file {}", filepath.display()))?;
    log::info!("dumped {} rows in {}", nb_rows, filepath.display());
    Ok(nb_rows)
} // end of write_assignment_to_path

/// for logging, avoids requiring F : Display
pub(crate) fn fmt_float<F: Float + Debug>(f: F) -> String {
    match f.to_f64() {
        Some(v) => format!("{:.3e}", v),
        None => format!("{:?}", f),
    }
}

//========================================================================================

// end of mod tests
