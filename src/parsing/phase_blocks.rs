
use anyhow::{anyhow, Context};
use rustc_hash::FxHashMap;
use std::io::BufRead;
use std::path::Path;

use crate::parsing::text_input::open_text_reader;

/// The coordinate span of one phase block
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockSpan {
    /// Chromosome label from the block's variant lines
    pub chrom: String,
    /// Smallest variant position in the block
    pub start: u64,
    /// Largest variant position in the block
    pub end: u64
}

/// Errors from parsing a phase block file
#[derive(thiserror::Error, Debug)]
pub enum PhaseBlockError {
    #[error("line {line_number}: block header is missing the variant count field")]
    MissingVariantCount { line_number: usize },
    #[error("line {line_number}: {text:?} is not an integer")]
    InvalidInteger { line_number: usize, text: String },
    #[error("line {line_number}: variant line has fewer than 5 tab-delimited fields")]
    TruncatedVariantLine { line_number: usize },
    #[error("line {line_number}: block ends before all variant lines were read")]
    TruncatedBlock { line_number: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error)
}

/// Parses HapCUT2-style phase block output into one coordinate span per block.
/// Only headers containing "SPAN" start a block; the header's space-delimited field 6 gives the
/// number of variant lines that follow, each tab-delimited with chromosome at field 3 and
/// position at field 4.
/// # Arguments
/// * `reader` - the line source
/// # Errors
/// * if a header or variant line is malformed or a block is truncated
pub fn load_block_spans(reader: impl BufRead) -> Result<Vec<BlockSpan>, PhaseBlockError> {
    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
    let mut spans = vec![];
    let mut line_index = 0;
    while line_index < lines.len() {
        let header = &lines[line_index];
        line_index += 1;
        if !header.contains("SPAN") {
            continue;
        }
        // a header as the very last line ends parsing
        if line_index == lines.len() {
            break;
        }

        let header_fields: Vec<&str> = header.split(' ').collect();
        if header_fields.len() == 1 {
            continue;
        }
        let num_variants: usize = header_fields.get(6)
            .ok_or(PhaseBlockError::MissingVariantCount { line_number: line_index })?
            .parse()
            .map_err(|_| PhaseBlockError::InvalidInteger {
                line_number: line_index,
                text: header_fields[6].to_string()
            })?;

        let mut chrom = String::new();
        let mut min_pos: Option<u64> = None;
        let mut max_pos: Option<u64> = None;
        for _ in 0..num_variants {
            let variant_line = lines.get(line_index)
                .ok_or(PhaseBlockError::TruncatedBlock { line_number: line_index })?;
            line_index += 1;

            let fields: Vec<&str> = variant_line.split('\t').collect();
            if fields.len() < 5 {
                return Err(PhaseBlockError::TruncatedVariantLine { line_number: line_index });
            }
            chrom = fields[3].to_string();
            let position: u64 = fields[4].parse()
                .map_err(|_| PhaseBlockError::InvalidInteger {
                    line_number: line_index,
                    text: fields[4].to_string()
                })?;
            min_pos = Some(min_pos.map_or(position, |p| p.min(position)));
            max_pos = Some(max_pos.map_or(position, |p| p.max(position)));
        }

        if let (Some(start), Some(end)) = (min_pos, max_pos) {
            spans.push(BlockSpan { chrom, start, end });
        }
    }
    Ok(spans)
}

/// Loads phase block spans from a plain or gzip-compressed file path
pub fn load_block_span_file(filename: &Path) -> anyhow::Result<Vec<BlockSpan>> {
    let reader = open_text_reader(filename)?;
    let spans = load_block_spans(reader)
        .with_context(|| format!("Error while parsing {filename:?}:"))?;
    Ok(spans)
}

/// Loads a chromosome-length table into a lookup map.
/// Each row is tab-delimited: field 0 is the chromosome number/letter (stored with a "chr"
/// prefix), field 2 is the length, possibly with "," thousands separators.
/// # Arguments
/// * `filename` - the file path to open and parse
/// # Errors
/// * if the file does not open or a row is missing fields / has a non-integer length
pub fn load_chromosome_lengths(filename: &Path) -> anyhow::Result<FxHashMap<String, u64>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false) // no headers in the file, disable so we do not skip first row
        .flexible(true)
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let mut lengths: FxHashMap<String, u64> = Default::default();
    for result in csv_reader.records() {
        let row = result.with_context(|| format!("Error while reading {filename:?}"))?;
        let name = row.get(0).ok_or(anyhow!("Missing chromosome name on row: {row:?}"))?;
        let length_text = row.get(2).ok_or(anyhow!("Missing length on row: {row:?}"))?;
        let length: u64 = length_text.replace(',', "").parse()
            .with_context(|| format!("Invalid chromosome length {length_text:?}"))?;
        lengths.insert(format!("chr{name}"), length);
    }
    Ok(lengths)
}
