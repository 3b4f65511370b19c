
use anyhow::Context;
use log::debug;
use std::io::BufRead;
use std::path::Path;

use crate::data_types::genotype::GenotypeCall;
use crate::data_types::variants::SmallVariant;
use crate::parsing::text_input::open_text_reader;

/// Minimum number of tab-delimited fields for a usable record (chrom, pos, id, ref, alt)
const MIN_FIELDS: usize = 5;
/// Index of the sample field that carries the genotype as its first colon-delimited token
const GENOTYPE_FIELD: usize = 9;

/// Errors from parsing a variant table.
/// Malformed records are fatal; silently dropping them would corrupt the accuracy metrics.
#[derive(thiserror::Error, Debug)]
pub enum VariantTableError {
    #[error("line {line_number}: expected at least {MIN_FIELDS} tab-delimited fields, found {found}")]
    TooFewFields { line_number: usize, found: usize },
    #[error("line {line_number}: position {text:?} is not an integer")]
    InvalidPosition { line_number: usize, text: String },
    #[error(transparent)]
    Io(#[from] std::io::Error)
}

/// Parses an ordered sequence of text lines into variant records, in input order.
/// Blank lines and lines starting with '#' are skipped.
/// # Arguments
/// * `reader` - the line source, typically a (possibly gzip) file reader
/// # Errors
/// * if any remaining line has fewer than `MIN_FIELDS` fields or a non-integer position
pub fn load_variant_table(reader: impl BufRead) -> Result<Vec<SmallVariant>, VariantTableError> {
    let mut variants = vec![];
    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MIN_FIELDS {
            return Err(VariantTableError::TooFewFields {
                line_number: line_index + 1,
                found: fields.len()
            });
        }

        let position: u64 = fields[1].parse()
            .map_err(|_| VariantTableError::InvalidPosition {
                line_number: line_index + 1,
                text: fields[1].to_string()
            })?;

        // the genotype only decodes when the sample field exists AND has a colon delimiter;
        // everything else is treated as "no genotype information" (reference behavior)
        let genotype = match fields.get(GENOTYPE_FIELD) {
            Some(sample_field) => match sample_field.split_once(':') {
                Some((gt_token, _rest)) => GenotypeCall::from_gt_token(gt_token),
                None => GenotypeCall::UnphasedHet
            },
            None => GenotypeCall::UnphasedHet
        };

        variants.push(SmallVariant::new(
            fields[0].to_string(),
            position,
            fields[3].to_string(),
            fields[4].to_string(),
            genotype
        ));
    }
    Ok(variants)
}

/// Loads a variant table from a plain or gzip-compressed file path
/// # Arguments
/// * `filename` - the file path to open and parse
/// # Errors
/// * if the file does not open or any record is malformed
pub fn load_variant_file(filename: &Path) -> anyhow::Result<Vec<SmallVariant>> {
    let reader = open_text_reader(filename)?;
    let variants = load_variant_table(reader)
        .with_context(|| format!("Error while parsing {filename:?}:"))?;
    debug!("Loaded {} variants from {filename:?}", variants.len());
    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let table = "\
##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSAMPLE

chr1\t100\t.\tA\tG\t.\tPASS\t.\tGT:DP\t1|0:30
chr1\t250\t.\tC\tT\t.\tPASS\t.\tGT:DP\t0/1:22
";
        let variants = load_variant_table(table.as_bytes()).unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].chrom(), "chr1");
        assert_eq!(variants[0].position(), 100);
        assert_eq!(variants[0].ref_allele(), "A");
        assert_eq!(variants[0].alt_allele(), "G");
        assert_eq!(variants[0].genotype(), GenotypeCall::PhasedAltRef);
        assert_eq!(variants[1].genotype(), GenotypeCall::UnphasedHet);
    }

    #[test]
    fn test_missing_genotype_field() {
        // only five fields, no sample information at all
        let table = "chr2\t500\t.\tG\tC";
        let variants = load_variant_table(table.as_bytes()).unwrap();
        assert_eq!(variants[0].genotype(), GenotypeCall::UnphasedHet);
    }

    #[test]
    fn test_colonless_sample_field() {
        // a sample field without ':' does not decode, matching the reference implementation
        let table = "chr2\t500\t.\tG\tC\t.\tPASS\t.\tGT\t1|1";
        let variants = load_variant_table(table.as_bytes()).unwrap();
        assert_eq!(variants[0].genotype(), GenotypeCall::UnphasedHet);
    }

    #[test]
    fn test_genotype_with_trailing_fields() {
        let table = "chr2\t500\t.\tG\tC\t.\tPASS\t.\tGT:AD:DP\t1|1:10,12:22";
        let variants = load_variant_table(table.as_bytes()).unwrap();
        assert_eq!(variants[0].genotype(), GenotypeCall::HomozygousAlternate);
    }

    #[test]
    fn test_too_few_fields() {
        let table = "chr1\t100\t.\tA";
        let error = load_variant_table(table.as_bytes()).unwrap_err();
        assert!(matches!(error, VariantTableError::TooFewFields { line_number: 1, found: 4 }));
    }

    #[test]
    fn test_invalid_position() {
        let table = "chr1\t100\t.\tA\tG\nchr1\tabc\t.\tA\tG";
        let error = load_variant_table(table.as_bytes()).unwrap_err();
        match error {
            VariantTableError::InvalidPosition { line_number, text } => {
                assert_eq!(line_number, 2);
                assert_eq!(text, "abc");
            },
            other => panic!("unexpected error: {other:?}")
        }
    }
}
