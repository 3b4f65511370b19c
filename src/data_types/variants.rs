
use std::cmp::Ordering;

use crate::data_types::genotype::GenotypeCall;

/// A single small-variant record from a truth or called table.
/// Alleles are kept as the raw strings from the file; comparisons are case-insensitive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SmallVariant {
    /// Chromosome label, exactly as written in the file
    chrom: String,
    /// 1-based coordinate from the file
    position: u64,
    /// Reference allele
    ref_allele: String,
    /// Alternate allele
    alt_allele: String,
    /// Parsed genotype state
    genotype: GenotypeCall
}

impl SmallVariant {
    /// Constructor
    pub fn new(chrom: String, position: u64, ref_allele: String, alt_allele: String, genotype: GenotypeCall) -> Self {
        Self {
            chrom, position, ref_allele, alt_allele, genotype
        }
    }

    /// Orders two variants by (chromosome, position) for the merge-scan.
    /// Chromosomes compare as plain strings ("chr10" sorts before "chr2"); this matches the
    /// reference output ordering and must not be made numeric-aware.
    pub fn cmp_locus(&self, other: &Self) -> Ordering {
        self.chrom.cmp(&other.chrom)
            .then(self.position.cmp(&other.position))
    }

    /// Returns true if both alleles agree with `other`, ignoring ASCII case
    pub fn same_alleles(&self, other: &Self) -> bool {
        self.ref_allele.eq_ignore_ascii_case(&other.ref_allele) &&
            self.alt_allele.eq_ignore_ascii_case(&other.alt_allele)
    }

    // getters
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    pub fn alt_allele(&self) -> &str {
        &self.alt_allele
    }

    pub fn genotype(&self) -> GenotypeCall {
        self.genotype
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(chrom: &str, position: u64) -> SmallVariant {
        SmallVariant::new(chrom.to_string(), position, "A".to_string(), "C".to_string(), GenotypeCall::UnphasedHet)
    }

    #[test]
    fn test_locus_ordering() {
        assert_eq!(variant("chr1", 100).cmp_locus(&variant("chr1", 100)), Ordering::Equal);
        assert_eq!(variant("chr1", 100).cmp_locus(&variant("chr1", 200)), Ordering::Less);
        assert_eq!(variant("chr2", 100).cmp_locus(&variant("chr1", 200)), Ordering::Greater);
    }

    #[test]
    fn test_string_chromosome_ordering() {
        // deliberately lexicographic, "chr10" comes before "chr2"
        assert_eq!(variant("chr10", 500).cmp_locus(&variant("chr2", 1)), Ordering::Less);
    }

    #[test]
    fn test_locus_ignores_alleles() {
        let v1 = SmallVariant::new("chr1".to_string(), 100, "A".to_string(), "C".to_string(), GenotypeCall::UnphasedHet);
        let v2 = SmallVariant::new("chr1".to_string(), 100, "G".to_string(), "T".to_string(), GenotypeCall::HomozygousAlternate);
        assert_eq!(v1.cmp_locus(&v2), Ordering::Equal);
        assert!(!v1.same_alleles(&v2));
    }

    #[test]
    fn test_same_alleles_case_insensitive() {
        let v1 = SmallVariant::new("chr1".to_string(), 100, "a".to_string(), "c".to_string(), GenotypeCall::UnphasedHet);
        let v2 = SmallVariant::new("chr1".to_string(), 100, "A".to_string(), "C".to_string(), GenotypeCall::UnphasedHet);
        assert!(v1.same_alleles(&v2));
    }
}
