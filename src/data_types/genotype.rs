
use strum_macros::EnumIter;

/// The genotype states we distinguish for a diploid small-variant call.
/// Declaration order matches the confusion matrix index space (see `matrix_index`).
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq)]
pub enum GenotypeCall {
    /// 0/1 or 1/0; also covers records with no usable genotype field.
    /// The reference output folds both into the same matrix row/column, so we keep them merged.
    UnphasedHet,
    /// 0/0 or 0|0; also the lenient fallback for any unrecognized token
    HomozygousReference,
    /// 0|1
    PhasedRefAlt,
    /// 1|0
    PhasedAltRef,
    /// 1/1 or 1|1
    HomozygousAlternate
}

/// Number of distinct genotype states, which is also the confusion matrix dimension
pub const NUM_GENOTYPE_CALLS: usize = 5;

impl GenotypeCall {
    /// Parses a bare allele-pair token (e.g. "0|1") into a genotype call.
    /// Unrecognized tokens deliberately fall back to `HomozygousReference` instead of erroring;
    /// this keeps us tolerant of genotype encodings we have not seen.
    pub fn from_gt_token(token: &str) -> Self {
        match token {
            "1|1" | "1/1" => GenotypeCall::HomozygousAlternate,
            "1|0" => GenotypeCall::PhasedAltRef,
            "0|1" => GenotypeCall::PhasedRefAlt,
            "1/0" | "0/1" => GenotypeCall::UnphasedHet,
            _ => GenotypeCall::HomozygousReference
        }
    }

    /// Maps the call into the 0..5 index space used by the confusion matrix and missed histogram
    pub fn matrix_index(&self) -> usize {
        match self {
            GenotypeCall::UnphasedHet => 0,
            GenotypeCall::HomozygousReference => 1,
            GenotypeCall::PhasedRefAlt => 2,
            GenotypeCall::PhasedAltRef => 3,
            GenotypeCall::HomozygousAlternate => 4
        }
    }

    /// Inverse of `matrix_index`; returns None for an out-of-range index
    pub fn from_matrix_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(GenotypeCall::UnphasedHet),
            1 => Some(GenotypeCall::HomozygousReference),
            2 => Some(GenotypeCall::PhasedRefAlt),
            3 => Some(GenotypeCall::PhasedAltRef),
            4 => Some(GenotypeCall::HomozygousAlternate),
            _ => None
        }
    }

    /// Returns true if this is a phased heterozygous call
    pub fn is_phased_het(&self) -> bool {
        match self {
            GenotypeCall::PhasedRefAlt |
            GenotypeCall::PhasedAltRef => true,

            GenotypeCall::UnphasedHet |
            GenotypeCall::HomozygousReference |
            GenotypeCall::HomozygousAlternate => false
        }
    }

    /// Short label used for confusion matrix headers in the report
    pub fn column_label(&self) -> &'static str {
        match self {
            GenotypeCall::UnphasedHet => "ungenotyped",
            GenotypeCall::HomozygousReference => "0|0",
            GenotypeCall::PhasedRefAlt => "0|1",
            GenotypeCall::PhasedAltRef => "1|0",
            GenotypeCall::HomozygousAlternate => "1|1"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_gt_token_parsing() {
        assert_eq!(GenotypeCall::from_gt_token("1|1"), GenotypeCall::HomozygousAlternate);
        assert_eq!(GenotypeCall::from_gt_token("1/1"), GenotypeCall::HomozygousAlternate);
        assert_eq!(GenotypeCall::from_gt_token("1|0"), GenotypeCall::PhasedAltRef);
        assert_eq!(GenotypeCall::from_gt_token("0|1"), GenotypeCall::PhasedRefAlt);
        assert_eq!(GenotypeCall::from_gt_token("0/1"), GenotypeCall::UnphasedHet);
        assert_eq!(GenotypeCall::from_gt_token("1/0"), GenotypeCall::UnphasedHet);
        assert_eq!(GenotypeCall::from_gt_token("0/0"), GenotypeCall::HomozygousReference);
    }

    #[test]
    fn test_lenient_fallback() {
        // unrecognized tokens are not errors, they fold into the reference row
        assert_eq!(GenotypeCall::from_gt_token("./."), GenotypeCall::HomozygousReference);
        assert_eq!(GenotypeCall::from_gt_token("1|2"), GenotypeCall::HomozygousReference);
        assert_eq!(GenotypeCall::from_gt_token(""), GenotypeCall::HomozygousReference);
        assert_eq!(GenotypeCall::from_gt_token("banana"), GenotypeCall::HomozygousReference);
    }

    #[test]
    fn test_matrix_index_round_trip() {
        for (expected_index, call) in GenotypeCall::iter().enumerate() {
            assert_eq!(call.matrix_index(), expected_index);
            assert_eq!(GenotypeCall::from_matrix_index(expected_index), Some(call));
        }
        assert_eq!(GenotypeCall::from_matrix_index(NUM_GENOTYPE_CALLS), None);
    }

    #[test]
    fn test_is_phased_het() {
        assert!(GenotypeCall::PhasedRefAlt.is_phased_het());
        assert!(GenotypeCall::PhasedAltRef.is_phased_het());
        assert!(!GenotypeCall::UnphasedHet.is_phased_het());
        assert!(!GenotypeCall::HomozygousReference.is_phased_het());
        assert!(!GenotypeCall::HomozygousAlternate.is_phased_het());
    }
}
