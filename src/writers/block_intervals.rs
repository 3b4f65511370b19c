
use std::collections::BTreeMap;
use std::io::Write;

use crate::block_solver::ChromName;

/// Writes the plot-ready interval lists: for each chromosome, the name on one line and the
/// surviving intervals as space-separated "start end" pairs on the next.
/// # Arguments
/// * `out` - destination for the interval text
/// * `intervals` - merged intervals per chromosome, in numeric-aware name order
pub fn write_block_intervals(
    out: &mut impl Write, intervals: &BTreeMap<ChromName, Vec<(u64, u64)>>
) -> std::io::Result<()> {
    for (chrom, chrom_intervals) in intervals.iter() {
        writeln!(out, "{}", chrom.0)?;
        let pairs: Vec<String> = chrom_intervals.iter()
            .map(|(start, end)| format!("{start} {end}"))
            .collect();
        writeln!(out, "{}", pairs.join(" "))?;
    }
    Ok(())
}
