/*!
# Writers module
Contains the logic for writing the output files for the accuracy and blocks commands.
*/
/// Generates the textual per-chromosome and genome-wide accuracy report
pub mod accuracy_report;
/// Generates the plot-ready phase block interval lists
pub mod block_intervals;
/// Generates the per-chromosome summary table
pub mod summary;
