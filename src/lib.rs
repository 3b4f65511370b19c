
/// Core logic for reducing phase block spans into plottable interval lists
pub mod block_solver;
/// Command line interface functionality
pub mod cli;
/// Contains various shared data types
pub mod data_types;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// Contains the core merge-scan that reconciles a callset against a truth set
pub mod reconcile;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
