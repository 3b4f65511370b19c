/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// Parser for phase block spans and the chromosome length table
pub mod phase_blocks;
/// Shared buffered reader creation with transparent gzip support
pub mod text_input;
/// Parser for the truth / phased variant tables
pub mod variant_table;
