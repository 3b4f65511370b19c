/*!
# CLI module
Command line interface functionality that is specific to phasecheck.
*/

/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
/// The accuracy CLI subcommand
pub mod accuracy;
/// The blocks CLI subcommand
pub mod blocks;
