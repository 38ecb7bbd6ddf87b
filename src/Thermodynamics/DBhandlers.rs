/// species records and the lookup capability
pub mod lookup_api;

/// NIST Chemistry WebBook lookup source
pub mod NIST_parser;
mod NIST_parser_tests;

/// persistent formula -> record cache
pub mod species_cache;

/// built-in data for common species
pub mod fallback_data;
