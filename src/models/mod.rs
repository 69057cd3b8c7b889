// Core data models for studiogrid
// These structs represent the schedule table as it comes out of a spreadsheet export

pub mod table;

pub use table::*;
