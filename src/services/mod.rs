pub mod check;
pub mod converter;
pub mod report;

pub use check::{check_file, check_set, CheckReport};
pub use converter::{ConversionSettings, Converter};
pub use report::{ConversionOutcome, ConversionReport};
