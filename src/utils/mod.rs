pub mod calendar;
pub mod constants;
pub mod filename;
pub mod progress;

pub use calendar::NoLeapDateTime;
pub use constants::*;
pub use filename::{output_file_name, source_file_name};
pub use progress::ProgressReporter;
