pub mod constants;
pub mod coordinates;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use coordinates::{format_coordinate, parse_coordinate};
pub use progress::ProgressReporter;
