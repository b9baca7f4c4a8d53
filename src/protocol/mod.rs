//! Line-oriented host link: commands in, gesture and calibration lines out.

mod line_reader;
mod parser;
mod render;

pub use line_reader::{LineReadEvent, LineReader};
pub use parser::{parse_host_command, ParseError};
pub use render::{render_host_event, EVENT_LINE_MAX};

/// Longest accepted command line, excluding the terminator.
pub const COMMAND_LINE_MAX: usize = 160;
