//! Utility types shared by the compilation stages: the input wrapper [Code],
//! the [Position] of a byte offset and the [Log] debugging levels.

mod code;
mod logger;
mod position;
use once_cell::unsync::OnceCell;

/// The line and column of a byte offset. Columns count bytes from 1.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A wrapper for the input bytes with a lazily built line break index.
pub struct Code<'c> {
    pub value: &'c [u8],
    line_breaks: OnceCell<Vec<usize>>,
}

/// An enum structure to assign multiple level debugging to the scanner and
/// pattern utilities.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}

/// Parse a command line switch the way the driver expects it:
/// `yes/true/t/y/1` and `no/false/f/n/0`, case insensitively.
pub fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" | "t" | "y" | "1" => Some(true),
        "no" | "false" | "f" | "n" | "0" => Some(false),
        _ => None,
    }
}
