use std::fmt;

use error_stack::Context;

/// Precondition violations of the Douglas-Peucker simplifier.
#[derive(Debug, Clone, PartialEq)]
pub enum SimplifyError {
    RingTooShort { len: usize },
    InvalidTolerance(f64),
}

impl fmt::Display for SimplifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimplifyError::RingTooShort { len } => {
                write!(f, "ring has {} points, at least 2 are required", len)
            }
            SimplifyError::InvalidTolerance(epsilon) => {
                write!(f, "tolerance must be a non-negative number of meters, got {}", epsilon)
            }
        }
    }
}

impl Context for SimplifyError {}

/// Malformed `.poly` input. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum PolyParseError {
    Empty,
    Unreadable { line: usize },
    MissingEnd { line: usize },
    MalformedCoordinate { line: usize, content: String },
    RingTooShort { line: usize, name: String },
}

impl fmt::Display for PolyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolyParseError::Empty => write!(f, "poly file is empty"),
            PolyParseError::Unreadable { line } => write!(f, "could not read line {}", line),
            PolyParseError::MissingEnd { line } => {
                write!(f, "unexpected end of file at line {}, expected END", line)
            }
            PolyParseError::MalformedCoordinate { line, content } => {
                write!(f, "malformed coordinate at line {}: {:?}", line, content)
            }
            PolyParseError::RingTooShort { line, name } => {
                write!(f, "ring {:?} ending at line {} has fewer than 2 points", name, line)
            }
        }
    }
}

impl Context for PolyParseError {}

#[derive(Debug)]
pub struct PolyIoError;

impl fmt::Display for PolyIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failed to read or write polygon data")
    }
}

impl Context for PolyIoError {}

/// A ring of a poly set could not be simplified.
#[derive(Debug)]
pub struct SimplificationError {
    pub ring: String,
}

impl fmt::Display for SimplificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to simplify ring {:?}", self.ring)
    }
}

impl Context for SimplificationError {}
