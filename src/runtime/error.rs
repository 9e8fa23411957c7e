use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
    process::{ExitCode, Termination},
};

use crate::lang::location::CellLocation;

pub type Result<T> = std::result::Result<T, ColorForthError>;

/// The closed set of failure conditions the core can raise.
#[derive(Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The code heap's configured capacity was exhausted.
    HeapExhausted,

    /// An interpret or compile tagged cell named a word that is in neither dictionary.
    UnknownWord(String),

    /// The data stack underflowed.
    StackUnderflow,

    /// The data stack exceeded its configured capacity.
    StackOverflow,

    /// The return stack underflowed (an `Exit`, `NextAux`, or `i` found nothing to pop).
    ReturnStackUnderflow,

    /// The return stack exceeded its configured capacity.
    ReturnStackOverflow,

    /// `pack` was given a name outside the alphabet, or an empty string.
    InvalidName(String),

    /// `pack` was given a name too long to fit in 28 bits.
    NameTooLong(String),

    /// The block file's size was not a multiple of 1024 bytes (256 cells).
    MalformedBlockFile,

    /// A block index or heap index was out of range.
    OutOfRange(String),

    /// `/` or `mod` was given a zero divisor.
    DivideByZero,

    /// Wraps an underlying I/O failure, e.g. the block file could not be opened.
    Io(String),
}

/// Any error that can occur while loading or executing a colorForth block.
///
/// Carries the [`CellLocation`] the failure was detected at, when one is known, so a front end
/// (the CLI, or an embedding editor) can point at the offending cell.
#[derive(Clone)]
pub struct ColorForthError {
    location: Option<CellLocation>,
    kind: ErrorKind,
}

impl Error for ColorForthError {}

/// When returned from `main`, convert the error to a process exit code.
impl Termination for ColorForthError {
    fn report(self) -> ExitCode {
        eprintln!("Error: {}", self);
        ExitCode::FAILURE
    }
}

impl Display for ColorForthError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Debug for ColorForthError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ErrorKind::HeapExhausted => write!(f, "code heap exhausted"),
            ErrorKind::UnknownWord(name) => write!(f, "word '{}' not found", name),
            ErrorKind::StackUnderflow => write!(f, "data stack underflow"),
            ErrorKind::StackOverflow => write!(f, "data stack overflow"),
            ErrorKind::ReturnStackUnderflow => write!(f, "return stack underflow"),
            ErrorKind::ReturnStackOverflow => write!(f, "return stack overflow"),
            ErrorKind::InvalidName(name) => write!(
                f,
                "invalid word name '{}': empty, or contains characters outside the alphabet",
                name
            ),
            ErrorKind::NameTooLong(name) => {
                write!(f, "word name '{}' is too long to pack into a cell", name)
            }
            ErrorKind::MalformedBlockFile => {
                write!(f, "block file size is not a multiple of 1024 bytes")
            }
            ErrorKind::OutOfRange(message) => write!(f, "{}", message),
            ErrorKind::DivideByZero => write!(f, "division by zero"),
            ErrorKind::Io(message) => write!(f, "I/O error: {}", message),
        }
    }
}

impl ColorForthError {
    /// Construct an error with no known location.
    pub fn new(kind: ErrorKind) -> ColorForthError {
        ColorForthError {
            location: None,
            kind,
        }
    }

    /// Construct an error at a known cell location.
    pub fn at(location: CellLocation, kind: ErrorKind) -> ColorForthError {
        ColorForthError {
            location: Some(location),
            kind,
        }
    }

    /// Attach a location to an existing error, if it does not already have one.
    pub fn with_location(mut self, location: CellLocation) -> ColorForthError {
        if self.location.is_none() {
            self.location = Some(location);
        }
        self
    }

    /// The kind of failure that occurred.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The location the failure was detected at, if known.
    pub fn location(&self) -> Option<CellLocation> {
        self.location
    }

    pub fn heap_exhausted() -> ColorForthError {
        ColorForthError::new(ErrorKind::HeapExhausted)
    }

    pub fn unknown_word(name: impl Into<String>) -> ColorForthError {
        ColorForthError::new(ErrorKind::UnknownWord(name.into()))
    }

    pub fn stack_underflow() -> ColorForthError {
        ColorForthError::new(ErrorKind::StackUnderflow)
    }

    pub fn stack_overflow() -> ColorForthError {
        ColorForthError::new(ErrorKind::StackOverflow)
    }

    pub fn return_stack_underflow() -> ColorForthError {
        ColorForthError::new(ErrorKind::ReturnStackUnderflow)
    }

    pub fn return_stack_overflow() -> ColorForthError {
        ColorForthError::new(ErrorKind::ReturnStackOverflow)
    }

    pub fn invalid_name(name: impl Into<String>) -> ColorForthError {
        ColorForthError::new(ErrorKind::InvalidName(name.into()))
    }

    pub fn name_too_long(name: impl Into<String>) -> ColorForthError {
        ColorForthError::new(ErrorKind::NameTooLong(name.into()))
    }

    pub fn divide_by_zero() -> ColorForthError {
        ColorForthError::new(ErrorKind::DivideByZero)
    }
}

impl From<std::io::Error> for ColorForthError {
    fn from(error: std::io::Error) -> ColorForthError {
        ColorForthError::new(ErrorKind::Io(error.to_string()))
    }
}
