use std::fmt;
use std::io;

#[derive(Debug)]
pub enum CodecError {
    Io(io::Error),
    /// The stream ended inside `section`.
    Truncated { section: &'static str },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Io(e) => write!(f, "i/o error: {}", e),
            CodecError::Truncated { section } => write!(f, "truncated grid data in {}", section),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Io(e) => Some(e),
            CodecError::Truncated { .. } => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        CodecError::Io(e)
    }
}

/// Non-fatal problems found while decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeWarning {
    BadMagic([u8; 5]),
    BadVersion([u8; 3]),
    /// Stored bits were outside `[MIN_BITS, MAX_BITS]`; the raw values are kept here.
    DimensionsClamped { width_bits: i32, height_bits: i32 },
    CellCountMismatch { declared: i32, expected: usize },
    /// Cells whose type ordinal is unknown; they were decoded as empty.
    UnknownBlockTypes(usize),
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::BadMagic(m) => {
                write!(f, "bad magic {:?}, expected \"BWOCB\"", String::from_utf8_lossy(m))
            }
            DecodeWarning::BadVersion(v) => {
                let v = String::from_utf8_lossy(v);
                write!(f, "unsupported version {:?}, expected \"1.0\"", v)
            }
            DecodeWarning::DimensionsClamped { width_bits, height_bits } => write!(
                f,
                "dimension bits ({}, {}) out of range; clamped",
                width_bits, height_bits
            ),
            DecodeWarning::CellCountMismatch { declared, expected } => write!(
                f,
                "header declares {} cells but dimensions need {}",
                declared, expected
            ),
            DecodeWarning::UnknownBlockTypes(n) => {
                write!(f, "{} cells had unknown block types and were emptied", n)
            }
        }
    }
}
