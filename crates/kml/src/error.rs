use std::{error, fmt, io, result};

use model::GeometryKind;
use zip::result::ZipError;

pub type ImportResult<T> = result::Result<T, ImportError>;
pub type ExportResult<T> = result::Result<T, ExportError>;

/// Why an import produced no point sequence.
#[derive(Debug)]
pub enum ImportError {
    /// The file name carries neither a `.kml` nor a `.kmz` extension.
    UnsupportedFile(String),
    Zip(ZipError),
    Io(io::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnsupportedFile(name) => {
                write!(f, "{name} is not a .kml or .kmz file")
            }
            ImportError::Zip(why) => write!(f, "could not open KMZ archive: {why}"),
            ImportError::Io(why) => write!(f, "could not read archive entry: {why}"),
        }
    }
}

impl error::Error for ImportError {}

impl From<ZipError> for ImportError {
    fn from(value: ZipError) -> Self {
        ImportError::Zip(value)
    }
}

impl From<io::Error> for ImportError {
    fn from(value: io::Error) -> Self {
        ImportError::Io(value)
    }
}

/// Why an export produced no file.
#[derive(Debug)]
pub enum ExportError {
    /// The selected geometry needs more valid points than the set has.
    /// The one condition whose message is shown to the end user as-is.
    TooFewPoints { kind: GeometryKind, count: usize },
    Zip(ZipError),
    Io(io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::TooFewPoints {
                kind: GeometryKind::Path,
                ..
            } => write!(f, "A path requires at least 2 points."),
            ExportError::TooFewPoints {
                kind: GeometryKind::Polygon,
                ..
            } => write!(f, "A polygon requires at least 3 points."),
            ExportError::Zip(why) => write!(f, "could not write KMZ archive: {why}"),
            ExportError::Io(why) => write!(f, "could not write archive entry: {why}"),
        }
    }
}

impl error::Error for ExportError {}

impl From<ZipError> for ExportError {
    fn from(value: ZipError) -> Self {
        ExportError::Zip(value)
    }
}

impl From<io::Error> for ExportError {
    fn from(value: io::Error) -> Self {
        ExportError::Io(value)
    }
}
