use std::fmt;

/// Custom error types for NMEA decoding and track processing
#[derive(Debug)]
pub enum NmeaError {
    /// I/O errors
    Io(std::io::Error),
    /// Field count mismatch or wrong leading tag
    MalformedSentence(String),
    /// Hemisphere letter outside {N, S, E, W}
    InvalidHemisphere(String),
    /// Date/time fields that do not parse
    InvalidTimestamp(String),
    /// Latitude/longitude/altitude not parseable as a number, or out of range
    InvalidNumericField(String),
    /// Invalid run configuration, raised before any decoding
    Configuration(String),
    /// Export format error
    Export(String),
}

impl fmt::Display for NmeaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NmeaError::Io(err) => write!(f, "I/O error: {}", err),
            NmeaError::MalformedSentence(msg) => write!(f, "Malformed sentence: {}", msg),
            NmeaError::InvalidHemisphere(msg) => write!(f, "Invalid hemisphere: {}", msg),
            NmeaError::InvalidTimestamp(msg) => write!(f, "Invalid timestamp: {}", msg),
            NmeaError::InvalidNumericField(msg) => write!(f, "Invalid numeric field: {}", msg),
            NmeaError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            NmeaError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for NmeaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NmeaError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NmeaError {
    fn from(err: std::io::Error) -> Self {
        NmeaError::Io(err)
    }
}

impl NmeaError {
    /// Short kind label used by the skipped-line report
    pub fn kind(&self) -> &'static str {
        match self {
            NmeaError::Io(_) => "io",
            NmeaError::MalformedSentence(_) => "malformed sentence",
            NmeaError::InvalidHemisphere(_) => "invalid hemisphere",
            NmeaError::InvalidTimestamp(_) => "invalid timestamp",
            NmeaError::InvalidNumericField(_) => "invalid numeric field",
            NmeaError::Configuration(_) => "configuration",
            NmeaError::Export(_) => "export",
        }
    }
}

pub type Result<T> = std::result::Result<T, NmeaError>;
