use thiserror::Error;

/// Maximum number of characters of offending payload embedded in an error.
pub(crate) const ERROR_PREVIEW_LEN: usize = 40;

/// Errors that can occur while validating, encoding, or batching an
/// ORDERS interchange.
///
/// Every variant is terminal for the call that raised it — the codec
/// performs no I/O and has no transient-failure concept. Callers branch
/// on the variant (or on [`EdifactError::code`]) and decide whether to
/// retry with corrected input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EdifactError {
    /// Required field missing or malformed in the raw order input.
    #[error("schema violation at {field}: {message}")]
    Schema { field: String, message: String },

    /// Date text does not match the configured date format.
    #[error("date '{value}' does not match format {code}")]
    DateFormat { value: String, code: &'static str },

    /// Quantity, price, or rate outside its permitted range.
    #[error("numeric value out of range at {field}: {message}")]
    NumericRange { field: String, message: String },

    /// Party qualifier not in the configured accepted set.
    #[error("unknown party qualifier '{qualifier}' at parties[{index}]")]
    UnknownQualifier { qualifier: String, index: usize },

    /// No party carries a required role qualifier.
    #[error("no party with required role qualifier '{role}'")]
    MissingRole { role: &'static str },

    /// Text does not match the decimal digit pattern.
    #[error("invalid decimal '{0}'")]
    InvalidDecimal(String),

    /// Divisor absolute value below the fixed tolerance.
    #[error("division by zero")]
    DivisionByZero,

    /// Value carries more fractional precision than the configured template.
    #[error("value '{value}' exceeds precision of template '{template}'")]
    PrecisionExceeded { value: String, template: String },

    /// Assembled segment longer than the configured maximum. Carries a
    /// truncated preview, never the full payload.
    #[error("segment of {length} chars exceeds maximum {max} (starts '{preview}')")]
    SegmentTooLong {
        length: usize,
        max: usize,
        preview: String,
    },

    /// A trailer count was requested but no message header was appended.
    #[error("no message header (UNH) segment in sequence")]
    MissingHeader,

    /// Post-assembly structural check failed.
    #[error("structural integrity check failed: {0}")]
    StructuralIntegrity(String),

    /// A batch member order failed; wraps the member error with its index.
    #[error("batch member {index}: {source}")]
    BatchMember {
        index: usize,
        #[source]
        source: Box<EdifactError>,
    },

    /// Invalid generation configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EdifactError {
    /// Stable machine-readable code for this error, independent of the
    /// human-readable message text.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Schema { .. } => "SCHEMA",
            Self::DateFormat { .. } => "DATE_FORMAT",
            Self::NumericRange { .. } => "NUMERIC_RANGE",
            Self::UnknownQualifier { .. } => "UNKNOWN_QUALIFIER",
            Self::MissingRole { .. } => "MISSING_ROLE",
            Self::InvalidDecimal(_) => "INVALID_DECIMAL",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::PrecisionExceeded { .. } => "PRECISION_EXCEEDED",
            Self::SegmentTooLong { .. } => "SEGMENT_TOO_LONG",
            Self::MissingHeader => "MISSING_HEADER",
            Self::StructuralIntegrity(_) => "STRUCTURAL_INTEGRITY",
            Self::BatchMember { .. } => "BATCH_MEMBER",
            Self::Config(_) => "CONFIG",
        }
    }
}

/// Truncate a payload for inclusion in an error message.
pub(crate) fn preview(text: &str) -> String {
    text.chars().take(ERROR_PREVIEW_LEN).collect()
}
