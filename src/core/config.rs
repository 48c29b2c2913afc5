use serde::{Deserialize, Serialize};

use super::decimal;
use super::error::EdifactError;

/// Minimum accepted value for [`OrdersConfig::max_segment_length`].
pub const MIN_SEGMENT_LENGTH: usize = 10;

/// UN/EDIFACT character repertoire (syntax identifier, ISO 9735).
///
/// UNOA and UNOB render the decimal mark as a comma, since `.` is
/// regionally ambiguous in those repertoires; UNOC keeps the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charset {
    /// UNOA — upper-case level A.
    Unoa,
    /// UNOB — level B.
    Unob,
    /// UNOC — Latin-1 level C.
    Unoc,
}

impl Charset {
    /// Syntax identifier as carried in UNB (e.g. "UNOA").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unoa => "UNOA",
            Self::Unob => "UNOB",
            Self::Unoc => "UNOC",
        }
    }

    /// Parse from a syntax identifier string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "UNOA" => Some(Self::Unoa),
            "UNOB" => Some(Self::Unob),
            "UNOC" => Some(Self::Unoc),
            _ => None,
        }
    }

    /// Syntax version number paired with the identifier in UNB.
    pub fn syntax_version(&self) -> &'static str {
        match self {
            Self::Unoa | Self::Unob => "2",
            Self::Unoc => "3",
        }
    }

    /// Whether numeric and escaped text renders `.` as `,`.
    pub fn decimal_comma(&self) -> bool {
        !matches!(self, Self::Unoc)
    }
}

/// Supported UNTDID 2379 date/period format codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    /// 102 — CCYYMMDD.
    Ccyymmdd,
    /// 203 — CCYYMMDDHHMM.
    CcyymmddHhmm,
    /// 610 — CCYYMM.
    Ccyymm,
    /// 602 — CCYY.
    Ccyy,
}

impl DateFormat {
    /// UNTDID 2379 code as carried in DTM.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ccyymmdd => "102",
            Self::CcyymmddHhmm => "203",
            Self::Ccyymm => "610",
            Self::Ccyy => "602",
        }
    }

    /// Parse from a UNTDID 2379 code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "102" => Some(Self::Ccyymmdd),
            "203" => Some(Self::CcyymmddHhmm),
            "610" => Some(Self::Ccyymm),
            "602" => Some(Self::Ccyy),
            _ => None,
        }
    }

    /// Exact digit count of a value in this format.
    pub fn digit_count(&self) -> usize {
        match self {
            Self::Ccyymmdd => 8,
            Self::CcyymmddHhmm => 12,
            Self::Ccyymm => 6,
            Self::Ccyy => 4,
        }
    }
}

/// Immutable generation parameters for one interchange producer.
///
/// Construct via [`OrdersConfigBuilder`]; `build()` enforces the
/// invariants (qualifier width, minimum segment length, decimal
/// template shape). Read-only and freely shareable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Character repertoire governing escaping and decimal marks.
    pub charset: Charset,
    /// Message type identifier (UNH), e.g. "ORDERS".
    pub message_type: String,
    /// Message version number (UNH), e.g. "D".
    pub version: String,
    /// Message release number (UNH), e.g. "96A".
    pub release: String,
    /// Controlling agency (UNH), e.g. "UN".
    pub controlling_agency: String,
    /// Date format applied to order and delivery dates.
    pub date_format: DateFormat,
    /// Precision template for money/quantity rounding, e.g. "0.01".
    pub decimal_template: String,
    /// Line ending joining rendered segments.
    pub line_ending: String,
    /// Maximum length of one assembled segment, ≥ [`MIN_SEGMENT_LENGTH`].
    pub max_segment_length: usize,
    /// Maximum length of one free-text field before truncation/chunking.
    pub max_field_length: usize,
    /// Accepted NAD party qualifiers; each exactly 2 characters.
    pub party_qualifiers: Vec<String>,
    /// Interchange sender identification (UNB).
    pub sender: String,
    /// Interchange recipient identification (UNB).
    pub receiver: String,
    /// Optional application reference (UNB field 7).
    pub application_reference: Option<String>,
    /// Request an acknowledgement (UNB field 9).
    pub acknowledgement_request: bool,
    /// Optional communications agreement id (UNB field 10).
    pub agreement_id: Option<String>,
    /// Mark the interchange as a test (UNB field 11).
    pub test_indicator: bool,
    /// Emit the UNA service string advice before UNB.
    pub include_una: bool,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            charset: Charset::Unoa,
            message_type: "ORDERS".into(),
            version: "D".into(),
            release: "96A".into(),
            controlling_agency: "UN".into(),
            date_format: DateFormat::Ccyymmdd,
            decimal_template: "0.01".into(),
            line_ending: "\n".into(),
            max_segment_length: 240,
            max_field_length: 70,
            party_qualifiers: vec![
                "BY".into(),
                "SU".into(),
                "DP".into(),
                "IV".into(),
                "CN".into(),
            ],
            sender: "SENDER".into(),
            receiver: "RECEIVER".into(),
            application_reference: None,
            acknowledgement_request: false,
            agreement_id: None,
            test_indicator: false,
            include_una: true,
        }
    }
}

impl OrdersConfig {
    /// Rounding scale implied by the decimal template.
    pub fn decimal_scale(&self) -> u32 {
        decimal::template_scale(&self.decimal_template)
    }

    /// Whether a qualifier is in the accepted party-qualifier set.
    pub fn accepts_qualifier(&self, qualifier: &str) -> bool {
        self.party_qualifiers.iter().any(|q| q == qualifier)
    }
}

/// Builder for [`OrdersConfig`].
///
/// # Example
///
/// ```
/// use edifakt::{Charset, OrdersConfigBuilder};
///
/// let config = OrdersConfigBuilder::new("ACME", "SUPPLIER-X")
///     .charset(Charset::Unoc)
///     .max_segment_length(200)
///     .build()
///     .unwrap();
/// assert_eq!(config.sender, "ACME");
/// ```
pub struct OrdersConfigBuilder {
    config: OrdersConfig,
}

impl OrdersConfigBuilder {
    /// Create a builder with the required sender/receiver identifiers.
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            config: OrdersConfig {
                sender: sender.into(),
                receiver: receiver.into(),
                ..Default::default()
            },
        }
    }

    /// Set the character repertoire.
    pub fn charset(mut self, charset: Charset) -> Self {
        self.config.charset = charset;
        self
    }

    /// Set the message type/version/release/controlling-agency identifiers.
    pub fn message_identity(
        mut self,
        message_type: impl Into<String>,
        version: impl Into<String>,
        release: impl Into<String>,
        agency: impl Into<String>,
    ) -> Self {
        self.config.message_type = message_type.into();
        self.config.version = version.into();
        self.config.release = release.into();
        self.config.controlling_agency = agency.into();
        self
    }

    /// Set the date format code.
    pub fn date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// Set the decimal precision template (e.g. "0.001").
    pub fn decimal_template(mut self, template: impl Into<String>) -> Self {
        self.config.decimal_template = template.into();
        self
    }

    /// Set the line ending between rendered segments.
    pub fn line_ending(mut self, ending: impl Into<String>) -> Self {
        self.config.line_ending = ending.into();
        self
    }

    /// Set the maximum segment length.
    pub fn max_segment_length(mut self, max: usize) -> Self {
        self.config.max_segment_length = max;
        self
    }

    /// Set the maximum free-text field length.
    pub fn max_field_length(mut self, max: usize) -> Self {
        self.config.max_field_length = max;
        self
    }

    /// Replace the accepted party-qualifier set.
    pub fn party_qualifiers<I, S>(mut self, qualifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.party_qualifiers = qualifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the application reference carried in UNB.
    pub fn application_reference(mut self, reference: impl Into<String>) -> Self {
        self.config.application_reference = Some(reference.into());
        self
    }

    /// Request an interchange acknowledgement.
    pub fn acknowledgement_request(mut self, request: bool) -> Self {
        self.config.acknowledgement_request = request;
        self
    }

    /// Set the communications agreement id carried in UNB.
    pub fn agreement_id(mut self, id: impl Into<String>) -> Self {
        self.config.agreement_id = Some(id.into());
        self
    }

    /// Mark generated interchanges as test data.
    pub fn test_indicator(mut self, test: bool) -> Self {
        self.config.test_indicator = test;
        self
    }

    /// Emit or suppress the UNA service string advice.
    pub fn include_una(mut self, include: bool) -> Self {
        self.config.include_una = include;
        self
    }

    /// Validate the invariants and produce the immutable configuration.
    pub fn build(self) -> Result<OrdersConfig, EdifactError> {
        let c = self.config;

        if c.sender.trim().is_empty() || c.receiver.trim().is_empty() {
            return Err(EdifactError::Config(
                "sender and receiver identifiers must not be empty".into(),
            ));
        }
        if c.max_segment_length < MIN_SEGMENT_LENGTH {
            return Err(EdifactError::Config(format!(
                "max segment length {} below minimum {MIN_SEGMENT_LENGTH}",
                c.max_segment_length
            )));
        }
        if c.max_field_length == 0 {
            return Err(EdifactError::Config(
                "max field length must be at least 1".into(),
            ));
        }
        if c.party_qualifiers.is_empty() {
            return Err(EdifactError::Config(
                "accepted party qualifier set must not be empty".into(),
            ));
        }
        for q in &c.party_qualifiers {
            if q.chars().count() != 2 {
                return Err(EdifactError::Config(format!(
                    "party qualifier '{q}' must be exactly 2 characters"
                )));
            }
        }
        decimal::parse(&c.decimal_template).map_err(|_| {
            EdifactError::Config(format!(
                "decimal template '{}' is not a valid decimal",
                c.decimal_template
            ))
        })?;

        Ok(c)
    }
}
