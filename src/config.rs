use crate::error::RleError;
use std::str::FromStr;

/// What the pipeline does with input bytes that have bit 7 set.
///
/// The record format keeps the flag in bit 7, so such a byte either becomes a
/// literal that looks like a marker or a marker that drops the bit. The
/// encoder itself always emits them unchanged; the policy only decides whether
/// that is reported or refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighBitPolicy {
    Allow,
    #[default]
    Warn,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Quiet,
}

#[derive(Debug, Clone, Default)]
pub struct RleConfig {
    pub high_bit: HighBitPolicy,
    pub report: ReportFormat,
}

impl RleConfig {
    pub fn with_high_bit(mut self, high_bit: HighBitPolicy) -> Self {
        self.high_bit = high_bit;
        self
    }

    pub fn with_report(mut self, report: ReportFormat) -> Self {
        self.report = report;
        self
    }
}

impl FromStr for HighBitPolicy {
    type Err = RleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allow" => Ok(HighBitPolicy::Allow),
            "warn" => Ok(HighBitPolicy::Warn),
            "reject" => Ok(HighBitPolicy::Reject),
            _ => Err(RleError::ConfigError(format!("Invalid high-bit policy: {}", s))),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = RleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "quiet" => Ok(ReportFormat::Quiet),
            _ => Err(RleError::ConfigError(format!("Invalid report format: {}", s))),
        }
    }
}
