//! # SEP005 Validation Module
//!
//! Compliance validation for SEP005 timeseries. The checks run in a fixed
//! order and abort on the first violation; a call either passes completely or
//! surfaces exactly one descriptive [`ComplianceError`].
//!
//! ## Validation Checklist
//!
//! 1. **Container Check**: the top-level value is an ordered sequence of records
//! 2. **Record Check**: each channel is a string-keyed record
//! 3. **Keyword Rules**: prohibited keywords, casing collisions, compulsory keywords
//! 4. **Semantic Checks**: time/data length consistency, ISO 8601 timestamps,
//!    and the mandated sample-array container for `data`
//!
//! The step order is part of the contract: a record that violates several
//! rules at once always reports the same error, and a casing collision such
//! as `Unit_Str` is reported as a collision rather than as a missing
//! compulsory keyword.
//!
//! ## Usage
//!
//! ```rust
//! use sep005::channel::{ChannelBuilder, Value};
//! use sep005::validator::validate_timeseries;
//!
//! let channel = ChannelBuilder::new("strain_gauge_1", "um/m")
//!     .data(vec![1.2, 1.4, 1.3])
//!     .time(vec![0.0, 0.5, 1.0])
//!     .build();
//!
//! let timeseries = Value::List(vec![channel.into()]);
//! assert!(validate_timeseries(&timeseries).is_ok());
//! ```

use arrow::array::Array;
use log::{debug, trace};

use crate::channel::{Channel, Value};

pub use fields::{
    check_compulsory_fields, check_prohibited_fields, COMPULSORY_FIELDS, PROHIBITED_FIELDS,
};
pub use timestamps::check_timestamps;

pub(crate) use fields::{DATA, FS, NAME, TIME, UNIT_STR};

mod fields;
mod timestamps;

#[cfg(test)]
mod tests;

/// The SEP document this crate validates against.
pub const SEP005_GUIDELINE: &str =
    "https://github.com/sdypy/sdypy/blob/main/docs/seps/sep-0005.rst";

/// Coarse classification of a compliance failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value arrived in the wrong type or container.
    Type,
    /// A keyword rule or cross-field consistency rule was violated.
    Value,
}

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ComplianceError {
    /// The top-level value is not an ordered sequence of channels.
    #[error("Invalid datatype {found}, a timeseries should be a list of channel records")]
    InvalidTimeseriesType {
        /// Type tag of the value actually supplied.
        found: &'static str,
    },

    /// A channel is not a string-keyed record.
    #[error("Invalid datatype {found}, a channel should be a record")]
    InvalidChannelType {
        /// Type tag of the value actually supplied.
        found: &'static str,
    },

    /// A keyword differs from a compulsory keyword only by casing.
    #[error("'{key}' is an invalid keyword, please use '{canonical}' instead")]
    InvalidKeyword {
        /// The offending keyword as it appeared in the record.
        key: String,
        /// Canonical spelling of the compulsory keyword it collides with.
        canonical: &'static str,
    },

    /// A keyword is on the prohibited list.
    #[error("'{key}' is a Prohibited keyword, do not use it")]
    ProhibitedKeyword {
        /// The offending keyword as it appeared in the record.
        key: String,
    },

    /// A compulsory keyword is absent from the record.
    #[error("Missing compulsory keyword '{keyword}'")]
    MissingKeyword {
        /// The first compulsory keyword found to be absent.
        keyword: &'static str,
    },

    /// Neither a time vector nor a sampling frequency is present.
    #[error("Missing information to replicate time, provide either 'time' or 'fs'")]
    MissingTimeInformation,

    /// The time vector and the data vector disagree in length.
    #[error("Length of the time vector and data vector do not match: {time_len} vs. {data_len}")]
    VectorLengthMismatch {
        /// Number of elements in the time vector.
        time_len: usize,
        /// Number of elements in the data vector.
        data_len: usize,
    },

    /// A timestamp keyword does not hold an ISO 8601 date-time string.
    #[error("Timestamp '{key}': {value} is not according to ISO 8601")]
    MalformedTimestamp {
        /// Keyword the malformed timestamp was found under.
        key: String,
        /// The rejected value, rendered for display.
        value: String,
    },

    /// A vector field is not held in the mandated sample-array container.
    #[error("Invalid datatype {found} for '{field}', should be a numeric sample array")]
    InvalidVector {
        /// Keyword of the offending field.
        field: &'static str,
        /// Description of the container actually supplied.
        found: String,
    },
}

impl ComplianceError {
    /// Classify this error as a type error or a value error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComplianceError::InvalidTimeseriesType { .. }
            | ComplianceError::InvalidChannelType { .. }
            | ComplianceError::MalformedTimestamp { .. }
            | ComplianceError::InvalidVector { .. } => ErrorKind::Type,
            ComplianceError::InvalidKeyword { .. }
            | ComplianceError::ProhibitedKeyword { .. }
            | ComplianceError::MissingKeyword { .. }
            | ComplianceError::MissingTimeInformation
            | ComplianceError::VectorLengthMismatch { .. } => ErrorKind::Value,
        }
    }
}

/// Main validation entry point: check a whole timeseries for SEP005 compliance.
///
/// The timeseries must be a [`Value::List`] of channel records. Channels are
/// checked in order and the first failure is propagated; on success the whole
/// sequence complies.
pub fn validate_timeseries(timeseries: &Value) -> Result<(), ComplianceError> {
    let channels = match timeseries {
        Value::List(channels) => channels,
        other => {
            return Err(ComplianceError::InvalidTimeseriesType {
                found: other.type_name(),
            })
        }
    };

    debug!("checking SEP005 compliance of {} channels", channels.len());
    for channel in channels {
        validate_channel(channel)?;
    }

    Ok(())
}

/// Check a single channel record for SEP005 compliance.
///
/// The channel must be a [`Value::Record`]. Checks run in a fixed order so
/// that error precedence is deterministic: prohibited/collision keywords,
/// compulsory keywords, time/data length, timestamps, data container.
pub fn validate_channel(channel: &Value) -> Result<(), ComplianceError> {
    let record = match channel {
        Value::Record(record) => record,
        other => {
            return Err(ComplianceError::InvalidChannelType {
                found: other.type_name(),
            })
        }
    };

    trace!(
        "checking channel '{}'",
        record.get(NAME).and_then(Value::as_str).unwrap_or("<unnamed>")
    );

    let keys: Vec<&str> = record.keys().map(String::as_str).collect();

    check_prohibited_fields(&keys)?;
    check_compulsory_fields(&keys)?;

    if let (Some(time), Some(data)) = (record.get(TIME), record.get(DATA)) {
        check_vector_lengths(time, data)?;
    }

    check_timestamps(record)?;
    check_data_container(record)?;

    Ok(())
}

/// Cross-field consistency: the time vector and data vector must agree in
/// length.
fn check_vector_lengths(time: &Value, data: &Value) -> Result<(), ComplianceError> {
    let time_len = time.sequence_len().ok_or_else(|| invalid_vector(TIME, time))?;
    let data_len = data.sequence_len().ok_or_else(|| invalid_vector(DATA, data))?;

    if time_len != data_len {
        return Err(ComplianceError::VectorLengthMismatch { time_len, data_len });
    }

    Ok(())
}

/// Container check: `data` must live in the mandated numeric sample-array
/// container.
///
/// A generic list of numbers is rejected even when its contents would be
/// valid samples.
fn check_data_container(record: &Channel) -> Result<(), ComplianceError> {
    match record.get(DATA) {
        Some(Value::Samples(array)) => {
            if !array.data_type().is_numeric() {
                return Err(ComplianceError::InvalidVector {
                    field: DATA,
                    found: format!("samples of {}", array.data_type()),
                });
            }
            Ok(())
        }
        Some(other) => Err(invalid_vector(DATA, other)),
        // Absence was already rejected by the compulsory keyword check.
        None => Ok(()),
    }
}

fn invalid_vector(field: &'static str, value: &Value) -> ComplianceError {
    ComplianceError::InvalidVector {
        field,
        found: value.type_name().to_string(),
    }
}
