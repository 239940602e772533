//! # sep005 - SEP005 Timeseries Compliance Checks
//!
//! `sep005` validates that in-memory "channel" records conform to the SEP005
//! data-interchange convention for time-series measurement data. It is meant
//! as a pre-flight check between ingestion (file parsers, sensor pipelines)
//! and downstream processing: hand it a timeseries, and it either passes or
//! fails fast with a descriptive error on the first violation.
//!
//! ## Rules
//!
//! A channel record is a string-keyed mapping subject to the following rules:
//!
//! | Keyword | Rule |
//! |---------|------|
//! | `data` | compulsory; must be a numeric sample array |
//! | `name` | compulsory; channel identifier |
//! | `unit_str` | compulsory; engineering unit of the samples |
//! | `time` / `fs` | at least one of the two; `time` must match `data` in length |
//! | `timestamp` | prohibited outright, in any casing |
//! | `*timestamp*` | any other keyword containing `timestamp` holds an ISO 8601 string |
//!
//! On top of the presence rules, any keyword whose lowercase form matches a
//! compulsory keyword without being its exact spelling (e.g. `Unit_Str`) is
//! rejected with a pointer to the canonical spelling, so casing mistakes do
//! not surface as confusing missing-keyword errors.
//!
//! ## Quick Start
//!
//! ```rust
//! use sep005::prelude::*;
//!
//! // Assemble a channel: compulsory keywords plus a sampling frequency.
//! let channel = ChannelBuilder::new("accel_z", "m/s2")
//!     .data(vec![0.12, 0.15, 0.11])
//!     .fs(50.0)
//!     .field("start_timestamp", "2023-08-23T12:00:00+02:00")
//!     .build();
//!
//! let timeseries = Value::List(vec![channel.into()]);
//! validate_timeseries(&timeseries)?;
//! # Ok::<(), sep005::validator::ComplianceError>(())
//! ```
//!
//! ## Validating deserialized records
//!
//! Records parsed from JSON deserialize straight into the dynamic [`Value`]
//! model. Note that a parsed array is a generic list, not yet a sample
//! array - the `data` vector has to be promoted into an Arrow array before
//! the record complies:
//!
//! ```rust
//! use sep005::prelude::*;
//!
//! let parsed: Value = serde_json::from_str(
//!     r#"{"name": "LNA_X", "unit_str": "m/s2", "data": [1.0, 2.0], "fs": 10.0}"#
//! ).unwrap();
//!
//! // Parsed as-is, `data` is a plain list and the record is rejected.
//! assert!(validate_channel(&parsed).is_err());
//!
//! let mut channel = match parsed {
//!     Value::Record(record) => record,
//!     _ => unreachable!(),
//! };
//! channel.insert("data".to_string(), Value::samples(vec![1.0, 2.0]));
//! assert!(validate_channel(&channel.into()).is_ok());
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`channel`]: dynamic value model, channel records and the fluent builder
//! - [`validator`]: the compliance rule set and its error taxonomy
//!
//! Validation is pure and synchronous: no I/O, no interior mutability, no
//! retained state. The same records can be checked concurrently from any
//! number of threads.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod validator;

/// Library version, as published in the package manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::channel::{Channel, ChannelBuilder, Value};
    pub use crate::validator::{
        check_compulsory_fields, check_prohibited_fields, check_timestamps, validate_channel,
        validate_timeseries, ComplianceError, ErrorKind, COMPULSORY_FIELDS, PROHIBITED_FIELDS,
    };
}
