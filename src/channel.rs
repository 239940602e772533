//! # Channel Data Model
//!
//! SEP005 channels arrive from untyped sources - file parsers, sensor
//! ingestion pipelines, deserialized JSON - so the validation boundary is the
//! dynamically typed [`Value`] enum rather than a fixed struct. A timeseries
//! is a [`Value::List`] of [`Value::Record`]s, and every field inside a
//! record is itself a [`Value`].
//!
//! Measurement samples are carried in Apache Arrow arrays
//! ([`Value::Samples`]). A generic [`Value::List`] of numbers is *not* a
//! sample array: the convention mandates the dedicated array container for
//! `data`, and the distinction is what [`crate::validator::validate_channel`]
//! enforces. Deserialization therefore never produces `Samples` - a parsed
//! JSON array comes back as a `List` and has to be promoted explicitly, which
//! keeps accidental plain-list payloads from slipping through.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validator::{DATA, FS, NAME, TIME, UNIT_STR};

/// A single measurement channel: a string-keyed record of field values.
pub type Channel = BTreeMap<String, Value>;

/// Dynamically typed value held by a channel field.
#[derive(Debug, Clone)]
pub enum Value {
    /// Measurement samples in the mandated Arrow array container.
    Samples(ArrayRef),
    /// Generic ordered sequence. A timeseries is a `List` of `Record`s.
    List(Vec<Value>),
    /// A string-keyed record, typically one measurement channel.
    Record(Channel),
    /// UTF-8 text.
    Text(String),
    /// Numeric scalar.
    Number(f64),
    /// Boolean scalar.
    Bool(bool),
    /// Explicit null.
    Null,
}

impl Value {
    /// Wrap a vector of floats into a sample array.
    pub fn samples(values: Vec<f64>) -> Self {
        Value::Samples(Arc::new(Float64Array::from(values)))
    }

    /// Human-readable tag for this value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Samples(_) => "samples",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Text(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Null => "null",
        }
    }

    /// Number of elements if this value is a sequence, `None` otherwise.
    pub fn sequence_len(&self) -> Option<usize> {
        match self {
            Value::Samples(array) => Some(array.len()),
            Value::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Borrow the inner string if this value is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Samples(a), Value::Samples(b)) => a.as_ref() == b.as_ref(),
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl From<ArrayRef> for Value {
    fn from(array: ArrayRef) -> Self {
        Value::Samples(array)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::samples(values)
    }
}

impl From<Channel> for Value {
    fn from(channel: Channel) -> Self {
        Value::Record(channel)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => {
                Value::Number(number.as_f64().unwrap_or(f64::NAN))
            }
            serde_json::Value::String(text) => Value::Text(text),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Record(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Sample arrays serialize as plain number sequences; the array
            // container does not survive a round-trip through JSON.
            Value::Samples(array) => {
                let floats = cast(array.as_ref(), &DataType::Float64)
                    .map_err(serde::ser::Error::custom)?;
                let floats = floats
                    .as_any()
                    .downcast_ref::<Float64Array>()
                    .ok_or_else(|| serde::ser::Error::custom("sample array does not cast to f64"))?;
                let mut seq = serializer.serialize_seq(Some(floats.len()))?;
                for sample in floats {
                    seq.serialize_element(&sample)?;
                }
                seq.end()
            }
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (key, value) in record {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Text(text) => serializer.serialize_str(text),
            Value::Number(number) => serializer.serialize_f64(*number),
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::Null => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a SEP005 channel value")
            }

            fn visit_bool<E: de::Error>(self, flag: bool) -> Result<Value, E> {
                Ok(Value::Bool(flag))
            }

            fn visit_i64<E: de::Error>(self, number: i64) -> Result<Value, E> {
                Ok(Value::Number(number as f64))
            }

            fn visit_u64<E: de::Error>(self, number: u64) -> Result<Value, E> {
                Ok(Value::Number(number as f64))
            }

            fn visit_f64<E: de::Error>(self, number: f64) -> Result<Value, E> {
                Ok(Value::Number(number))
            }

            fn visit_str<E: de::Error>(self, text: &str) -> Result<Value, E> {
                Ok(Value::Text(text.to_owned()))
            }

            fn visit_string<E: de::Error>(self, text: String) -> Result<Value, E> {
                Ok(Value::Text(text))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut access: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(item) = access.next_element()? {
                    items.push(item);
                }
                Ok(Value::List(items))
            }

            fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut record = Channel::new();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    record.insert(key, value);
                }
                Ok(Value::Record(record))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Fluent constructor for channel records.
///
/// The builder only assembles the record; compliance is established
/// separately by [`crate::validator::validate_channel`]. Incomplete or
/// contradictory records can be built freely, which the test suite relies on.
///
/// ```rust
/// use sep005::channel::ChannelBuilder;
///
/// let channel = ChannelBuilder::new("strain_gauge_1", "um/m")
///     .data(vec![1.2, 1.4, 1.3])
///     .time(vec![0.0, 0.5, 1.0])
///     .build();
///
/// assert!(channel.contains_key("unit_str"));
/// ```
pub struct ChannelBuilder {
    channel: Channel,
}

impl ChannelBuilder {
    /// Start a channel from its compulsory text metadata.
    pub fn new(name: impl Into<String>, unit_str: impl Into<String>) -> Self {
        let mut channel = Channel::new();
        channel.insert(NAME.to_string(), Value::Text(name.into()));
        channel.insert(UNIT_STR.to_string(), Value::Text(unit_str.into()));
        Self { channel }
    }

    /// Set the measurement vector.
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.channel.insert(DATA.to_string(), data.into());
        self
    }

    /// Set the explicit time vector.
    pub fn time(mut self, time: impl Into<Value>) -> Self {
        self.channel.insert(TIME.to_string(), time.into());
        self
    }

    /// Set the sampling frequency in Hz, the alternative to a time vector.
    pub fn fs(mut self, fs: f64) -> Self {
        self.channel.insert(FS.to_string(), Value::Number(fs));
        self
    }

    /// Set any additional keyword, e.g. a `start_timestamp`.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.channel.insert(key.into(), value.into());
        self
    }

    /// Finish and hand back the assembled record.
    pub fn build(self) -> Channel {
        self.channel
    }
}
