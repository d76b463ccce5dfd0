// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::errors::RecordError;

/// One data row with its leading UNIX timestamp parsed out.
/// `fields` keeps every column, the timestamp column included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedRecord {
    pub timestamp: i64,
    pub fields: Vec<String>,
}

impl TimedRecord {
    /// Parse field[0] as the timestamp. An empty row has no timestamp and is
    /// reported as an invalid one.
    pub fn from_fields(fields: Vec<String>) -> Result<Self, RecordError> {
        let timestamp = parse_timestamp(fields.first().map(String::as_str).unwrap_or(""))?;
        Ok(Self { timestamp, fields })
    }
}

/// A `(timestamp, value)` row from the secondary stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryPoint {
    pub timestamp: i64,
    pub value: String,
}

/// Parse a UNIX timestamp in seconds. Accepts an optional sign, nothing else.
pub fn parse_timestamp(s: &str) -> Result<i64, RecordError> {
    s.parse::<i64>().map_err(|source| RecordError::InvalidTimestamp {
        value: s.to_string(),
        source,
    })
}

/// Secondary rows must be exactly `timestamp,value`.
pub fn parse_secondary(fields: Vec<String>) -> Result<SecondaryPoint, RecordError> {
    let [ts, value]: [String; 2] = fields
        .try_into()
        .map_err(|fields: Vec<String>| RecordError::FieldCount {
            expected: 2,
            found: fields.len(),
        })?;
    Ok(SecondaryPoint {
        timestamp: parse_timestamp(&ts)?,
        value,
    })
}
