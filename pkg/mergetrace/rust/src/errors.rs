// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::num::ParseIntError;
use thiserror::Error;

/// Which input a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Primary,
    Secondary,
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamKind::Primary => write!(f, "primary"),
            StreamKind::Secondary => write!(f, "secondary"),
        }
    }
}

/// A failure confined to a single record. The record is skipped and the
/// merge keeps going.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("failed to parse UNIX timestamp from {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("record had unexpected amount of fields: expected {expected}, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("malformed record: {0}")]
    Csv(#[from] csv::Error),
    #[error("output write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl RecordError {
    /// True when the underlying reader failed rather than the record content.
    pub fn is_io(&self) -> bool {
        match self {
            RecordError::Csv(e) => matches!(e.kind(), csv::ErrorKind::Io(_)),
            RecordError::Io(_) => true,
            _ => false,
        }
    }
}

/// A failure that makes the whole run meaningless.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("{stream} stream has no title row")]
    MissingTitle { stream: StreamKind },
    #[error("failed to read {stream} title row: {source}")]
    Title {
        stream: StreamKind,
        #[source]
        source: RecordError,
    },
    #[error("failed to read from {stream} stream: {source}")]
    Read {
        stream: StreamKind,
        #[source]
        source: RecordError,
    },
    #[error("failed to write output title row: {0}")]
    WriteTitle(#[source] RecordError),
    #[error("invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),
}
