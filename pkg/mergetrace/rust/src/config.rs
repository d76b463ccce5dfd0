// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::errors::SetupError;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_VALUE: &str = "0";

/// Merge a `timestamp,value` trace into another trace by timestamp
#[derive(Parser, Debug, Clone)]
#[command(name = "merge-trace")]
#[command(about = "Forward-fill the value column of SECOND into every row of FIRST")]
pub struct Args {
    /// File to merge into
    pub first: PathBuf,

    /// File to merge (two columns: timestamp, value)
    pub second: PathBuf,

    /// Output file, created or truncated
    pub output: PathBuf,

    /// Default value to assign before the first merge point from the second file
    #[arg(short, long = "default", env = "DD_MERGE_TRACE_DEFAULT", default_value = DEFAULT_VALUE)]
    pub default_value: String,

    /// Field delimiter used by all three files
    #[arg(long, env = "DD_MERGE_TRACE_DELIMITER", default_value_t = ',')]
    pub delimiter: char,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "DD_MERGE_TRACE_LOG_LEVEL", default_value = "info")]
    pub log_level: log::Level,
}

/// Settings the merge itself needs, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    pub default_value: String,
    pub delimiter: u8,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            default_value: DEFAULT_VALUE.to_string(),
            delimiter: b',',
        }
    }
}

impl Args {
    pub fn merge_config(&self) -> Result<MergeConfig, SetupError> {
        Ok(MergeConfig {
            default_value: self.default_value.clone(),
            delimiter: delimiter_byte(self.delimiter)?,
        })
    }
}

fn delimiter_byte(c: char) -> Result<u8, SetupError> {
    // Quotes and line breaks would make every row ambiguous.
    if !c.is_ascii() || matches!(c, '"' | '\n' | '\r') {
        return Err(SetupError::InvalidDelimiter(c));
    }
    Ok(c as u8)
}
