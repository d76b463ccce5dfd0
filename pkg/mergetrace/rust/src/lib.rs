// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

pub mod config;
pub mod cursor;
pub mod errors;
pub mod merge;
pub mod record;
pub mod stream;

pub use config::{Args, MergeConfig};
pub use errors::{RecordError, SetupError, StreamKind};
pub use merge::{MergeStats, Merger, StepOutcome};
pub use stream::{CsvSink, CsvSource, RecordSink, RecordSource};
