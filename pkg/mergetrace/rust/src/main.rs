// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use anyhow::{Context, Result};
use clap::Parser;
use dd_merge_trace::{Args, CsvSink, CsvSource, Merger};
use log::info;

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(args.log_level)?;
    info!(
        "merge-trace starting (version {})",
        env!("CARGO_PKG_VERSION")
    );

    let config = args.merge_config()?;

    let first = CsvSource::open(&args.first, config.delimiter)
        .with_context(|| format!("failed to open {}", args.first.display()))?;
    let second = CsvSource::open(&args.second, config.delimiter)
        .with_context(|| format!("failed to open {}", args.second.display()))?;
    let output = CsvSink::create(&args.output, config.delimiter)
        .with_context(|| format!("failed to open {}", args.output.display()))?;

    info!(
        "merging {} into {} (default {:?}), writing {}",
        args.second.display(),
        args.first.display(),
        config.default_value,
        args.output.display()
    );

    let stats = Merger::new(first, second, output, config.default_value)?.run()?;

    info!(
        "merged {} row(s): skipped {} primary and {} secondary row(s), applied {} secondary point(s), {} write failure(s)",
        stats.emitted,
        stats.primary_skipped,
        stats.secondary_skipped,
        stats.secondary_consumed,
        stats.write_failures
    );
    Ok(())
}
