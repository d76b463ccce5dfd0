// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! As-of join of a secondary `timestamp,value` trace into a primary trace.
//!
//! Both inputs are read once, front to back. Each primary row gets the value
//! of the latest secondary point at or before its timestamp, or the
//! configured default while no such point exists yet.

use crate::cursor::{MergeCursor, Pending};
use crate::errors::{RecordError, SetupError, StreamKind};
use crate::record::{TimedRecord, parse_secondary};
use crate::stream::{RecordSink, RecordSource};
use log::{debug, error, info, warn};

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub emitted: u64,
    pub primary_skipped: u64,
    pub secondary_skipped: u64,
    pub secondary_consumed: u64,
    pub write_failures: u64,
}

/// Result of processing one primary row.
#[derive(Debug)]
pub enum StepOutcome {
    /// A merged row was produced.
    Emitted,
    /// The primary row was malformed and dropped.
    Skipped(RecordError),
    /// The primary stream is exhausted.
    Done,
}

/// Output title row: the primary titles followed by every secondary title
/// except the leading timestamp column.
pub fn merge_titles(mut primary: Vec<String>, secondary: &[String]) -> Vec<String> {
    primary.extend(secondary.iter().skip(1).cloned());
    primary
}

pub struct Merger<P, S, W> {
    primary: P,
    secondary: S,
    sink: W,
    cursor: MergeCursor,
    width: usize,
    stats: MergeStats,
}

impl<P, S, W> Merger<P, S, W>
where
    P: RecordSource,
    S: RecordSource,
    W: RecordSink,
{
    /// Consume both title rows, write the merged title, and load the first
    /// secondary point.
    pub fn new(
        mut primary: P,
        mut secondary: S,
        mut sink: W,
        default_value: impl Into<String>,
    ) -> Result<Self, SetupError> {
        let titles = read_title(&mut primary, StreamKind::Primary)?;
        let secondary_titles = read_title(&mut secondary, StreamKind::Secondary)?;
        let width = titles.len();

        sink.write_fields(&merge_titles(titles, &secondary_titles))
            .and_then(|()| sink.flush())
            .map_err(SetupError::WriteTitle)?;

        let mut stats = MergeStats::default();
        let pending = first_point(&mut secondary, &mut stats);

        Ok(Self {
            primary,
            secondary,
            sink,
            cursor: MergeCursor::new(default_value, pending),
            width,
            stats,
        })
    }

    pub fn cursor(&self) -> &MergeCursor {
        &self.cursor
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    /// Process one primary row.
    ///
    /// Only an I/O failure on the primary stream is returned as an error;
    /// malformed rows come back as [`StepOutcome::Skipped`].
    pub fn step(&mut self) -> Result<StepOutcome, SetupError> {
        let fields = match self.primary.next_fields() {
            None => return Ok(StepOutcome::Done),
            Some(Ok(fields)) => fields,
            Some(Err(e)) if e.is_io() => {
                return Err(SetupError::Read {
                    stream: StreamKind::Primary,
                    source: e,
                });
            }
            Some(Err(e)) => return Ok(self.skip(e)),
        };

        if fields.len() != self.width {
            return Ok(self.skip(RecordError::FieldCount {
                expected: self.width,
                found: fields.len(),
            }));
        }

        let record = match TimedRecord::from_fields(fields) {
            Ok(record) => record,
            Err(e) => return Ok(self.skip(e)),
        };

        while self.cursor.is_due(record.timestamp) {
            let next = self.next_point();
            if let Some(applied) = self.cursor.apply(next) {
                self.stats.secondary_consumed += 1;
                debug!(
                    "row {}: applied secondary point from {applied}",
                    record.timestamp
                );
            }
        }

        let mut out = record.fields;
        out.push(self.cursor.carry().to_string());
        self.emit(&out);
        Ok(StepOutcome::Emitted)
    }

    /// Run until the primary stream is exhausted.
    pub fn run(mut self) -> Result<MergeStats, SetupError> {
        loop {
            if let StepOutcome::Done = self.step()? {
                break;
            }
        }
        debug!("merge finished: {}", self.cursor);
        Ok(self.stats)
    }

    fn skip(&mut self, err: RecordError) -> StepOutcome {
        warn!("failed to parse line from primary stream, skipping: {err}");
        self.stats.primary_skipped += 1;
        StepOutcome::Skipped(err)
    }

    /// Read forward to the next usable secondary point, dropping malformed rows.
    fn next_point(&mut self) -> Pending {
        loop {
            match self.secondary.next_fields() {
                None => {
                    info!("secondary stream exhausted");
                    return Pending::Exhausted;
                }
                Some(Ok(fields)) => match parse_secondary(fields) {
                    Ok(point) => return Pending::Point(point),
                    Err(e) => {
                        warn!("failed to read line from secondary stream, skipping: {e}");
                        self.stats.secondary_skipped += 1;
                    }
                },
                Some(Err(e)) if e.is_io() => {
                    error!("secondary stream read failed, treating as exhausted: {e}");
                    return Pending::Exhausted;
                }
                Some(Err(e)) => {
                    warn!("failed to read line from secondary stream, skipping: {e}");
                    self.stats.secondary_skipped += 1;
                }
            }
        }
    }

    /// A row only counts as emitted once it has been flushed; buffered
    /// sinks report write errors at flush time.
    fn emit(&mut self, fields: &[String]) {
        match self
            .sink
            .write_fields(fields)
            .and_then(|()| self.sink.flush())
        {
            Ok(()) => self.stats.emitted += 1,
            Err(e) => {
                error!("failed to write output row: {e}");
                self.stats.write_failures += 1;
            }
        }
    }
}

fn read_title<R: RecordSource>(
    source: &mut R,
    stream: StreamKind,
) -> Result<Vec<String>, SetupError> {
    source
        .read_title()
        .map_err(|source| SetupError::Title { stream, source })?
        .ok_or(SetupError::MissingTitle { stream })
}

/// The first data row decides whether the secondary stream is usable at all.
/// If it is missing or malformed the default is held for the whole run.
fn first_point<S: RecordSource>(secondary: &mut S, stats: &mut MergeStats) -> Pending {
    let parsed = match secondary.next_fields() {
        None => {
            info!("secondary stream has no data rows, using the default value throughout");
            return Pending::Exhausted;
        }
        Some(fields) => fields.and_then(parse_secondary),
    };
    match parsed {
        Ok(point) => Pending::Point(point),
        Err(e) if e.is_io() => {
            error!("secondary stream read failed, using the default value throughout: {e}");
            Pending::Exhausted
        }
        Err(e) => {
            warn!("first secondary row is unusable, using the default value throughout: {e}");
            stats.secondary_skipped += 1;
            Pending::Exhausted
        }
    }
}
