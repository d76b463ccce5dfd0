// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::record::SecondaryPoint;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// Next secondary point not yet applied.
    Point(SecondaryPoint),
    /// Secondary stream has nothing more to give.
    Exhausted,
}

/// Position of the merge within the secondary stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCursor {
    carry: String,
    pending: Pending,
}

impl MergeCursor {
    pub fn new(default_value: impl Into<String>, pending: Pending) -> Self {
        Self {
            carry: default_value.into(),
            pending,
        }
    }

    pub fn carry(&self) -> &str {
        &self.carry
    }

    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending == Pending::Exhausted
    }

    /// True when the pending point is already in effect at `timestamp`.
    /// Ties count as in effect.
    pub fn is_due(&self, timestamp: i64) -> bool {
        matches!(&self.pending, Pending::Point(p) if p.timestamp <= timestamp)
    }

    /// Make the pending point's value the carry value and queue `next`.
    /// Returns the timestamp of the point that was applied.
    pub(crate) fn apply(&mut self, next: Pending) -> Option<i64> {
        match std::mem::replace(&mut self.pending, next) {
            Pending::Point(point) => {
                self.carry = point.value;
                Some(point.timestamp)
            }
            Pending::Exhausted => None,
        }
    }
}

impl fmt::Display for MergeCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pending {
            Pending::Point(p) => write!(
                f,
                "carry={:?} next={}@{}",
                self.carry, p.value, p.timestamp
            ),
            Pending::Exhausted => write!(f, "carry={:?} exhausted", self.carry),
        }
    }
}
