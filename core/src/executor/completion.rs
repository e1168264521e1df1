use std::collections::HashMap;

use crate::query::Format;
use crate::report::ReportRow;

/// Message sent by a finished sub-fetch.
#[derive(Debug, Clone)]
pub struct Completion {
    pub format: Format,
    pub row: ReportRow,
}

/// Per-format completion counts plus the report rows, for one run.
///
/// The barrier fires when every tracked format has reached its expected
/// count: the task total times how often the format was listed.
/// It fires at most once; later records never re-trigger it.
#[derive(Debug)]
pub struct CompletionAccumulator {
    expected: HashMap<Format, usize>,
    counts: HashMap<Format, usize>,
    rows: Vec<ReportRow>,
    fired: bool,
}

impl CompletionAccumulator {
    pub fn new(total_tasks: usize, formats: &[Format]) -> Self {
        let mut expected: HashMap<Format, usize> = HashMap::new();
        for format in formats {
            *expected.entry(*format).or_insert(0) += total_tasks;
        }
        Self {
            counts: expected.keys().map(|f| (*f, 0)).collect(),
            expected,
            rows: Vec::with_capacity(total_tasks * formats.len()),
            fired: false,
        }
    }

    /// Records one completion. Returns `true` only for the completion that
    /// makes the run complete.
    pub fn record(&mut self, completion: Completion) -> bool {
        if let Some(count) = self.counts.get_mut(&completion.format) {
            *count += 1;
        }
        self.rows.push(completion.row);
        self.try_fire()
    }

    /// Fires the barrier if the run is complete and it has not fired yet.
    pub fn try_fire(&mut self) -> bool {
        if self.fired || !self.is_complete() {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.expected
            .iter()
            .all(|(format, expected)| self.count(*format) == *expected)
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    pub fn count(&self, format: Format) -> usize {
        self.counts.get(&format).copied().unwrap_or(0)
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn failed(&self) -> usize {
        self.rows.iter().filter(|r| !r.status.is_ok()).count()
    }
}
