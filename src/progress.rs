//! Row-granular progress for one reformat run.

/// Receives percentages in `0..=100`.
pub trait ProgressSink {
    fn report(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

/// Shared counter across all worksheets of a run. Single writer: the run that owns it.
#[derive(Debug)]
pub struct ProgressCounter {
    total: usize,
    processed: usize,
    last: Option<u8>,
}

impl ProgressCounter {
    /// `data_rows` is the run-wide row total; zero is floored to one.
    pub fn new(data_rows: usize) -> Self {
        Self {
            total: data_rows.max(1),
            processed: 0,
            last: None,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn percent(&self) -> u8 {
        (self.processed * 100 / self.total).min(100) as u8
    }

    /// Counts one processed row. Reports only when the percentage moves.
    pub fn advance(&mut self, sink: &mut dyn ProgressSink) {
        self.processed += 1;
        let percent = self.percent();
        if self.last != Some(percent) {
            self.last = Some(percent);
            sink.report(percent);
        }
    }

    /// Final report, always 100.
    pub fn finish(&mut self, sink: &mut dyn ProgressSink) {
        self.last = Some(100);
        sink.report(100);
    }
}
