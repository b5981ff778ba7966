//! Background execution of one reformat run.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use tracing::error;

use crate::error::{FormatError, Result};
use crate::formatter::{FormatRules, reformat};

#[derive(Debug)]
pub enum JobEvent {
    Progress(u8),
    Finished(Result<PathBuf>),
}

/// A reformat running on its own thread. Consume it with [`ReformatJob::wait_with`].
#[derive(Debug)]
pub struct ReformatJob {
    events: Receiver<JobEvent>,
    handle: JoinHandle<()>,
}

pub fn spawn(input: PathBuf, rules: FormatRules) -> Result<ReformatJob> {
    let (tx, events) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("reformat".into())
        .spawn(move || {
            let progress_tx = tx.clone();
            let mut sink = move |percent: u8| {
                let _ = progress_tx.send(JobEvent::Progress(percent));
            };
            let outcome = reformat(&input, &rules, &mut sink);
            let _ = tx.send(JobEvent::Finished(outcome));
        })
        .map_err(|e| FormatError::Unexpected(format!("cannot start worker thread: {e}")))?;
    Ok(ReformatJob { events, handle })
}

impl ReformatJob {
    /// Blocks the calling thread until the run ends, handing every progress value to
    /// `on_progress` on this thread.
    pub fn wait_with(self, mut on_progress: impl FnMut(u8)) -> Result<PathBuf> {
        let mut outcome = None;
        for event in self.events.iter() {
            match event {
                JobEvent::Progress(percent) => on_progress(percent),
                JobEvent::Finished(result) => {
                    outcome = Some(result);
                    break;
                }
            }
        }

        if self.handle.join().is_err() {
            error!("reformat worker panicked");
            return Err(FormatError::Unexpected("reformat worker panicked".into()));
        }
        outcome.unwrap_or_else(|| {
            Err(FormatError::Unexpected(
                "reformat worker exited without a result".into(),
            ))
        })
    }
}
