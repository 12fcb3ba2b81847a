use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Activity cue shown while an analysis is in flight, the terminal
/// counterpart of the original background audio. Strictly best-effort:
/// write failures are swallowed and never reach the pipeline.
pub struct AnalysisCue {
    handle: Option<JoinHandle<()>>,
}

impl AnalysisCue {
    pub fn start() -> Self {
        let handle = tokio::spawn(async {
            let mut interval = tokio::time::interval(Duration::from_millis(150));
            let mut frame = 0usize;
            loop {
                interval.tick().await;
                let mut err = std::io::stderr();
                let _ = write!(err, "\r🔎 Analyzing {} ", FRAMES[frame % FRAMES.len()]);
                let _ = err.flush();
                frame += 1;
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn stop(mut self) {
        self.abort();
        let mut err = std::io::stderr();
        let _ = write!(err, "\r                \r");
        let _ = err.flush();
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

// An early return must not leave the spinner running.
impl Drop for AnalysisCue {
    fn drop(&mut self) {
        self.abort();
    }
}
