use std::path::Path;

use crate::cue::AnalysisCue;
use crate::handlers::Analyzer;
use crate::models::{AnalysisResult, Step, StepEvent};
use crate::services::ImageUpload;

/// Alert shown whenever an analysis attempt fails, regardless of which stage
/// broke. Parse anomalies never trigger it.
pub const ANALYZE_FAILED_ALERT: &str = "Failed to analyze image. Please try again.";

/// One interactive flow through upload → preview → result.
///
/// All state lives here and is mutated only by the single active command;
/// alerts are queued for the caller to display instead of being printed
/// directly, which keeps the failure paths assertable.
pub struct Session {
    analyzer: Analyzer,
    step: Step,
    image: Option<ImageUpload>,
    result: Option<AnalysisResult>,
    alerts: Vec<String>,
}

impl Session {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            step: Step::Upload,
            image: None,
            result: None,
            alerts: Vec::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Drain alerts queued since the last call.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Pick a photo. A read failure alerts and keeps the current step; it is
    /// a local error, not an analysis failure.
    pub fn select_image(&mut self, path: &Path) {
        match ImageUpload::read(path) {
            Ok(upload) => {
                log::info!(
                    "📸 Selected {} ({} bytes)",
                    upload.path().display(),
                    upload.byte_len()
                );
                self.image = Some(upload);
                self.step = self.step.apply(StepEvent::ImageSelected);
            }
            Err(e) => {
                log::error!("❌ {}", e);
                self.alerts.push(format!("Could not read image: {}", e));
            }
        }
    }

    /// Run the pipeline on the selected image. Valid from the preview step
    /// and, as a re-analyze, from the result step. On failure the attempt is
    /// discarded wholesale: any stale result is cleared, the step returns to
    /// preview, and exactly one alert is queued.
    pub async fn analyze(&mut self) {
        if self.step == Step::Upload {
            return;
        }
        let Some(image) = self.image.as_ref() else {
            return;
        };

        let cue = AnalysisCue::start();
        let outcome = self.analyzer.analyze(image).await;
        cue.stop();

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.step = self.step.apply(StepEvent::AnalysisComplete);
            }
            Err(e) => {
                log::error!("❌ Analysis failed: {}", e);
                self.result = None;
                self.step = self.step.apply(StepEvent::AnalysisFailed);
                self.alerts.push(ANALYZE_FAILED_ALERT.to_string());
            }
        }
    }

    pub fn back(&mut self) {
        self.step = self.step.apply(StepEvent::Back);
    }
}
