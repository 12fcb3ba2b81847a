use serde::{Deserialize, Serialize};

/// One detected food item with its display-ready nutrition strings.
///
/// Calories and protein are kept as the model phrased them (e.g. "250 kcal")
/// because the numeric formatting of the reply is not guaranteed; `"N/A"`
/// marks a field the parser could not extract. A missing quantity means the
/// item line carried no colon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub quantity: Option<String>,
    pub calories: String,
    pub protein: String,
}

/// Sentinel for nutrition fields that could not be parsed. Distinct from
/// zero: sentinel values are excluded from totals, not counted as 0.
pub const NOT_AVAILABLE: &str = "N/A";

/// Outcome of one full pipeline run. Built fresh per analysis and replaces
/// any earlier result wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub items: Vec<FoodItem>,
    pub total_calories: u32,
    pub total_protein: u32,
}

/// Token counts reported by the chat-completion endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Screens of the analysis flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    Preview,
    Result,
}

/// Triggers that move the flow between steps. Back/forward navigation is an
/// ordinary event routed through `Step::apply`, not a side effect on any
/// global history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    ImageSelected,
    AnalysisComplete,
    AnalysisFailed,
    Back,
}

impl Step {
    /// The transition table. Pairs not listed keep the current step — in
    /// particular a failed analysis never reaches `Result`.
    pub fn apply(self, event: StepEvent) -> Step {
        match (self, event) {
            (Step::Upload, StepEvent::ImageSelected) => Step::Preview,
            (Step::Preview, StepEvent::AnalysisComplete) => Step::Result,
            (Step::Result, StepEvent::AnalysisFailed) => Step::Preview,
            (Step::Preview, StepEvent::Back) => Step::Upload,
            (Step::Result, StepEvent::Back) => Step::Preview,
            (step, _) => step,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Step::Upload => "upload",
            Step::Preview => "preview",
            Step::Result => "result",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert_eq!(Step::Upload.apply(StepEvent::ImageSelected), Step::Preview);
        assert_eq!(Step::Preview.apply(StepEvent::AnalysisComplete), Step::Result);
    }

    #[test]
    fn test_back_transitions() {
        assert_eq!(Step::Result.apply(StepEvent::Back), Step::Preview);
        assert_eq!(Step::Preview.apply(StepEvent::Back), Step::Upload);
        assert_eq!(Step::Upload.apply(StepEvent::Back), Step::Upload);
    }

    #[test]
    fn test_unlisted_pairs_hold_position() {
        assert_eq!(Step::Upload.apply(StepEvent::AnalysisComplete), Step::Upload);
        assert_eq!(Step::Result.apply(StepEvent::ImageSelected), Step::Result);
        assert_eq!(Step::Result.apply(StepEvent::AnalysisComplete), Step::Result);
    }

    #[test]
    fn test_failure_never_reaches_result() {
        assert_eq!(Step::Preview.apply(StepEvent::AnalysisFailed), Step::Preview);
        assert_eq!(Step::Result.apply(StepEvent::AnalysisFailed), Step::Preview);
    }
}
