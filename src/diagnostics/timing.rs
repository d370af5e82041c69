use serde::{Deserialize, Serialize};

/// Elapsed time of a single pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Per-stage timings of one page or one document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Summed time of all stages with the given label.
    pub fn stage_ms(&self, label: &str) -> f64 {
        self.stages
            .iter()
            .filter(|s| s.label == label)
            .map(|s| s.elapsed_ms)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ms_sums_matching_labels() {
        let mut t = TimingBreakdown::with_total(10.0);
        t.push("detect", 2.0);
        t.push("transform", 1.5);
        t.push("detect", 0.5);
        assert_eq!(t.stage_ms("detect"), 2.5);
        assert_eq!(t.stage_ms("missing"), 0.0);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"totalMs\":10.0"));
        assert!(json.contains("\"elapsedMs\":1.5"));
    }
}
