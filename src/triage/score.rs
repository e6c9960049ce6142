//! Score aggregation and verdict.
//!
//! Only high-severity findings cost points; medium findings flip the
//! verdict without touching the score; low findings (read errors) affect
//! neither.

use crate::core::triage::{Finding, Severity, Summary, Verdict};
use crate::triage::config::ScoringConfig;

/// Scoring engine for findings.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    base_score: u8,
    high_penalty: u8,
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl ScoreEngine {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            base_score: config.base_score.min(100),
            high_penalty: config.high_penalty,
        }
    }

    /// `max(0, base - penalty * high_count)`, always within [0, 100].
    pub fn score(&self, findings: &[Finding]) -> u8 {
        let highs = findings
            .iter()
            .filter(|f| f.severity == Severity::High)
            .count() as u64;
        let deduction = highs.saturating_mul(self.high_penalty as u64);
        (self.base_score as u64).saturating_sub(deduction) as u8
    }

    pub fn verdict(&self, findings: &[Finding]) -> Verdict {
        if findings.iter().any(|f| f.severity.is_risk_signal()) {
            Verdict::Suspicious
        } else {
            Verdict::Clean
        }
    }

    pub fn summarize(&self, findings: &[Finding]) -> Summary {
        Summary {
            score: self.score(findings),
            verdict: self.verdict(findings),
        }
    }
}

/// Public API: summarize findings with default weights.
pub fn summarize(findings: &[Finding]) -> Summary {
    ScoreEngine::default().summarize(findings)
}
