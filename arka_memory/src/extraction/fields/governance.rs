use arka_core::{BlockContent, GovernanceContent, RiskLevel};

use super::{FieldExtractor, FieldInput};
use crate::extraction::text::{first_sentence, list_items};

/// Gate names, matched case-sensitively in this order.
const GATE_MARKERS: &[&str] = &["DoR", "AGP-PASS", "validation", "gate"];
const CRITERIA_KEYWORDS: &[&str] = &["critère", "exigence", "condition"];
const HIGH_RISK: &[&str] = &["critique", "bloquant"];
const MEDIUM_RISK: &[&str] = &["attention", "surveiller"];

/// Which gate was passed, by whom, and the residual risk.
#[derive(Debug, Clone, Copy, Default)]
pub struct GovernanceExtractor;

impl FieldExtractor for GovernanceExtractor {
    fn extract(&self, input: &FieldInput<'_>) -> BlockContent {
        let gate_passed = GATE_MARKERS
            .iter()
            .find(|gate| input.content.contains(*gate))
            .map(|gate| (*gate).to_string())
            .unwrap_or_default();

        BlockContent::Governance(GovernanceContent {
            gate_passed,
            validation_details: first_sentence(input.content),
            validateur: input.first_agent(),
            criteres_respectes: list_items(input.content, CRITERIA_KEYWORDS),
            risk_assessment: assess_risk(input),
        })
    }
}

fn assess_risk(input: &FieldInput<'_>) -> RiskLevel {
    if input.mentions_any(HIGH_RISK) {
        RiskLevel::High
    } else if input.mentions_any(MEDIUM_RISK) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
