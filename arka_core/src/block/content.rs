//! Structured field records, one per block type.
//!
//! Field order in each record is part of the block identity: the hash is
//! computed over the serialized record, so reordering fields changes every
//! hash already persisted.

use serde::{Deserialize, Serialize};

/// Urgency of a blocker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    #[default]
    Low,
}

impl Urgency {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Risk level attached to a governance event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RiskLevel {
    #[serde(rename = "Élevé")]
    High,
    #[serde(rename = "Moyen")]
    Medium,
    #[default]
    #[serde(rename = "Faible")]
    Low,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "Élevé",
            Self::Medium => "Moyen",
            Self::Low => "Faible",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionContent {
    /// Joined objective bullets, or the first sentence.
    pub objectif: String,
    pub contraintes: Vec<String>,
    pub livrables: Vec<String>,
    pub criteres_succes: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionContent {
    pub decision: String,
    /// Text from the first causal connective to the end of its sentence.
    pub rationale: String,
    pub impact: Vec<String>,
    /// First known agent mentioned, or empty.
    pub responsable: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockerContent {
    pub blocker: String,
    pub cause: String,
    pub impact: String,
    pub resolution_needed: String,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEvolutionContent {
    pub previous_state: String,
    pub new_state: String,
    pub reason: String,
    pub agents_impacted: Vec<String>,
    pub impact_analysis: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentsInteractionContent {
    pub summary: String,
    pub participants: Vec<String>,
    pub decisions_prises: Vec<String>,
    pub actions_suivies: Vec<String>,
    /// Sentiment ladder score in `0..=10`.
    pub satisfaction: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceContent {
    pub gate_passed: String,
    pub validation_details: String,
    pub validateur: String,
    pub criteres_respectes: Vec<String>,
    pub risk_assessment: RiskLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightContent {
    pub insight: String,
    pub context: String,
    pub learning: String,
    pub actionable: String,
}

/// Fallback record for an identifier with no dedicated extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericContent {
    pub summary: String,
    pub full_content: String,
}

/// Structured content of a memory block.
///
/// Serializes as the bare field mapping of the wrapped record, with no
/// variant tag, so the wire shape is `{ "objectif": ..., ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BlockContent {
    Vision(VisionContent),
    Decision(DecisionContent),
    Blocker(BlockerContent),
    ContextEvolution(ContextEvolutionContent),
    AgentsInteraction(AgentsInteractionContent),
    Governance(GovernanceContent),
    Insight(InsightContent),
    Generic(GenericContent),
}

impl BlockContent {
    /// A short human-readable headline for this content.
    #[must_use]
    pub fn headline(&self) -> &str {
        match self {
            Self::Vision(c) => &c.objectif,
            Self::Decision(c) => &c.summary,
            Self::Blocker(c) => &c.blocker,
            Self::ContextEvolution(c) => &c.new_state,
            Self::AgentsInteraction(c) => &c.summary,
            Self::Governance(c) => &c.validation_details,
            Self::Insight(c) => &c.insight,
            Self::Generic(c) => &c.summary,
        }
    }
}
