use arka_core::{BlockContent, VisionContent};

use super::{FieldExtractor, FieldInput};
use crate::extraction::text::{first_sentence, list_items, truncate_utf16};

const OBJECTIVE_KEYWORDS: &[&str] = &["objectif", "but", "goal"];
const CONSTRAINT_KEYWORDS: &[&str] = &["contrainte", "limite", "restriction"];
const DELIVERABLE_KEYWORDS: &[&str] = &["livrable", "deliverable", "résultat"];
const SUCCESS_KEYWORDS: &[&str] = &["succès", "critère", "réussite"];
const SUMMARY_UNITS: usize = 150;

/// Objectives, constraints, deliverables and success criteria.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisionExtractor;

impl FieldExtractor for VisionExtractor {
    fn extract(&self, input: &FieldInput<'_>) -> BlockContent {
        let objectives = list_items(input.content, OBJECTIVE_KEYWORDS);
        let objectif = if objectives.is_empty() {
            first_sentence(input.content)
        } else {
            objectives.join("; ")
        };

        BlockContent::Vision(VisionContent {
            objectif,
            contraintes: list_items(input.content, CONSTRAINT_KEYWORDS),
            livrables: list_items(input.content, DELIVERABLE_KEYWORDS),
            criteres_succes: list_items(input.content, SUCCESS_KEYWORDS),
            summary: truncate_utf16(input.content, SUMMARY_UNITS),
        })
    }
}
