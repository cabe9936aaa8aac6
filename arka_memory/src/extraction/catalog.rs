//! The pattern catalog: detectable knowledge categories and their vocabulary.
//!
//! The catalog is a constant table. Every extraction pass reads it in
//! declaration order, and that order is the order blocks are reported in.

use arka_core::BlockType;

/// Definition of a single detectable category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternSpec {
    /// The block type produced when this pattern fires.
    pub block_type: BlockType,

    /// Lowercase literal phrases; any one present is evidence for the category.
    pub triggers: &'static [&'static str],

    /// Reliability of this category's detection, in `0.0..=1.0`.
    pub weight: f64,

    /// Typical criticality of blocks of this category, in `1..=10`.
    pub importance_base: u8,
}

impl PatternSpec {
    /// The catalog identifier, identical to the block type name.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.block_type.as_str()
    }
}

/// The default catalog, in evaluation order.
pub static PATTERN_CATALOG: [PatternSpec; 7] = [
    PatternSpec {
        block_type: BlockType::Vision,
        triggers: &[
            "objectif",
            "livrable",
            "contrainte",
            "succès",
            "mission",
            "vision",
            "but",
            "finalité",
        ],
        weight: 0.9,
        importance_base: 9,
    },
    PatternSpec {
        block_type: BlockType::Decision,
        triggers: &[
            "décide",
            "valide",
            "rejette",
            "approuve",
            "tranche",
            "opte pour",
            "choisit",
        ],
        weight: 0.8,
        importance_base: 8,
    },
    PatternSpec {
        block_type: BlockType::Blocker,
        triggers: &[
            "bloqué",
            "problème",
            "impossible",
            "manque",
            "attente",
            "obstacle",
            "difficulté",
        ],
        weight: 0.9,
        importance_base: 8,
    },
    PatternSpec {
        block_type: BlockType::ContextEvolution,
        triggers: &[
            "par contre",
            "maintenant",
            "finalement",
            "en fait",
            "update",
            "changement",
            "évolution",
        ],
        weight: 0.7,
        importance_base: 7,
    },
    PatternSpec {
        block_type: BlockType::AgentsInteraction,
        triggers: &[
            "coordination",
            "échange",
            "discussion",
            "réunion",
            "point",
            "sync",
        ],
        weight: 0.6,
        importance_base: 6,
    },
    PatternSpec {
        block_type: BlockType::Governance,
        triggers: &[
            "gate",
            "validation",
            "approuvé",
            "conforme",
            "audit",
            "contrôle",
            "gouvernance",
        ],
        weight: 0.8,
        importance_base: 9,
    },
    PatternSpec {
        block_type: BlockType::Insight,
        triggers: &[
            "insight",
            "découverte",
            "apprentissage",
            "constat",
            "observation",
            "retour d'expérience",
        ],
        weight: 0.7,
        importance_base: 6,
    },
];

/// The default catalog as a slice.
#[must_use]
pub fn default_catalog() -> &'static [PatternSpec] {
    &PATTERN_CATALOG
}

/// Look up the catalog entry for a block type.
#[must_use]
pub fn pattern_for(block_type: BlockType) -> Option<&'static PatternSpec> {
    PATTERN_CATALOG.iter().find(|spec| spec.block_type == block_type)
}
