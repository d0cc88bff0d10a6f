use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
/// Why a query was generated relative to the primary query.
pub enum IntentType {
    #[default]
    Primary,
    Equivalent,
    FollowUp,
    Generalization,
    Canonicalization,
    Entailment,
    Specification,
    Clarification,
    Gap,
}

impl IntentType {
    pub const ALL: [IntentType; 9] = [
        IntentType::Primary,
        IntentType::Equivalent,
        IntentType::FollowUp,
        IntentType::Generalization,
        IntentType::Canonicalization,
        IntentType::Entailment,
        IntentType::Specification,
        IntentType::Clarification,
        IntentType::Gap,
    ];

    /// Canonical upper-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentType::Primary => "PRIMARY",
            IntentType::Equivalent => "EQUIVALENT",
            IntentType::FollowUp => "FOLLOW_UP",
            IntentType::Generalization => "GENERALIZATION",
            IntentType::Canonicalization => "CANONICALIZATION",
            IntentType::Entailment => "ENTAILMENT",
            IntentType::Specification => "SPECIFICATION",
            IntentType::Clarification => "CLARIFICATION",
            IntentType::Gap => "GAP",
        }
    }

    /// Normalizes a free-text intent label. Total: every input maps to a variant.
    ///
    /// Labels are upper-cased with spaces and hyphens turned into underscores, then
    /// matched exactly. Failing that, known fragments resolve legacy synonyms in a fixed
    /// order; anything else is [`IntentType::Primary`].
    pub fn normalize(raw: &str) -> Self {
        let label: String = raw
            .trim()
            .to_uppercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        if let Some(exact) = Self::ALL.iter().find(|t| t.as_str() == label) {
            return *exact;
        }

        if label.contains("FOLLOW") {
            IntentType::FollowUp
        } else if label.contains("SPEC") {
            IntentType::Specification
        } else if label.contains("GENERAL") {
            IntentType::Generalization
        } else if label.contains("EQUIV") {
            IntentType::Equivalent
        } else if label.contains("ENTAIL") {
            IntentType::Entailment
        } else if label.contains("CANON") {
            IntentType::Canonicalization
        } else if label.contains("CLARIF") {
            IntentType::Clarification
        } else {
            IntentType::Primary
        }
    }
}

impl From<String> for IntentType {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl std::fmt::Display for IntentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A target query and its intent.
pub struct Query {
    pub text: String,
    #[serde(default)]
    pub intent_type: IntentType,
}

impl Query {
    pub fn new(text: impl Into<String>, intent_type: IntentType) -> Self {
        Self {
            text: text.into(),
            intent_type,
        }
    }

    /// Builds a query from a raw intent label.
    pub fn with_raw_intent(text: impl Into<String>, raw_intent: &str) -> Self {
        Self::new(text, IntentType::normalize(raw_intent))
    }

    /// A query with the default (primary) intent.
    pub fn primary(text: impl Into<String>) -> Self {
        Self::new(text, IntentType::Primary)
    }
}
