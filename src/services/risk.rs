// src/services/risk.rs
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit self-harm / suicide language.
pub const HIGH_RISK_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "want to die",
    "end my life",
    "hurt myself",
    "i want to die",
    "i'll kill myself",
    "i will kill myself",
];

/// Hopelessness / despair language.
pub const MODERATE_RISK_PHRASES: &[&str] = &[
    "hopeless",
    "worthless",
    "can't go on",
    "cant go on",
    "no reason to live",
    "empty",
    "broken",
    "give up",
    "depressed",
    "i can't",
];

/// Phrase tables used by the classifier. Entries must be lower-case.
#[derive(Debug, Clone, Copy)]
pub struct RiskPhrases {
    pub high: &'static [&'static str],
    pub moderate: &'static [&'static str],
}

impl RiskPhrases {
    pub const DEFAULT: RiskPhrases = RiskPhrases {
        high: HIGH_RISK_PHRASES,
        moderate: MODERATE_RISK_PHRASES,
    };
}

impl Default for RiskPhrases {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub fn classify(text: &str) -> RiskLevel {
    classify_with(&RiskPhrases::DEFAULT, text)
}

/// High-risk phrases are always checked first.
pub fn classify_with(phrases: &RiskPhrases, text: &str) -> RiskLevel {
    if text.is_empty() {
        return RiskLevel::Low;
    }

    let text_lower = text.to_lowercase();
    let contains_any = |list: &[&str]| list.iter().any(|p| text_lower.contains(p));

    if contains_any(phrases.high) {
        RiskLevel::High
    } else if contains_any(phrases.moderate) {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}
