use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::Contract;
use crate::errors::ContractError;

// ── Ideas ──

/// Wire names of the idea contract, in prompt order.
pub const IDEA_FIELDS: &[&str] = &[
    "title",
    "description",
    "category",
    "targetMarket",
    "problem",
    "solution",
];

/// The model's half of an idea: exactly the fields the idea prompt asks for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub target_market: String,
    pub problem: String,
    pub solution: String,
}

impl Contract for IdeaDraft {
    const SCHEMA: &'static str = "idea";
    const REQUIRED_FIELDS: &'static [&'static str] = IDEA_FIELDS;
}

/// A generated startup idea. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub target_market: String,
    pub problem: String,
    pub solution: String,
    pub created_at: DateTime<Utc>,
}

impl Idea {
    /// Stamp a validated draft with a fresh id and creation time.
    pub fn from_draft(draft: IdeaDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            target_market: draft.target_market,
            problem: draft.problem,
            solution: draft.solution,
            created_at: Utc::now(),
        }
    }
}

// ── Evaluations ──

/// Wire names of the evaluation contract, in prompt order.
pub const EVALUATION_FIELDS: &[&str] = &[
    "marketSize",
    "competition",
    "feasibility",
    "profitability",
    "innovation",
    "timeToMarket",
    "overallScore",
    "strengths",
    "weaknesses",
    "recommendations",
    "marketAnalysis",
    "riskAssessment",
];

pub const CRITERION_MIN: u8 = 1;
pub const CRITERION_MAX: u8 = 5;
pub const OVERALL_MAX: u8 = 100;

/// A multi-criteria evaluation of one idea.
///
/// `idea_id` is never part of the model's output; it is filled in by the
/// pipeline after decoding so the session can tell which idea it scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub idea_id: String,
    pub market_size: u8,
    pub competition: u8,
    pub feasibility: u8,
    pub profitability: u8,
    pub innovation: u8,
    pub time_to_market: u8,
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub market_analysis: String,
    pub risk_assessment: String,
}

impl Evaluation {
    /// The six criterion scores paired with their wire names.
    pub fn criteria(&self) -> [(&'static str, u8); 6] {
        [
            ("marketSize", self.market_size),
            ("competition", self.competition),
            ("feasibility", self.feasibility),
            ("profitability", self.profitability),
            ("innovation", self.innovation),
            ("timeToMarket", self.time_to_market),
        ]
    }
}

impl Contract for Evaluation {
    const SCHEMA: &'static str = "evaluation";
    const REQUIRED_FIELDS: &'static [&'static str] = EVALUATION_FIELDS;

    fn validate(&self) -> Result<(), ContractError> {
        for (field, value) in self.criteria() {
            if !(CRITERION_MIN..=CRITERION_MAX).contains(&value) {
                return Err(ContractError::OutOfRange {
                    field,
                    value: value as i64,
                    min: CRITERION_MIN as i64,
                    max: CRITERION_MAX as i64,
                });
            }
        }
        if self.overall_score > OVERALL_MAX {
            return Err(ContractError::OutOfRange {
                field: "overallScore",
                value: self.overall_score as i64,
                min: 0,
                max: OVERALL_MAX as i64,
            });
        }
        Ok(())
    }
}

// ── Activity log ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub details: serde_json::Value,
}
