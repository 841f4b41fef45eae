//! Career Matcher: scores every career insight against a profile's interests.
//!
//! Default: `KeywordCareerMatcher` (substring overlap + demand/growth bonuses).
//! `AppState` holds an `Arc<dyn CareerMatcher>` so the scoring backend can be
//! swapped without touching the orchestrator or handlers.

use crate::models::catalog::{CareerInsight, DemandLevel};
use crate::models::plan::CareerRecommendation;
use crate::planning::tables::{lookup, CAREER_DESCRIPTIONS};

/// Match percentages are always reported inside this band.
pub const MATCH_FLOOR: i32 = 65;
pub const MATCH_CEILING: i32 = 95;

pub const MAX_RECOMMENDATIONS: usize = 3;
pub const MAX_REQUIRED_SKILLS: usize = 6;

const TITLE_MATCH_POINTS: i32 = 30;
const SKILL_MATCH_POINTS: i32 = 20;
const VERY_HIGH_DEMAND_POINTS: i32 = 15;
const HIGH_DEMAND_POINTS: i32 = 10;
const FAST_GROWTH_POINTS: i32 = 15; // growth > 20%
const STEADY_GROWTH_POINTS: i32 = 10; // growth > 10%

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Ranks career insights for a set of interests. Implementations must be total:
/// any input (including no interests or no insights) yields a list, never an error.
pub trait CareerMatcher: Send + Sync {
    fn recommend(
        &self,
        interests: &[String],
        insights: &[CareerInsight],
    ) -> Vec<CareerRecommendation>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordCareerMatcher: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Keyword-overlap matcher.
///
/// Algorithm, per insight:
/// 1. For each lower-cased interest: +30 if any title word and the interest
///    contain one another, +20 if any skill word does (both may fire).
/// 2. Demand: +15 very_high, +10 high.
/// 3. Growth: +15 if > 20, else +10 if > 10.
/// 4. Clamp to [65, 95], stable-sort descending, keep the top 3.
///
/// With no interests only the demand/growth bonuses apply, so the ranking is
/// market-driven rather than relevance-driven. Callers are expected to flag that.
pub struct KeywordCareerMatcher {
    currency_symbol: String,
}

impl KeywordCareerMatcher {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }
}

impl CareerMatcher for KeywordCareerMatcher {
    fn recommend(
        &self,
        interests: &[String],
        insights: &[CareerInsight],
    ) -> Vec<CareerRecommendation> {
        let interests: Vec<String> = interests.iter().map(|i| i.to_lowercase()).collect();

        let mut scored: Vec<(u8, &CareerInsight)> = insights
            .iter()
            .map(|insight| (clamp_match(raw_score(&interests, insight)), insight))
            .collect();

        // sort_by is stable: equal scores keep catalog order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|(match_percentage, insight)| CareerRecommendation {
                title: insight.title.clone(),
                description: describe(insight),
                match_percentage,
                average_salary: format_salary(&self.currency_symbol, insight),
                growth_rate: format!("{}%", insight.growth_rate),
                required_skills: insight
                    .required_skills
                    .iter()
                    .take(MAX_REQUIRED_SKILLS)
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Unclamped score. `interests` must already be lower-cased.
pub fn raw_score(interests: &[String], insight: &CareerInsight) -> i32 {
    let title_words: Vec<String> = insight
        .title
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let skill_words: Vec<String> = insight
        .required_skills
        .iter()
        .flat_map(|s| {
            s.to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    let mut score = 0;
    for interest in interests {
        if overlaps(&title_words, interest) {
            score += TITLE_MATCH_POINTS;
        }
        if overlaps(&skill_words, interest) {
            score += SKILL_MATCH_POINTS;
        }
    }

    score += match insight.demand_level {
        DemandLevel::VeryHigh => VERY_HIGH_DEMAND_POINTS,
        DemandLevel::High => HIGH_DEMAND_POINTS,
        DemandLevel::Medium | DemandLevel::Low => 0,
    };

    if insight.growth_rate > 20.0 {
        score += FAST_GROWTH_POINTS;
    } else if insight.growth_rate > 10.0 {
        score += STEADY_GROWTH_POINTS;
    }

    score
}

fn overlaps(words: &[String], interest: &str) -> bool {
    words
        .iter()
        .any(|w| w.contains(interest) || interest.contains(w.as_str()))
}

pub fn clamp_match(raw: i32) -> u8 {
    raw.clamp(MATCH_FLOOR, MATCH_CEILING) as u8
}

fn describe(insight: &CareerInsight) -> String {
    match lookup(CAREER_DESCRIPTIONS, &insight.title) {
        Some(description) => description.to_string(),
        None => format!(
            "Build a rewarding career as a {} in the {} industry, where demand is {}.",
            insight.title,
            insight.industry,
            insight.demand_level.as_str().replace('_', " ")
        ),
    }
}

/// Formats a salary band as `{c}{min/1000}k - {c}{max/1000}k`.
pub fn format_salary(currency_symbol: &str, insight: &CareerInsight) -> String {
    format!(
        "{currency_symbol}{}k - {currency_symbol}{}k",
        insight.salary_min / 1000,
        insight.salary_max / 1000
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
