//! Career Insight and Learning Resource records. Seeded out-of-band and
//! read-only from the matching pipeline's point of view.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl DemandLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::Low => "low",
            DemandLevel::Medium => "medium",
            DemandLevel::High => "high",
            DemandLevel::VeryHigh => "very_high",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(DemandLevel::Low),
            "medium" => Some(DemandLevel::Medium),
            "high" => Some(DemandLevel::High),
            "very_high" => Some(DemandLevel::VeryHigh),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Course,
    Tutorial,
    Book,
    Video,
    Article,
    Tool,
}

impl ResourceType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "course" => Some(ResourceType::Course),
            "tutorial" => Some(ResourceType::Tutorial),
            "book" => Some(ResourceType::Book),
            "video" => Some(ResourceType::Video),
            "article" => Some(ResourceType::Article),
            "tool" => Some(ResourceType::Tool),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    Free,
    Paid,
    Freemium,
}

impl PriceType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "free" => Some(PriceType::Free),
            "paid" => Some(PriceType::Paid),
            "freemium" => Some(PriceType::Freemium),
            _ => None,
        }
    }
}

/// Market data for one known occupation.
///
/// Invariants (enforced by table constraints): `salary_min <= salary_max`,
/// `growth_rate >= 0`, `required_skills` non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerInsight {
    pub id: Uuid,
    pub title: String,
    pub industry: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearningResource {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    pub resource_type: ResourceType,
    pub provider: String,
    pub skill_tags: Vec<String>,
    pub difficulty: Difficulty,
    pub duration_hours: Option<f64>,
    pub price_type: PriceType,
    pub rating: Option<f64>,
    pub is_featured: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Database rows
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, FromRow)]
pub struct CareerInsightRow {
    pub id: Uuid,
    pub title: String,
    pub industry: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub growth_rate: f64,
    pub demand_level: String,
    pub required_skills: Vec<String>,
}

impl TryFrom<CareerInsightRow> for CareerInsight {
    type Error = AppError;

    fn try_from(row: CareerInsightRow) -> Result<Self, Self::Error> {
        let demand_level = DemandLevel::parse(&row.demand_level).ok_or_else(|| {
            unknown_value("demand_level", &row.demand_level, row.id)
        })?;
        Ok(CareerInsight {
            id: row.id,
            title: row.title,
            industry: row.industry,
            salary_min: row.salary_min,
            salary_max: row.salary_max,
            growth_rate: row.growth_rate,
            demand_level,
            required_skills: row.required_skills,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct LearningResourceRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    pub resource_type: String,
    pub provider: String,
    pub skill_tags: Vec<String>,
    pub difficulty: String,
    pub duration_hours: Option<f64>,
    pub price_type: String,
    pub rating: Option<f64>,
    pub is_featured: bool,
}

impl TryFrom<LearningResourceRow> for LearningResource {
    type Error = AppError;

    fn try_from(row: LearningResourceRow) -> Result<Self, Self::Error> {
        let resource_type = ResourceType::parse(&row.resource_type)
            .ok_or_else(|| unknown_value("resource_type", &row.resource_type, row.id))?;
        let difficulty = Difficulty::parse(&row.difficulty)
            .ok_or_else(|| unknown_value("difficulty", &row.difficulty, row.id))?;
        let price_type = PriceType::parse(&row.price_type)
            .ok_or_else(|| unknown_value("price_type", &row.price_type, row.id))?;
        Ok(LearningResource {
            id: row.id,
            title: row.title,
            description: row.description,
            url: row.url,
            resource_type,
            provider: row.provider,
            skill_tags: row.skill_tags,
            difficulty,
            duration_hours: row.duration_hours,
            price_type,
            rating: row.rating,
            is_featured: row.is_featured,
        })
    }
}

fn unknown_value(column: &str, value: &str, id: Uuid) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "Unknown {column} '{value}' on catalog row {id}"
    ))
}
