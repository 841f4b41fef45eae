//! User profile submission and its validating constructor.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const MAX_NAME_CHARS: usize = 120;
const MAX_INTERESTS: usize = 20;
const MAX_FREE_TEXT_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    Diploma,
    Bachelors,
    Masters,
    Phd,
    Other,
}

impl EducationLevel {
    pub const ACCEPTED: &'static [&'static str] =
        &["high_school", "diploma", "bachelors", "masters", "phd", "other"];

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "high_school",
            EducationLevel::Diploma => "diploma",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::Masters => "masters",
            EducationLevel::Phd => "phd",
            EducationLevel::Other => "other",
        }
    }

    /// Case-insensitive; spaces and hyphens count as underscores.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "high_school" => Some(EducationLevel::HighSchool),
            "diploma" => Some(EducationLevel::Diploma),
            "bachelors" => Some(EducationLevel::Bachelors),
            "masters" => Some(EducationLevel::Masters),
            "phd" => Some(EducationLevel::Phd),
            "other" => Some(EducationLevel::Other),
            _ => None,
        }
    }
}

/// Raw profile payload as posted by the client (typed or transcribed from voice).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSubmission {
    // Missing fields deserialize empty so the validator reports them.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub education_level: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub goals: String,
}

/// A validated user profile. Build it from a [`ProfileSubmission`] via `TryFrom`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub education_level: EducationLevel,
    pub interests: Vec<String>,
    pub experience: String,
    pub goals: String,
}

impl TryFrom<ProfileSubmission> for UserProfile {
    type Error = AppError;

    fn try_from(submission: ProfileSubmission) -> Result<Self, Self::Error> {
        let name = submission.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(AppError::Validation(format!(
                "name must be at most {MAX_NAME_CHARS} characters"
            )));
        }

        let education_level =
            EducationLevel::parse(&submission.education_level).ok_or_else(|| {
                AppError::Validation(format!(
                    "educationLevel must be one of: {}",
                    EducationLevel::ACCEPTED.join(", ")
                ))
            })?;

        // Blank interests would substring-match every title and skill.
        let interests: Vec<String> = submission
            .interests
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .map(str::to_string)
            .collect();
        if interests.len() > MAX_INTERESTS {
            return Err(AppError::Validation(format!(
                "at most {MAX_INTERESTS} interests are accepted"
            )));
        }

        let experience = submission.experience.trim().to_string();
        let goals = submission.goals.trim().to_string();
        for (field, text) in [("experience", &experience), ("goals", &goals)] {
            if text.chars().count() > MAX_FREE_TEXT_CHARS {
                return Err(AppError::Validation(format!(
                    "{field} must be at most {MAX_FREE_TEXT_CHARS} characters"
                )));
            }
        }

        Ok(UserProfile {
            name,
            education_level,
            interests,
            experience,
            goals,
        })
    }
}
