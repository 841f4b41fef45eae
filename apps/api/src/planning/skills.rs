//! Skill Aggregator: picks the skills shared most across the chosen careers
//! and attaches a learning-time estimate and resource pointers to each.

use std::collections::HashMap;

use crate::models::catalog::LearningResource;
use crate::models::plan::{CareerRecommendation, SkillRecommendation};
use crate::planning::tables::{
    lookup, DEFAULT_IMPORTANCE, DEFAULT_TIME_TO_LEARN, PLACEHOLDER_RESOURCE_SUFFIXES,
    TIME_TO_LEARN,
};

pub const MAX_SKILLS: usize = 3;
pub const MAX_RESOURCES_PER_SKILL: usize = 3;

/// Builds up to three skill recommendations from the matcher's picks.
pub fn aggregate_skills(
    recommendations: &[CareerRecommendation],
    resources: &[LearningResource],
) -> Vec<SkillRecommendation> {
    rank_skills(recommendations)
        .into_iter()
        .map(|skill| SkillRecommendation {
            importance: DEFAULT_IMPORTANCE.to_string(),
            time_to_learn: time_to_learn(&skill).to_string(),
            resources: resources_for(&skill, resources),
            skill,
        })
        .collect()
}

/// The most frequent required skills (case-sensitive), ties broken by first appearance.
pub fn rank_skills(recommendations: &[CareerRecommendation]) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for skill in recommendations.iter().flat_map(|r| r.required_skills.iter()) {
        match index.get(skill.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(skill.as_str(), counts.len());
                counts.push((skill.as_str(), 1));
            }
        }
    }

    // stable: first-seen order survives among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_SKILLS)
        .map(|(skill, _)| skill.to_string())
        .collect()
}

pub fn time_to_learn(skill: &str) -> &'static str {
    lookup(TIME_TO_LEARN, skill).unwrap_or(DEFAULT_TIME_TO_LEARN)
}

/// Titles of the first resources whose tags overlap the skill name (either way,
/// case-insensitive). Falls back to generic placeholder titles.
pub fn resources_for(skill: &str, resources: &[LearningResource]) -> Vec<String> {
    let skill_lower = skill.to_lowercase();
    let matched: Vec<String> = resources
        .iter()
        .filter(|r| {
            r.skill_tags.iter().any(|tag| {
                let tag = tag.to_lowercase();
                !tag.is_empty() && (tag.contains(&skill_lower) || skill_lower.contains(&tag))
            })
        })
        .take(MAX_RESOURCES_PER_SKILL)
        .map(|r| r.title.clone())
        .collect();

    if matched.is_empty() {
        PLACEHOLDER_RESOURCE_SUFFIXES
            .iter()
            .map(|suffix| format!("{skill} {suffix}"))
            .collect()
    } else {
        matched
    }
}
