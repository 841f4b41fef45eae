//! Sample catalog used by the in-memory store in development mode.

use uuid::Uuid;

use crate::models::catalog::{
    CareerInsight, DemandLevel, Difficulty, LearningResource, PriceType, ResourceType,
};

pub fn career_insights() -> Vec<CareerInsight> {
    let insights = [
        (
            "Software Developer",
            "Technology",
            (70_000, 140_000),
            22.0,
            DemandLevel::VeryHigh,
            &["JavaScript", "React", "Node.js", "SQL", "Git", "Problem Solving"][..],
        ),
        (
            "Data Scientist",
            "Technology",
            (85_000, 160_000),
            35.0,
            DemandLevel::VeryHigh,
            &["Python", "Machine Learning", "Statistics", "SQL", "Data Analysis"][..],
        ),
        (
            "UX Designer",
            "Design",
            (60_000, 120_000),
            13.0,
            DemandLevel::High,
            &["Figma", "User Research", "Prototyping", "HTML/CSS", "Communication"][..],
        ),
        (
            "Cloud Engineer",
            "Technology",
            (90_000, 165_000),
            25.0,
            DemandLevel::VeryHigh,
            &["AWS", "Docker", "Kubernetes", "Linux", "Python", "Networking"][..],
        ),
        (
            "Cybersecurity Analyst",
            "Technology",
            (75_000, 135_000),
            32.0,
            DemandLevel::VeryHigh,
            &["Networking", "Linux", "Security Fundamentals", "Python", "Incident Response"][..],
        ),
        (
            "Digital Marketing Specialist",
            "Marketing",
            (45_000, 90_000),
            10.0,
            DemandLevel::High,
            &["SEO", "Content Writing", "Data Analysis", "Social Media", "Communication"][..],
        ),
        (
            "Product Manager",
            "Technology",
            (95_000, 170_000),
            10.5,
            DemandLevel::High,
            &["Communication", "Data Analysis", "User Research", "Roadmapping", "SQL"][..],
        ),
        (
            "Financial Analyst",
            "Finance",
            (60_000, 110_000),
            8.0,
            DemandLevel::Medium,
            &["Excel", "Financial Modeling", "Statistics", "SQL", "Communication"][..],
        ),
    ];

    insights
        .into_iter()
        .map(
            |(title, industry, (salary_min, salary_max), growth_rate, demand_level, skills)| {
                CareerInsight {
                    id: Uuid::new_v4(),
                    title: title.to_string(),
                    industry: industry.to_string(),
                    salary_min,
                    salary_max,
                    growth_rate,
                    demand_level,
                    required_skills: skills.iter().map(|s| s.to_string()).collect(),
                }
            },
        )
        .collect()
}

pub fn learning_resources() -> Vec<LearningResource> {
    let resources = [
        (
            "freeCodeCamp JavaScript Algorithms",
            "https://www.freecodecamp.org/learn/javascript-algorithms-and-data-structures/",
            ResourceType::Course,
            "freeCodeCamp",
            &["javascript", "web development"][..],
            Difficulty::Beginner,
            PriceType::Free,
        ),
        (
            "The Odin Project",
            "https://www.theodinproject.com/",
            ResourceType::Course,
            "The Odin Project",
            &["javascript", "html/css", "node.js"][..],
            Difficulty::Beginner,
            PriceType::Free,
        ),
        (
            "React Official Tutorial",
            "https://react.dev/learn",
            ResourceType::Tutorial,
            "Meta",
            &["react", "javascript"][..],
            Difficulty::Intermediate,
            PriceType::Free,
        ),
        (
            "Python for Everybody",
            "https://www.py4e.com/",
            ResourceType::Course,
            "University of Michigan",
            &["python", "data analysis"][..],
            Difficulty::Beginner,
            PriceType::Free,
        ),
        (
            "Machine Learning Specialization",
            "https://www.coursera.org/specializations/machine-learning-introduction",
            ResourceType::Course,
            "Coursera",
            &["machine learning", "python", "statistics"][..],
            Difficulty::Intermediate,
            PriceType::Freemium,
        ),
        (
            "SQLBolt",
            "https://sqlbolt.com/",
            ResourceType::Tutorial,
            "SQLBolt",
            &["sql"][..],
            Difficulty::Beginner,
            PriceType::Free,
        ),
        (
            "Figma Design Basics",
            "https://help.figma.com/",
            ResourceType::Video,
            "Figma",
            &["figma", "prototyping"][..],
            Difficulty::Beginner,
            PriceType::Free,
        ),
        (
            "AWS Cloud Practitioner Essentials",
            "https://aws.amazon.com/training/",
            ResourceType::Course,
            "Amazon Web Services",
            &["aws", "cloud"][..],
            Difficulty::Beginner,
            PriceType::Free,
        ),
        (
            "Kubernetes Up & Running",
            "https://www.oreilly.com/",
            ResourceType::Book,
            "O'Reilly",
            &["kubernetes", "docker"][..],
            Difficulty::Advanced,
            PriceType::Paid,
        ),
        (
            "Google Digital Garage",
            "https://learndigital.withgoogle.com/",
            ResourceType::Course,
            "Google",
            &["seo", "social media", "digital marketing"][..],
            Difficulty::Beginner,
            PriceType::Free,
        ),
    ];

    resources
        .into_iter()
        .enumerate()
        .map(
            |(i, (title, url, resource_type, provider, tags, difficulty, price_type))| {
                LearningResource {
                    id: Uuid::new_v4(),
                    title: title.to_string(),
                    description: format!("{title} by {provider}"),
                    url: url.to_string(),
                    resource_type,
                    provider: provider.to_string(),
                    skill_tags: tags.iter().map(|t| t.to_string()).collect(),
                    difficulty,
                    duration_hours: None,
                    price_type,
                    rating: Some(4.5),
                    is_featured: i < 3,
                }
            },
        )
        .collect()
}
