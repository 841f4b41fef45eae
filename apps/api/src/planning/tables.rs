//! Static lookup data for the plan pipeline. Extend the tables, not the code.

/// Hand-written descriptions for well-known career titles (exact title match).
pub const CAREER_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "Software Developer",
        "Design, build and maintain applications and systems that solve real-world problems.",
    ),
    (
        "Data Scientist",
        "Turn raw data into insight using statistics, machine learning and clear storytelling.",
    ),
    (
        "UX Designer",
        "Shape how people experience digital products through research, prototyping and testing.",
    ),
    (
        "Digital Marketing Specialist",
        "Grow brands online with content, search, social media and data-driven campaigns.",
    ),
    (
        "Cloud Engineer",
        "Build and operate scalable infrastructure on modern cloud platforms.",
    ),
    (
        "Cybersecurity Analyst",
        "Protect organisations by detecting threats, hardening systems and responding to incidents.",
    ),
    (
        "Product Manager",
        "Guide products from idea to launch by aligning users, business goals and engineering.",
    ),
    (
        "Financial Analyst",
        "Evaluate financial data to guide investment, budgeting and strategic decisions.",
    ),
];

/// Typical time needed to become productive in a skill (exact skill-name match).
pub const TIME_TO_LEARN: &[(&str, &str)] = &[
    ("JavaScript", "3-6 months"),
    ("Python", "2-4 months"),
    ("React", "2-3 months"),
    ("Node.js", "2-3 months"),
    ("SQL", "1-2 months"),
    ("HTML/CSS", "1-2 months"),
    ("Machine Learning", "6-12 months"),
    ("Statistics", "3-6 months"),
    ("Data Analysis", "3-6 months"),
    ("Figma", "1-2 months"),
    ("User Research", "2-4 months"),
    ("AWS", "3-6 months"),
    ("Docker", "1-2 months"),
    ("Kubernetes", "3-6 months"),
    ("Networking", "3-6 months"),
    ("SEO", "2-3 months"),
    ("Excel", "1-2 months"),
    ("Communication", "Ongoing"),
];

pub const DEFAULT_TIME_TO_LEARN: &str = "2-4 months";

/// Every aggregated skill is currently ranked the same.
pub const DEFAULT_IMPORTANCE: &str = "High";

/// Placeholder resource suffixes used when no learning resource matches a skill.
pub const PLACEHOLDER_RESOURCE_SUFFIXES: &[&str] = &["Tutorial", "Documentation", "Course"];

// ────────────────────────────────────────────────────────────────────────────
// Four-week roadmap template
// ────────────────────────────────────────────────────────────────────────────

pub const FOUNDATION_FOCUS: &str = "Foundation Building";
pub const CORE_SKILLS_FOCUS: &str = "Core Skills";
pub const ADVANCED_FOCUS: &str = "Advanced Concepts";
pub const PORTFOLIO_FOCUS: &str = "Portfolio & Practice";

pub const FOUNDATION_TASKS: &[&str] = &[
    "Set up your development environment and learning tools",
    "Complete introductory tutorials in your chosen field",
    "Join online communities and forums related to your career path",
    "Create a consistent weekly study schedule",
];

/// `{skill}` is replaced with the week's focus skill.
pub const CORE_SKILL_TASKS: &[&str] = &[
    "Study {skill} fundamentals and core concepts",
    "Complete hands-on {skill} exercises",
    "Build a small project using {skill}",
    "Document what you learned about {skill}",
];

pub const ADVANCED_SKILL_TASKS: &[&str] = &[
    "Explore advanced {skill} techniques",
    "Build an intermediate project that combines {skill} with your other skills",
    "Contribute to an open-source or community project using {skill}",
    "Get feedback on your {skill} work from peers or mentors",
];

pub const PORTFOLIO_TASKS: &[&str] = &[
    "Complete a portfolio project showcasing your new skills",
    "Apply for internships or entry-level positions",
    "Network with professionals in your target field",
    "Plan your next learning phase",
];

/// Used for weeks 2 and 3 when there is no aggregated skill to pull resources from.
pub const FALLBACK_WEEK_RESOURCES: &[&str] = &[
    "Online Tutorials",
    "Official Documentation",
    "Practice Projects",
];

pub const PORTFOLIO_RESOURCES: &[&str] = &[
    "GitHub Portfolio Guide",
    "LinkedIn Profile Optimization",
    "Industry Meetups",
    "Career Fairs",
];

/// Looks up a value in one of the `(key, value)` tables above.
pub fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
