pub mod analytics;
pub mod catalog;
pub mod plan;
pub mod profile;
