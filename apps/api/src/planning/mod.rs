// Career matching and plan synthesis.
// Pipeline: matcher → skills (aggregator) → roadmap (four-week builder),
// sequenced by the orchestrator. Everything except the orchestrator is pure.

pub mod handlers;
pub mod matcher;
pub mod orchestrator;
pub mod roadmap;
pub mod skills;
pub mod tables;
