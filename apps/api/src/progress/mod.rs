// Plan dashboard: progress tracking, favorites, status changes and deletion.

pub mod handlers;
pub mod service;
pub mod tracker;
