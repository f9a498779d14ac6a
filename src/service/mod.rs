pub mod dashboard;
pub mod membership;
pub mod tracker;
