pub mod matches;
pub mod participant;
pub mod prediction;
pub mod response;
pub mod schema;
pub mod tournament;
