use crate::engine::activity::ActivityItem;
use crate::engine::grouping::TournamentGroup;
use crate::engine::stats::DashboardStats;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GenericResponse {
    pub status: String,
    pub message: String,
}

impl GenericResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        GenericResponse {
            status: "failed".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub status: String,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn success(data: T) -> Self {
        DataResponse {
            status: "success".to_string(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EligibleMatchesData {
    pub tournaments: Vec<TournamentGroup>,
}

#[derive(Debug, Serialize)]
pub struct ActivityData {
    pub activity: Vec<ActivityItem>,
}

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub stats: DashboardStats,
}
