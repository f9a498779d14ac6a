use serde::Serialize;

/// Dashboard counters. Each comes from its own query and they may overlap:
/// an admin who also joined their tournament counts as organizer and member.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub organized_count: i64,
    pub joined_count: i64,
    pub matches_with_predictions: i64,
    pub total_points: i64,
}

impl DashboardStats {
    pub fn new(
        organized_count: i64,
        joined_count: i64,
        matches_with_predictions: i64,
        points_sum: Option<i64>,
    ) -> Self {
        DashboardStats {
            organized_count,
            joined_count,
            matches_with_predictions,
            total_points: points_sum.unwrap_or(0),
        }
    }
}
