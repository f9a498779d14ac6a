use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::model::schema::participants)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    pub total_points: Option<i32>,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(tournament_id: Uuid, user_id: Uuid) -> Self {
        Participant {
            id: Uuid::new_v4(),
            tournament_id,
            user_id,
            total_points: Some(0),
            joined_at: Utc::now(),
        }
    }
}
