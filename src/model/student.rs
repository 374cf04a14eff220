use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Asha Rahman",
        "roll_number": "CS-042",
        "registration_date": "2024-03-01T09:15:00"
    })
)]
pub struct Student {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Asha Rahman")]
    pub name: String,

    /// External identifier, unique across all students
    #[schema(example = "CS-042")]
    pub roll_number: String,

    #[schema(
        example = "2024-03-01T09:15:00",
        value_type = String,
        format = "date-time"
    )]
    pub registration_date: NaiveDateTime,
}
