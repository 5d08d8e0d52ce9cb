use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TagRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: String,
}
