use ccdb_core::{CampusType, Pos, PosType};
use chrono::{DateTime, Utc};

use crate::DbError;

/// A row from the `pos` table. Enum columns are stored as their
/// `SCREAMING_SNAKE_CASE` names.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PosRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub pos_type: String,
    pub campus: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(super) const POS_COLUMNS: &str = "id, name, description, pos_type, campus, street, \
     house_number, postal_code, city, created_at, updated_at";

impl TryFrom<PosRow> for Pos {
    type Error = DbError;

    fn try_from(row: PosRow) -> Result<Self, Self::Error> {
        let pos_type = row
            .pos_type
            .parse::<PosType>()
            .map_err(|e| DbError::InvalidRow(format!("pos {}: {e}", row.id)))?;
        let campus = row
            .campus
            .parse::<CampusType>()
            .map_err(|e| DbError::InvalidRow(format!("pos {}: {e}", row.id)))?;

        Ok(Pos {
            id: row.id,
            name: row.name,
            description: row.description,
            pos_type,
            campus,
            street: row.street,
            house_number: row.house_number,
            postal_code: row.postal_code,
            city: row.city,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
