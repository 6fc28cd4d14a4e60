//! Point-of-sale domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosType {
    Cafe,
    VendingMachine,
    Bakery,
    Cafeteria,
}

impl PosType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PosType::Cafe => "CAFE",
            PosType::VendingMachine => "VENDING_MACHINE",
            PosType::Bakery => "BAKERY",
            PosType::Cafeteria => "CAFETERIA",
        }
    }
}

impl std::fmt::Display for PosType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PosType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAFE" => Ok(PosType::Cafe),
            "VENDING_MACHINE" => Ok(PosType::VendingMachine),
            "BAKERY" => Ok(PosType::Bakery),
            "CAFETERIA" => Ok(PosType::Cafeteria),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Campus regions a POS can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampusType {
    Altstadt,
    Bergheim,
    Inf,
}

impl CampusType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CampusType::Altstadt => "ALTSTADT",
            CampusType::Bergheim => "BERGHEIM",
            CampusType::Inf => "INF",
        }
    }
}

impl std::fmt::Display for CampusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CampusType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALTSTADT" => Ok(CampusType::Altstadt),
            "BERGHEIM" => Ok(CampusType::Bergheim),
            "INF" => Ok(CampusType::Inf),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown enum value: {0}")]
pub struct UnknownVariant(pub String);

/// A POS that has not been persisted yet: no identity, no timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePos {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub pos_type: PosType,
    pub campus: CampusType,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
}

impl CandidatePos {
    /// Names the first text field that is blank, in declaration order.
    #[must_use]
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("description", &self.description),
            ("street", &self.street),
            ("house_number", &self.house_number),
            ("city", &self.city),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// A persisted POS record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub pos_type: PosType,
    pub campus: CampusType,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pos {
    /// Combine a candidate with the identity and timestamps assigned on save.
    #[must_use]
    pub fn from_candidate(
        id: i64,
        candidate: CandidatePos,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: candidate.name,
            description: candidate.description,
            pos_type: candidate.pos_type,
            campus: candidate.campus,
            street: candidate.street,
            house_number: candidate.house_number,
            postal_code: candidate.postal_code,
            city: candidate.city,
            created_at,
            updated_at,
        }
    }
}
