use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Basic profile of a pet registered in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub owner_user_id: Uuid,

    pub name: String,
    /// dog, cat, etc. Free text for now.
    pub species: String,
    pub breed: String,
    /// male/female/unknown. Free text for now.
    pub sex: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    pub microchip: String,

    pub notes: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a new pet.
#[derive(Debug, Clone, Default)]
pub struct NewPet {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub sex: String,
    pub birth_date: Option<NaiveDate>,
    pub microchip: String,
    pub notes: String,
}

/// PATCH-style profile update: `None` means "leave unchanged".
///
/// `birth_date` carries one more level: `Some(None)` is an explicit null that
/// clears the stored date, distinct from `None` (absent, keep as is).
#[derive(Debug, Clone, Default)]
pub struct PetProfilePatch {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub microchip: Option<String>,
    pub notes: Option<String>,
    pub birth_date: Option<Option<NaiveDate>>,
}
