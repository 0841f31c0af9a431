//! Timeline event records and their closed vocabularies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of clinical or history event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    ProfileUpdated,
    WeightRecorded,
    Note,
    MedicalVisit,
    MedicationPrescribed,
    Vaccine,
    Deworming,
    FleaTreatment,
    Bath,
    AttachmentAdded,
}

/// Who originated an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorKind {
    OwnerUser,
    DelegateUser,
    ExternalSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Manual,
    Smartpet,
    Integration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventVisibility {
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "shared_with_delegates")]
    SharedWithDelegates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Voided,
}

/// One entry in a pet's clinical timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetEvent {
    pub id: Uuid,
    pub pet_id: Uuid,

    pub kind: EventKind,

    /// When the event happened in the real world.
    pub occurred_at: DateTime<Utc>,
    /// When it entered the system.
    pub recorded_at: DateTime<Utc>,

    pub title: String,
    pub notes: String,

    pub actor: Actor,
    pub source: EventSource,
    pub visibility: EventVisibility,
    pub status: EventStatus,
}

/// Input for recording a new event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub kind: EventKind,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
    pub notes: String,
    /// Defaults to [`EventSource::Manual`] when absent.
    pub source: Option<EventSource>,
    /// Defaults to [`EventVisibility::SharedWithDelegates`] when absent.
    pub visibility: Option<EventVisibility>,
}

/// Filter for timeline listings. Every criterion is optional and they
/// combine conjunctively.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Keep only these kinds; empty means all kinds.
    pub kinds: Vec<EventKind>,
    /// Inclusive lower bound on `occurred_at`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `occurred_at`.
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring match over title and notes.
    pub query: Option<String>,
    /// Maximum number of results; defaults to 50.
    pub limit: Option<usize>,
}
