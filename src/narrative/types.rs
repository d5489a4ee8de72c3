use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueRequest {
    pub context: String,
    pub character_name: String,
    pub phase: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueResponse {
    pub dialogue: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyRequest {
    pub enemy_type: String,
    pub phase: String,
}

/// Enemy flavour and stats as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub name: String,
    pub description: String,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
}

/// Source of generated narrative content.
pub trait NarrativeService {
    fn generate_dialogue(&self, request: &DialogueRequest) -> Result<String, ServiceError>;

    fn generate_enemy(&self, request: &EnemyRequest) -> Result<EnemyProfile, ServiceError>;
}

/// A service that is never reachable; every call takes the local fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNarrative;

impl NarrativeService for OfflineNarrative {
    fn generate_dialogue(&self, _request: &DialogueRequest) -> Result<String, ServiceError> {
        Err(ServiceError::Unavailable)
    }

    fn generate_enemy(&self, _request: &EnemyRequest) -> Result<EnemyProfile, ServiceError> {
        Err(ServiceError::Unavailable)
    }
}
