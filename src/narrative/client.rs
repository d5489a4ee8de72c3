//! Blocking JSON client for the narrative HTTP service.

use std::time::Duration;

use tracing::debug;

use super::types::{
    DialogueRequest, DialogueResponse, EnemyProfile, EnemyRequest, NarrativeService,
};
use crate::core::constants::NARRATIVE_TIMEOUT_SECS;
use crate::error::ServiceError;

/// Talks to `POST {base}/api/generate/dialogue` and `/api/generate/enemy`.
pub struct HttpNarrative {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpNarrative {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(NARRATIVE_TIMEOUT_SECS))
            .user_agent("alexandria")
            .build();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }
}

impl NarrativeService for HttpNarrative {
    fn generate_dialogue(&self, request: &DialogueRequest) -> Result<String, ServiceError> {
        let url = self.endpoint("generate/dialogue");
        debug!(%url, phase = %request.phase, "requesting dialogue");

        let response: DialogueResponse = self.agent.post(&url).send_json(request)?.into_json()?;
        Ok(response.dialogue)
    }

    fn generate_enemy(&self, request: &EnemyRequest) -> Result<EnemyProfile, ServiceError> {
        let url = self.endpoint("generate/enemy");
        debug!(%url, enemy_type = %request.enemy_type, "requesting enemy");

        let profile: EnemyProfile = self.agent.post(&url).send_json(request)?.into_json()?;
        Ok(profile)
    }
}
