use serde::{Deserialize, Serialize};

use crate::assets::read_asset;
use crate::error::{Result, ThumpError};
use crate::grading::Grade;
use crate::zone::Zone;

/// Immutable definition of a timed zone challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub benefit: String,
    pub target_zone: Zone,
    /// Seconds in the target zone needed for an A
    pub goal_duration: f64,
    /// Wall-clock length of an attempt in seconds
    pub total_duration: f64,
}

impl ChallengeDef {
    /// Check `0 < goal_duration <= total_duration`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| ThumpError::InvalidChallenge {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if !self.goal_duration.is_finite() || self.goal_duration <= 0.0 {
            return Err(invalid("goal duration must be positive"));
        }
        if !self.total_duration.is_finite() || self.goal_duration > self.total_duration {
            return Err(invalid("goal duration exceeds total duration"));
        }
        Ok(())
    }
}

/// Per-attempt progress against a challenge
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChallengeProgress {
    pub elapsed_time: f64,
    pub time_in_zone: f64,
    pub completed: bool,
    pub grade: Option<Grade>,
}

/// Static list of available challenges
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ChallengeCatalog {
    challenges: Vec<ChallengeDef>,
}

impl ChallengeCatalog {
    /// Load the bundled catalog
    pub fn bundled() -> Result<Self> {
        Self::from_json(read_asset("challenges.json")?)
    }

    /// Parse and validate a catalog; one bad definition rejects the whole list.
    pub fn from_json(json: &str) -> Result<Self> {
        let challenges: Vec<ChallengeDef> = serde_json::from_str(json)?;
        Self::new(challenges)
    }

    pub fn new(challenges: Vec<ChallengeDef>) -> Result<Self> {
        for challenge in &challenges {
            challenge.validate()?;
        }
        Ok(Self { challenges })
    }

    pub fn get(&self, id: &str) -> Option<&ChallengeDef> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChallengeDef> {
        self.challenges.iter()
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    pub fn as_slice(&self) -> &[ChallengeDef] {
        &self.challenges
    }
}

#[cfg(test)]
pub(crate) fn test_challenge(target_zone: Zone, goal: f64, total: f64) -> ChallengeDef {
    ChallengeDef {
        id: "test".to_string(),
        name: "Test".to_string(),
        description: String::new(),
        benefit: String::new(),
        target_zone,
        goal_duration: goal,
        total_duration: total,
    }
}
