use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::assets::read_asset;
use crate::error::{Result, ThumpError};
use crate::grading::Grade;

/// Coaching text shown alongside a grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeInsight {
    pub title: String,
    pub feedback: String,
    pub improvement: String,
    pub impact: String,
}

/// Read-only catalog keyed by letter grade; every letter has an entry.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct GradeInsights {
    entries: HashMap<Grade, GradeInsight>,
}

impl GradeInsights {
    /// Load the bundled catalog
    pub fn bundled() -> Result<Self> {
        Self::from_json(read_asset("grade_insights.json")?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<Grade, GradeInsight> = serde_json::from_str(json)?;
        if let Some(missing) = Grade::ALL.iter().find(|g| !entries.contains_key(g)) {
            return Err(ThumpError::MissingAsset(format!(
                "grade insight for {missing}"
            )));
        }
        Ok(Self { entries })
    }

    pub fn get(&self, grade: Grade) -> &GradeInsight {
        // from_json rejects catalogs without every letter
        &self.entries[&grade]
    }
}
