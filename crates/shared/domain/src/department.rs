//! Department entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields changed by `PUT /department/:id`. Absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Department {
    pub fn new(name: String, description: Option<String>) -> DomainResult<Self> {
        let name = require_name(name)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            description,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, patch: DepartmentPatch) -> DomainResult<()> {
        if let Some(name) = patch.name {
            self.name = require_name(name)?;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn require_name(name: String) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Department name is required"));
    }
    Ok(trimmed.to_string())
}
