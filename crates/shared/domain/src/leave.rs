//! Leave requests and their approval workflow.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::employee::EmployeeBrief;
use crate::error::{DomainError, DomainResult};
use crate::labels::labelled_enum;

labelled_enum! {
    LeaveType, "leave type" {
        Sick => "Sick Leave",
        Casual => "Casual Leave",
        Annual => "Annual Leave",
        Maternity => "Maternity Leave",
        Paternity => "Paternity Leave",
    }
}

labelled_enum! {
    LeaveStatus, "leave status" {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
    }
}

/// The only two outcomes an admin can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    Approved,
    Rejected,
}

impl LeaveDecision {
    pub fn status(&self) -> LeaveStatus {
        match self {
            LeaveDecision::Approved => LeaveStatus::Approved,
            LeaveDecision::Rejected => LeaveStatus::Rejected,
        }
    }

    /// Past-tense verb for response messages.
    pub fn verb(&self) -> &'static str {
        match self {
            LeaveDecision::Approved => "approved",
            LeaveDecision::Rejected => "rejected",
        }
    }
}

impl FromStr for LeaveDecision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approved" => Ok(LeaveDecision::Approved),
            "Rejected" => Ok(LeaveDecision::Rejected),
            _ => Err(DomainError::validation(
                "Invalid status. Must be 'Approved' or 'Rejected'",
            )),
        }
    }
}

/// What an employee submits.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveApplication {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

impl LeaveApplication {
    /// Date order is checked first so a reversed range is reported even
    /// when other input is also wrong.
    pub fn validate(&self) -> DomainResult<()> {
        if self.end_date < self.start_date {
            return Err(DomainError::validation("End date must be after start date"));
        }
        if self.reason.trim().is_empty() {
            return Err(DomainError::validation("All fields are required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    pub applied_at: DateTime<Utc>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    pub fn pending(employee_id: Uuid, application: LeaveApplication) -> DomainResult<Self> {
        application.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            employee_id,
            leave_type: application.leave_type,
            start_date: application.start_date,
            end_date: application.end_date,
            reason: application.reason,
            status: LeaveStatus::Pending,
            applied_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
        })
    }

    pub fn is_decided(&self) -> bool {
        self.status != LeaveStatus::Pending
    }

    /// Record a decision. Deciding again overwrites the previous outcome.
    pub fn decide(&mut self, decision: LeaveDecision, reviewer: Uuid) {
        self.status = decision.status();
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(Utc::now());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LeaveView {
    #[serde(flatten)]
    pub request: LeaveRequest,
    pub employee: Option<EmployeeBrief>,
}
