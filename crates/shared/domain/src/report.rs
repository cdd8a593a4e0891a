//! Reporting: monthly attendance summaries and the admin dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attendance::{AttendanceRecord, AttendanceStatus, AttendanceView};
use crate::error::{DomainError, DomainResult};
use crate::leave::LeaveStatus;

/// Inclusive `[first, last]` day range of a calendar month.
pub fn month_window(month: u32, year: i32) -> DomainResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::validation("Month must be between 1 and 12"));
    }
    let invalid_year = || DomainError::validation(format!("Invalid year: {}", year));
    if year < 1 {
        return Err(invalid_year());
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid_year)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid_year)?;
    let last = next_first.pred_opt().ok_or_else(invalid_year)?;

    Ok((first, last))
}

/// Per-status day counts over a set of attendance records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total_days: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub half_day: u32,
    pub wfh: u32,
    pub on_leave: u32,
    /// Sum of derived hours; records without both times count as zero.
    pub total_working_hours: f64,
}

impl AttendanceSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut summary, record| {
            summary.total_days += 1;
            match record.status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Late => summary.late += 1,
                AttendanceStatus::HalfDay => summary.half_day += 1,
                AttendanceStatus::WorkFromHome => summary.wfh += 1,
                AttendanceStatus::OnLeave => summary.on_leave += 1,
            }
            summary.total_working_hours += record.working_hours.unwrap_or(0.0);
            summary
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReport {
    pub month: u32,
    pub year: i32,
    pub records: Vec<AttendanceView>,
    pub summary: AttendanceSummary,
}

impl AttendanceReport {
    pub fn new(month: u32, year: i32, records: Vec<AttendanceView>) -> Self {
        let summary = AttendanceSummary::from_records(records.iter().map(|v| &v.record));
        Self {
            month,
            year,
            records,
            summary,
        }
    }
}

/// Leave request counts by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LeaveStats {
    /// Every request ever submitted.
    pub applied: u64,
    pub approved: u64,
    pub pending: u64,
    pub rejected: u64,
}

impl LeaveStats {
    pub fn from_counts(counts: impl IntoIterator<Item = (LeaveStatus, u64)>) -> Self {
        counts.into_iter().fold(Self::default(), |mut stats, (status, count)| {
            stats.applied += count;
            match status {
                LeaveStatus::Pending => stats.pending += count,
                LeaveStatus::Approved => stats.approved += count,
                LeaveStatus::Rejected => stats.rejected += count,
            }
            stats
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_employees: u64,
    pub total_departments: u64,
    /// Sum of every employee's base salary.
    pub monthly_salary: i64,
    pub leaves: LeaveStats,
}
