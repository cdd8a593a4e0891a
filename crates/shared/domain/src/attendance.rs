//! Attendance ledger entries.
//!
//! One record per (employee, calendar day). `working_hours` is never set
//! directly: it is derived from `time_in`/`time_out` whenever both are
//! present.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::TIME_OF_DAY_FORMAT;
use crate::employee::EmployeeBrief;
use crate::error::{DomainError, DomainResult};
use crate::labels::labelled_enum;

labelled_enum! {
    AttendanceStatus, "attendance status" {
        Present => "Present",
        Absent => "Absent",
        Late => "Late",
        HalfDay => "Half-Day",
        WorkFromHome => "Work from Home",
        OnLeave => "On Leave",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub working_hours: Option<f64>,
    pub remarks: Option<String>,
    /// Account that last marked or edited the record.
    pub marked_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to mark attendance for one employee on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkAttendance {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub remarks: Option<String>,
}

/// Partial edit of an existing record. Absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendancePatch {
    pub status: Option<AttendanceStatus>,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub remarks: Option<String>,
}

impl From<&MarkAttendance> for AttendancePatch {
    fn from(mark: &MarkAttendance) -> Self {
        Self {
            status: Some(mark.status),
            time_in: mark.time_in.clone(),
            time_out: mark.time_out.clone(),
            remarks: mark.remarks.clone(),
        }
    }
}

impl AttendancePatch {
    /// Reject malformed times before anything is written.
    pub fn validate(&self) -> DomainResult<()> {
        for time in [&self.time_in, &self.time_out].into_iter().flatten() {
            parse_time_of_day(time)?;
        }
        Ok(())
    }
}

impl AttendanceRecord {
    pub fn new(mark: &MarkAttendance, marked_by: Uuid) -> DomainResult<Self> {
        let now = Utc::now();
        let mut record = Self {
            id: Uuid::new_v4(),
            employee_id: mark.employee_id,
            date: mark.date,
            status: mark.status,
            time_in: None,
            time_out: None,
            working_hours: None,
            remarks: None,
            marked_by,
            created_at: now,
            updated_at: now,
        };
        record.apply(AttendancePatch::from(mark), marked_by)?;
        Ok(record)
    }

    /// Overwrite the present fields, take `actor` as the marker and
    /// refresh the derived hours.
    pub fn apply(&mut self, patch: AttendancePatch, actor: Uuid) -> DomainResult<()> {
        patch.validate()?;

        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(time_in) = patch.time_in {
            self.time_in = Some(normalize_time_of_day(&time_in)?);
        }
        if let Some(time_out) = patch.time_out {
            self.time_out = Some(normalize_time_of_day(&time_out)?);
        }
        if let Some(remarks) = patch.remarks {
            self.remarks = Some(remarks);
        }
        if let (Some(time_in), Some(time_out)) = (&self.time_in, &self.time_out) {
            self.working_hours = Some(working_hours(time_in, time_out)?);
        }
        self.marked_by = actor;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Split `"HH:MM"` into hours and minutes.
///
/// Hours past 23 are accepted as written, up to 99.
fn split_time_of_day(value: &str) -> DomainResult<(u32, u32)> {
    let invalid = || {
        DomainError::validation(format!(
            "Invalid time '{}', expected {}",
            value, TIME_OF_DAY_FORMAT
        ))
    };

    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;
    if hours > 99 || minutes > 59 {
        return Err(invalid());
    }

    Ok((hours, minutes))
}

/// Parse an `"HH:MM"` value into fractional hours.
pub fn parse_time_of_day(value: &str) -> DomainResult<f64> {
    let (hours, minutes) = split_time_of_day(value)?;
    Ok(f64::from(hours) + f64::from(minutes) / 60.0)
}

/// Canonical `HH:MM` form of a time, e.g. `" 9:5 "` becomes `"09:05"`.
pub fn normalize_time_of_day(value: &str) -> DomainResult<String> {
    let (hours, minutes) = split_time_of_day(value)?;
    Ok(format!("{:02}:{:02}", hours, minutes))
}

/// `time_out - time_in` in hours. Overnight shifts come out negative.
pub fn working_hours(time_in: &str, time_out: &str) -> DomainResult<f64> {
    Ok(parse_time_of_day(time_out)? - parse_time_of_day(time_in)?)
}

/// Result of a mark call: the stored record and whether it was new.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkOutcome {
    pub record: AttendanceRecord,
    pub created: bool,
}

/// Filters for ledger listings. Dates are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceFilter {
    pub employee_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

/// A record joined with display fields. `employee` is `None` when the
/// employee has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AttendanceView {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub employee: Option<EmployeeBrief>,
    pub marked_by_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(time_in: Option<&str>, time_out: Option<&str>) -> MarkAttendance {
        MarkAttendance {
            employee_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            status: AttendanceStatus::Present,
            time_in: time_in.map(String::from),
            time_out: time_out.map(String::from),
            remarks: None,
        }
    }

    #[test]
    fn nine_to_half_five_is_eight_and_a_half_hours() {
        assert_eq!(working_hours("09:00", "17:30").unwrap(), 8.5);
    }

    #[test]
    fn overnight_shift_is_stored_as_computed() {
        assert_eq!(working_hours("22:00", "06:00").unwrap(), -16.0);
    }

    #[test]
    fn malformed_time_is_a_validation_error() {
        assert!(matches!(parse_time_of_day("9am"), Err(DomainError::Validation(_))));
        assert!(parse_time_of_day("09-00").is_err());
        assert!(parse_time_of_day("ab:cd").is_err());
    }

    #[test]
    fn stored_times_are_normalized() {
        let record =
            AttendanceRecord::new(&mark(Some(" 9:5 "), Some("0017:0030")), Uuid::new_v4()).unwrap();

        assert_eq!(record.time_in.as_deref(), Some("09:05"));
        assert_eq!(record.time_out.as_deref(), Some("17:30"));
        assert_eq!(record.working_hours, Some(17.5 - (9.0 + 5.0 / 60.0)));
    }

    #[test]
    fn out_of_range_time_parts_are_rejected() {
        assert!(parse_time_of_day("09:60").is_err());
        assert!(parse_time_of_day("100:00").is_err());
        assert_eq!(normalize_time_of_day("25:00").unwrap(), "25:00");
    }

    #[test]
    fn new_record_derives_hours_only_with_both_times() {
        let actor = Uuid::new_v4();

        let full = AttendanceRecord::new(&mark(Some("09:00"), Some("17:30")), actor).unwrap();
        assert_eq!(full.working_hours, Some(8.5));
        assert_eq!(full.marked_by, actor);

        let half = AttendanceRecord::new(&mark(Some("09:00"), None), actor).unwrap();
        assert_eq!(half.working_hours, None);
    }

    #[test]
    fn patch_with_one_time_recomputes_against_stored_other() {
        let mut record = AttendanceRecord::new(&mark(Some("09:00"), Some("17:00")), Uuid::new_v4()).unwrap();
        let editor = Uuid::new_v4();

        record
            .apply(
                AttendancePatch {
                    time_out: Some("18:30".into()),
                    ..Default::default()
                },
                editor,
            )
            .unwrap();

        assert_eq!(record.working_hours, Some(9.5));
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.marked_by, editor);
    }

    #[test]
    fn invalid_patch_leaves_record_untouched() {
        let mut record = AttendanceRecord::new(&mark(None, None), Uuid::new_v4()).unwrap();
        let before = record.clone();

        let result = record.apply(
            AttendancePatch {
                status: Some(AttendanceStatus::Late),
                time_in: Some("late".into()),
                ..Default::default()
            },
            Uuid::new_v4(),
        );

        assert!(result.is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn status_labels_match_wire_format() {
        let json = serde_json::to_string(&AttendanceStatus::WorkFromHome).unwrap();
        assert_eq!(json, "\"Work from Home\"");
        assert_eq!("Half-Day".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::HalfDay);
    }

    #[test]
    fn view_flattens_record_fields() {
        let record = AttendanceRecord::new(&mark(Some("09:00"), Some("17:30")), Uuid::new_v4()).unwrap();
        let view = AttendanceView {
            record,
            employee: None,
            marked_by_name: Some("Admin".into()),
        };
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["workingHours"], 8.5);
        assert_eq!(json["status"], "Present");
        assert_eq!(json["markedByName"], "Admin");
        assert!(json["employee"].is_null());
    }
}
