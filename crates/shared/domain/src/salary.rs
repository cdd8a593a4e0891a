//! Salary ledger. Records are append-only.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::employee::EmployeeBrief;
use crate::error::{DomainError, DomainResult};

/// Whole-unit money amount as submitted by clients.
///
/// Accepts a JSON integer, a float (truncated) or a numeric string. Strings
/// are read up to the first non-digit, so `"1500.75"` and `"1500abc"` are
/// both 1500.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAmount")]
pub struct Amount(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl TryFrom<RawAmount> for Amount {
    type Error = String;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        match raw {
            RawAmount::Int(value) => Ok(Amount(value)),
            RawAmount::Float(value) if in_i64_range(value) => Ok(Amount(value.trunc() as i64)),
            RawAmount::Float(value) => Err(format!("{} is not a valid amount", value)),
            RawAmount::Text(text) => parse_integer_prefix(&text)
                .map(Amount)
                .ok_or_else(|| format!("'{}' is not a valid amount", text)),
        }
    }
}

/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
fn in_i64_range(value: f64) -> bool {
    value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Leading optional sign and digits of `text`, ignoring leading whitespace.
pub fn parse_integer_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// `basic + allowances - deductions`. The sign is not checked.
pub fn net_salary(basic: i64, allowances: i64, deductions: i64) -> DomainResult<i64> {
    basic
        .checked_add(allowances)
        .and_then(|gross| gross.checked_sub(deductions))
        .ok_or_else(|| DomainError::validation("Salary amounts are out of range"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSalaryRecord {
    pub employee_id: Uuid,
    pub basic_salary: i64,
    pub allowances: i64,
    pub deductions: i64,
    pub pay_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub basic_salary: i64,
    pub allowances: i64,
    pub deductions: i64,
    pub net_salary: i64,
    pub pay_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SalaryRecord {
    pub fn new(input: NewSalaryRecord) -> DomainResult<Self> {
        let net = net_salary(input.basic_salary, input.allowances, input.deductions)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            employee_id: input.employee_id,
            basic_salary: input.basic_salary,
            allowances: input.allowances,
            deductions: input.deductions,
            net_salary: net,
            pay_date: input.pay_date,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SalaryView {
    #[serde(flatten)]
    pub record: SalaryRecord,
    pub employee: Option<EmployeeBrief>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(json: &str) -> Result<Amount, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn negative_net_is_accepted() {
        assert_eq!(net_salary(1000, 200, 1500).unwrap(), -300);
    }

    #[test]
    fn overflow_is_a_validation_error() {
        assert!(net_salary(i64::MAX, 1, 0).is_err());
    }

    #[test]
    fn amounts_accept_numbers_and_numeric_strings() {
        assert_eq!(amount("1200").unwrap(), Amount(1200));
        assert_eq!(amount("1200.9").unwrap(), Amount(1200));
        assert_eq!(amount("\"1500\"").unwrap(), Amount(1500));
        assert_eq!(amount("\" 1500.75\"").unwrap(), Amount(1500));
        assert_eq!(amount("\"-20\"").unwrap(), Amount(-20));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        assert!(amount("\"abc\"").is_err());
        assert!(amount("\"\"").is_err());
        assert!(amount("true").is_err());
    }

    #[test]
    fn out_of_range_amounts_are_rejected() {
        assert!(amount("1e30").is_err());
        assert!(amount("-1e30").is_err());
        assert!(amount("18446744073709551615").is_err());
        assert!(amount("9223372036854775808").is_err());
        assert_eq!(amount("9223372036854775807").unwrap(), Amount(i64::MAX));
    }

    #[test]
    fn record_computes_net_at_creation() {
        let record = SalaryRecord::new(NewSalaryRecord {
            employee_id: Uuid::new_v4(),
            basic_salary: 50_000,
            allowances: 5_000,
            deductions: 2_500,
            pay_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        })
        .unwrap();

        assert_eq!(record.net_salary, 52_500);
    }
}
