//! Employee directory: links an account to organizational attributes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::{Account, Role};
use crate::department::Department;
use crate::labels::labelled_enum;

labelled_enum! {
    Gender, "gender" {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

labelled_enum! {
    MaritalStatus, "marital status" {
        Single => "Single",
        Married => "Married",
        Divorced => "Divorced",
        Widowed => "Widowed",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: Uuid,
    pub account_id: Uuid,
    /// Company-assigned code, also accepted as a login identifier.
    pub employee_code: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub designation: Option<String>,
    pub department_id: Uuid,
    pub salary: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to onboard an employee: the account and the
/// directory entry are created together.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub employee_code: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub designation: Option<String>,
    pub department_id: Uuid,
    pub salary: i64,
}

impl Employee {
    pub fn new(account_id: Uuid, input: &NewEmployee) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            employee_code: input.employee_code.clone(),
            dob: input.dob,
            gender: input.gender,
            marital_status: input.marital_status,
            designation: input.designation.clone(),
            department_id: input.department_id,
            salary: input.salary,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the directory part of a patch. `name` belongs to the account
    /// and is handled by the caller.
    pub fn apply(&mut self, patch: &EmployeePatch) {
        if let Some(status) = patch.marital_status {
            self.marital_status = Some(status);
        }
        if let Some(designation) = &patch.designation {
            self.designation = Some(designation.clone());
        }
        if let Some(department_id) = patch.department_id {
            self.department_id = department_id;
        }
        if let Some(salary) = patch.salary {
            self.salary = salary;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields changed by `PUT /employee/:id`. Absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub designation: Option<String>,
    pub department_id: Option<Uuid>,
    pub salary: Option<i64>,
}

/// Display fields joined onto ledger rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBrief {
    pub id: Uuid,
    pub employee_code: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

impl EmployeeBrief {
    pub fn new(
        employee: &Employee,
        account: Option<&Account>,
        department: Option<&Department>,
    ) -> Self {
        Self {
            id: employee.id,
            employee_code: employee.employee_code.clone(),
            name: account.map(|a| a.name.clone()),
            email: account.map(|a| a.email.clone()),
            department: department.map(|d| d.name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRef {
    pub id: Uuid,
    pub name: String,
}

/// Full employee view: directory entry joined with its account and
/// department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub employee_code: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub designation: Option<String>,
    pub department: Option<DepartmentRef>,
    pub salary: i64,
    pub created_at: DateTime<Utc>,
}

impl EmployeeProfile {
    pub fn new(
        employee: Employee,
        account: Option<&Account>,
        department: Option<&Department>,
    ) -> Self {
        Self {
            id: employee.id,
            account_id: employee.account_id,
            employee_code: employee.employee_code,
            name: account.map(|a| a.name.clone()),
            email: account.map(|a| a.email.clone()),
            role: account.map(|a| a.role),
            dob: employee.dob,
            gender: employee.gender,
            marital_status: employee.marital_status,
            designation: employee.designation,
            department: department.map(|d| DepartmentRef {
                id: d.id,
                name: d.name.clone(),
            }),
            salary: employee.salary,
            created_at: employee.created_at,
        }
    }
}
