//! Unit of Work: one entry point for repositories and transactions.
//!
//! Services depend on `U: UnitOfWork` so tests can swap in mocked
//! repositories. Multi-table writes (an employee and its account) go
//! through [`UnitOfWork::transaction`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Account, Employee};

use super::repositories::{
    account_queries, employee_queries, AccountRepository, AccountStore, AttendanceRepository,
    AttendanceStore, DepartmentRepository, DepartmentStore, EmployeeRepository, EmployeeStore,
    LeaveRepository, LeaveStore, SalaryRepository, SalaryStore,
};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn accounts(&self) -> Arc<dyn AccountRepository>;

    fn departments(&self) -> Arc<dyn DepartmentRepository>;

    fn employees(&self) -> Arc<dyn EmployeeRepository>;

    fn attendance(&self) -> Arc<dyn AttendanceRepository>;

    fn leaves(&self) -> Arc<dyn LeaveRepository>;

    fn salaries(&self) -> Arc<dyn SalaryRepository>;

    /// Run `f` in a ReadCommitted transaction: commit on `Ok`, roll back
    /// on `Err`.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn accounts(&self) -> TxAccountRepository<'_> {
        TxAccountRepository { txn: self.txn }
    }

    pub fn employees(&self) -> TxEmployeeRepository<'_> {
        TxEmployeeRepository { txn: self.txn }
    }
}

/// SeaORM-backed Unit of Work.
pub struct Persistence {
    db: DatabaseConnection,
    accounts: Arc<AccountStore>,
    departments: Arc<DepartmentStore>,
    employees: Arc<EmployeeStore>,
    attendance: Arc<AttendanceStore>,
    leaves: Arc<LeaveStore>,
    salaries: Arc<SalaryStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            accounts: Arc::new(AccountStore::new(db.clone())),
            departments: Arc::new(DepartmentStore::new(db.clone())),
            employees: Arc::new(EmployeeStore::new(db.clone())),
            attendance: Arc::new(AttendanceStore::new(db.clone())),
            leaves: Arc::new(LeaveStore::new(db.clone())),
            salaries: Arc::new(SalaryStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.accounts.clone()
    }

    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.departments.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employees.clone()
    }

    fn attendance(&self) -> Arc<dyn AttendanceRepository> {
        self.attendance.clone()
    }

    fn leaves(&self) -> Arc<dyn LeaveRepository> {
        self.leaves.clone()
    }

    fn salaries(&self) -> Arc<dyn SalaryRepository> {
        self.salaries.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let result = f(TransactionContext::new(&txn)).await;

        match result {
            Ok(value) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Account writes inside a transaction.
pub struct TxAccountRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxAccountRepository<'_> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        account_queries::find_by_id(self.txn, id).await
    }

    pub async fn create(&self, account: &Account) -> AppResult<Account> {
        account_queries::insert(self.txn, account).await
    }

    pub async fn update(&self, account: &Account) -> AppResult<Account> {
        account_queries::update(self.txn, account).await
    }
}

/// Employee writes inside a transaction.
pub struct TxEmployeeRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxEmployeeRepository<'_> {
    pub async fn create(&self, employee: &Employee) -> AppResult<Employee> {
        employee_queries::insert(self.txn, employee).await
    }

    pub async fn update(&self, employee: &Employee) -> AppResult<Employee> {
        employee_queries::update(self.txn, employee).await
    }
}

/// Shorthand for running a block inside [`UnitOfWork::transaction`].
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
