//! Account repository.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use common::AppResult;
use domain::Account;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Accounts for the given ids; missing ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Account>>;

    /// Insert. A taken email yields `Conflict("email")`.
    async fn create(&self, account: Account) -> AppResult<Account>;

    /// Persist name, password hash and `updated_at`.
    async fn update(&self, account: Account) -> AppResult<Account>;
}

pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        queries::find_by_id(&self.db, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        queries::find_by_email(&self.db, email).await
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Account>> {
        queries::find_by_ids(&self.db, ids).await
    }

    async fn create(&self, account: Account) -> AppResult<Account> {
        queries::insert(&self.db, &account).await
    }

    async fn update(&self, account: Account) -> AppResult<Account> {
        queries::update(&self.db, &account).await
    }
}

pub(crate) mod queries {
    use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
    use uuid::Uuid;

    use common::AppResult;
    use domain::Account;

    use crate::infra::repositories::entities::account::{self, ActiveModel, Entity as AccountEntity};
    use crate::infra::repositories::{insert_error, update_error};

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<Account>> {
        AccountEntity::find_by_id(id)
            .one(db)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<Option<Account>> {
        AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(db)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    pub async fn find_by_ids<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> AppResult<Vec<Account>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        AccountEntity::find()
            .filter(account::Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    pub async fn insert<C: ConnectionTrait>(db: &C, account: &Account) -> AppResult<Account> {
        let model = ActiveModel::from(account)
            .insert(db)
            .await
            .map_err(|e| insert_error(e, "email"))?;
        Account::try_from(model)
    }

    pub async fn update<C: ConnectionTrait>(db: &C, account: &Account) -> AppResult<Account> {
        let model = ActiveModel::from(account)
            .update(db)
            .await
            .map_err(|e| update_error(e, "User"))?;
        Account::try_from(model)
    }
}
