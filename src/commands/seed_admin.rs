//! Seed-admin command - Bootstrap the first admin account.

use common::AppResult;
use domain::{Account, Password, Role};

use crate::cli::args::SeedAdminArgs;
use crate::config::Config;
use crate::infra::{Database, Persistence, UnitOfWork};

/// Execute the seed-admin command
pub async fn execute(args: SeedAdminArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;
    let uow = Persistence::new(db.get_connection());

    seed(&uow, args).await
}

async fn seed<U: UnitOfWork>(uow: &U, args: SeedAdminArgs) -> AppResult<()> {
    let hash = Password::new(&args.password)?.into_string();
    let accounts = uow.accounts();

    match accounts.find_by_email(&args.email).await? {
        Some(mut existing) => {
            if !existing.role.is_admin() {
                tracing::warn!(email = %args.email, role = %existing.role, "Account exists but is not an admin");
            }
            existing.set_password_hash(hash);
            accounts.update(existing).await?;
            tracing::info!(email = %args.email, "Admin password reset");
        }
        None => {
            let admin = accounts
                .create(Account::new(args.name, args.email, hash, Role::Admin))
                .await?;
            tracing::info!(account_id = %admin.id, email = %admin.email, "Admin account created");
        }
    }

    Ok(())
}
