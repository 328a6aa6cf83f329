//! Startup seeding of the bootstrap administrator.

use focal_core::roles::Role;
use focal_db::models::user::CreateUser;
use focal_db::repositories::UserRepo;
use focal_db::DbPool;

use crate::auth::password::hash_password_async;
use crate::config::AdminSeedConfig;
use crate::error::AppResult;

/// Create the configured admin account unless a user with its email exists.
///
/// Returns `true` when a new account was inserted.
pub async fn seed_admin(pool: &DbPool, admin: &AdminSeedConfig) -> AppResult<bool> {
    if UserRepo::find_by_email(pool, &admin.email).await?.is_some() {
        tracing::debug!(email = %admin.email, "Admin account already present");
        return Ok(false);
    }

    let password_hash = hash_password_async(admin.password.clone()).await?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: admin.name.clone(),
            email: admin.email.clone(),
            password_hash,
            role: Role::Admin,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Admin account created");
    Ok(true)
}
