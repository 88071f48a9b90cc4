//! Start-up seeding of accounts from `config.toml`.
//!
//! Each `[[users]]` entry is matched by email. Missing users are created; a
//! configured session token is registered, or has its expiry pushed forward
//! when it already exists. Running the seed twice changes nothing but expiries.

use crate::{
    config::{AppConfig, UserSeed},
    core::session,
    entities::{Session, session as session_entity, user},
    errors::Result,
};
use chrono::{Duration, Utc};
use sea_orm::{Set, prelude::*};
use tracing::{debug, info, warn};

/// Ensures every configured user (and its session token) exists.
///
/// Returns the number of users created.
pub async fn seed_users(db: &DatabaseConnection, config: &AppConfig) -> Result<usize> {
    info!(
        "Seeding accounts. Found {} user entries in config.",
        config.users.len()
    );

    let ttl = Duration::days(config.session.ttl_days);
    let mut created = 0;

    for entry in &config.users {
        let (user, is_new) = ensure_user(db, entry).await?;
        if is_new {
            created += 1;
        }

        if let Some(token) = entry.session_token.as_deref() {
            ensure_session(db, &user, token, ttl).await?;
        }
    }

    info!(created, "Account seeding finished");
    Ok(created)
}

async fn ensure_user(db: &DatabaseConnection, entry: &UserSeed) -> Result<(user::Model, bool)> {
    if let Some(existing) = session::find_user_by_email(db, &entry.email).await? {
        debug!(email = %entry.email, "User already present");
        return Ok((existing, false));
    }

    let user = session::create_user(db, Some(entry.email.clone()), entry.name.clone()).await?;
    Ok((user, true))
}

async fn ensure_session(
    db: &DatabaseConnection,
    user: &user::Model,
    token: &str,
    ttl: Duration,
) -> Result<()> {
    let Some(existing) = Session::find_by_id(token.to_string()).one(db).await? else {
        session::create_session_with_token(db, &user.id, token.to_string(), ttl).await?;
        info!(user_id = %user.id, "Registered configured session");
        return Ok(());
    };

    if existing.user_id != user.id {
        warn!(
            user_id = %user.id,
            "Configured session token already belongs to another user. Skipping."
        );
        return Ok(());
    }

    let mut active_model: session_entity::ActiveModel = existing.into();
    active_model.expires = Set(Utc::now() + ttl);
    active_model.update(db).await?;
    debug!(user_id = %user.id, "Refreshed configured session");
    Ok(())
}
