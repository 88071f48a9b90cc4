//! Accounts and sessions.
//!
//! A session token is an opaque random string. Whoever presents a live token acts
//! as its user; every other module receives that user's ID explicitly.

use crate::{
    entities::{Session, User, session, user},
    errors::{Error, Result},
};
use chrono::{Duration, Utc};
use sea_orm::{Set, prelude::*};
use tracing::{info, warn};
use uuid::Uuid;

/// Creates a user with a fresh random ID.
pub async fn create_user(
    db: &DatabaseConnection,
    email: Option<String>,
    name: Option<String>,
) -> Result<user::Model> {
    let user = user::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name),
        email: Set(email),
        email_verified: Set(None),
        image: Set(None),
    };

    let result = user.insert(db).await?;
    info!(user_id = %result.id, "Created user");
    Ok(result)
}

/// Looks a user up by sign-in email.
pub async fn find_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers `token` as a session for `user_id`, valid for `ttl`.
pub async fn create_session_with_token(
    db: &DatabaseConnection,
    user_id: &str,
    token: String,
    ttl: Duration,
) -> Result<session::Model> {
    let session = session::ActiveModel {
        session_token: Set(token),
        user_id: Set(user_id.to_string()),
        expires: Set(Utc::now() + ttl),
    };

    session.insert(db).await.map_err(Into::into)
}

/// Opens a session with a random token.
pub async fn create_session(
    db: &DatabaseConnection,
    user_id: &str,
    ttl: Duration,
) -> Result<session::Model> {
    create_session_with_token(db, user_id, Uuid::new_v4().simple().to_string(), ttl).await
}

/// Returns the user behind a live session token.
///
/// # Errors
/// - [`Error::Unauthorized`] if the token is unknown
/// - [`Error::SessionExpired`] if it has expired (the session is removed)
pub async fn resolve_session(db: &DatabaseConnection, token: &str) -> Result<user::Model> {
    let Some((session, user)) = Session::find_by_id(token.to_string())
        .find_also_related(User)
        .one(db)
        .await?
    else {
        warn!("Rejected unknown session token");
        return Err(Error::Unauthorized);
    };

    if session.expires <= Utc::now() {
        warn!(user_id = %session.user_id, "Rejected expired session");
        Session::delete_by_id(session.session_token).exec(db).await?;
        return Err(Error::SessionExpired);
    }

    user.ok_or(Error::Unauthorized)
}

/// Ends a session. Unknown tokens are ignored.
pub async fn delete_session(db: &DatabaseConnection, token: &str) -> Result<()> {
    let result = Session::delete_by_id(token.to_string()).exec(db).await?;
    if result.rows_affected > 0 {
        info!("Session ended");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_resolve_live_session() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "owner@example.com").await?;
        let session = create_session(&db, &user.id, Duration::days(1)).await?;

        let resolved = resolve_session(&db, &session.session_token).await?;
        assert_eq!(resolved.id, user.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() -> Result<()> {
        let db = setup_test_db().await?;
        let result = resolve_session(&db, "nope").await;
        assert!(matches!(result, Err(Error::Unauthorized)));
        Ok(())
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_removed() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "owner@example.com").await?;
        create_session_with_token(&db, &user.id, "old".to_string(), Duration::hours(-1)).await?;

        let result = resolve_session(&db, "old").await;
        assert!(matches!(result, Err(Error::SessionExpired)));

        // Second attempt no longer finds it at all
        let result = resolve_session(&db, "old").await;
        assert!(matches!(result, Err(Error::Unauthorized)));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_session() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "owner@example.com").await?;
        let session = create_session(&db, &user.id, Duration::days(1)).await?;

        delete_session(&db, &session.session_token).await?;
        let result = resolve_session(&db, &session.session_token).await;
        assert!(matches!(result, Err(Error::Unauthorized)));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_user_by_email() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "owner@example.com").await?;

        let found = find_user_by_email(&db, "owner@example.com").await?;
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(find_user_by_email(&db, "other@example.com").await?.is_none());
        Ok(())
    }
}
