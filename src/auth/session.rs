use crate::models::{Session, SessionUser, Token};

/// Projects a token onto the session handed to the rest of the application.
///
/// Returns a new session whose user fields come from the token when both
/// a user slot and a token are present; otherwise the session unchanged.
pub fn materialize(session: Session, token: Option<&Token>) -> Session {
    match token {
        Some(token) if session.user.is_some() => Session {
            user: Some(SessionUser {
                id: token.id.clone(),
                name: token.name.clone(),
                email: token.email.clone(),
                image: token.picture.clone(),
            }),
            ..session
        },
        _ => session,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn expires() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    fn token() -> Token {
        Token {
            id: Some("42".to_string()),
            name: Some("A".to_string()),
            email: Some("a@x.com".to_string()),
            picture: Some("p.png".to_string()),
        }
    }

    #[test]
    fn test_token_fields_overwrite_session_user() {
        let session = Session::new(Some(SessionUser::default()), expires());
        let materialized = materialize(session.clone(), Some(&token()));

        assert_eq!(
            materialized.user,
            Some(SessionUser {
                id: Some("42".to_string()),
                name: Some("A".to_string()),
                email: Some("a@x.com".to_string()),
                image: Some("p.png".to_string()),
            })
        );
        assert_eq!(materialized.expires, session.expires);
    }

    #[test]
    fn test_session_without_user_is_unchanged() {
        let session = Session::new(None, expires());
        let materialized = materialize(session.clone(), Some(&token()));
        assert_eq!(materialized, session);
    }

    #[test]
    fn test_missing_token_leaves_session_unchanged() {
        let user = SessionUser {
            name: Some("Profile".to_string()),
            ..SessionUser::default()
        };
        let session = Session::new(Some(user), expires());
        let materialized = materialize(session.clone(), None);
        assert_eq!(materialized, session);
    }

    #[test]
    fn test_expires_is_rfc3339() {
        let session = Session::new(None, expires());
        assert_eq!(session.expires, "2030-01-01T00:00:00.000Z");
    }
}
