use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{AuthUser, Token};
use crate::store::UserStore;

/// Produces the canonical token to persist, refreshing it from the stored
/// user record whenever one exists.
pub struct IdentityReconciler {
    store: Arc<dyn UserStore>,
}

impl IdentityReconciler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        IdentityReconciler { store }
    }

    /// Runs on every token refresh.
    ///
    /// - a stored record replaces the token wholesale;
    /// - without one, a fresh sign-in only contributes its id;
    /// - a failed lookup is returned as an error, never read as "no record".
    pub async fn reconcile(&self, token: Token, fresh_user: Option<&AuthUser>) -> Result<Token> {
        let record = match token.id.as_deref() {
            Some(id) => match self.store.get_user(id).await {
                Ok(record) => record,
                Err(e) => {
                    warn!(
                        store = self.store.get_name(),
                        user_id = id,
                        "user record lookup failed: {}",
                        e
                    );
                    return Err(e);
                }
            },
            None => None,
        };

        match record {
            Some(record) => {
                debug!(user_id = record.id.as_str(), "token replaced from stored record");
                Ok(Token::from_record(&record))
            }
            None => match fresh_user {
                Some(user) => {
                    info!(user_id = user.id.as_str(), "first sign-in, assigning id to token");
                    Ok(Token {
                        id: Some(user.id.clone()),
                        ..token
                    })
                }
                None => Ok(token),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::StoredUserRecord;
    use crate::store::memory_store::MemoryStore;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl UserStore for FailingStore {
        fn get_name(&self) -> &str {
            "failing"
        }

        async fn get_user(&self, _id: &str) -> Result<Option<StoredUserRecord>> {
            Err(Error::Store("Service Unavailable".to_string()))
        }
    }

    fn record_42() -> StoredUserRecord {
        StoredUserRecord {
            id: "42".to_string(),
            name: Some("Stored Name".to_string()),
            email: Some("stored@x.com".to_string()),
            image: Some("stored.png".to_string()),
        }
    }

    fn stale_token(id: Option<&str>) -> Token {
        Token {
            id: id.map(str::to_string),
            name: Some("Stale".to_string()),
            email: Some("stale@x.com".to_string()),
            picture: Some("stale.png".to_string()),
        }
    }

    fn reconciler(records: Vec<StoredUserRecord>) -> IdentityReconciler {
        IdentityReconciler::new(Arc::new(MemoryStore::new(records)))
    }

    #[tokio::test]
    async fn test_stored_record_replaces_token() {
        let reconciler = reconciler(vec![record_42()]);
        let fresh = AuthUser::new("someone-else");

        let token = reconciler
            .reconcile(stale_token(Some("42")), Some(&fresh))
            .await
            .unwrap();

        assert_eq!(
            token,
            Token {
                id: Some("42".to_string()),
                name: Some("Stored Name".to_string()),
                email: Some("stored@x.com".to_string()),
                picture: Some("stored.png".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_stored_record_without_image_clears_picture() {
        let mut record = record_42();
        record.image = None;
        let reconciler = reconciler(vec![record]);

        let token = reconciler
            .reconcile(stale_token(Some("42")), None)
            .await
            .unwrap();
        assert_eq!(token.picture, None);
    }

    #[tokio::test]
    async fn test_first_sign_in_assigns_fresh_id() {
        let reconciler = reconciler(vec![]);
        let fresh = AuthUser::new("u1");

        let token = reconciler
            .reconcile(stale_token(None), Some(&fresh))
            .await
            .unwrap();

        assert_eq!(token.id.as_deref(), Some("u1"));
        assert_eq!(token.name.as_deref(), Some("Stale"));
        assert_eq!(token.email.as_deref(), Some("stale@x.com"));
        assert_eq!(token.picture.as_deref(), Some("stale.png"));
    }

    #[tokio::test]
    async fn test_no_record_no_fresh_user_is_identity() {
        let reconciler = reconciler(vec![]);
        let input = stale_token(Some("unknown"));

        let token = reconciler.reconcile(input.clone(), None).await.unwrap();
        assert_eq!(token, input);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let reconciler = IdentityReconciler::new(Arc::new(FailingStore));
        let fresh = AuthUser::new("u1");

        let result = reconciler
            .reconcile(stale_token(Some("42")), Some(&fresh))
            .await;
        assert!(matches!(result, Err(Error::Store(_))));
    }
}
