//! Identity resolution
//!
//! Maps an authenticated principal to a stable user row, lazily creating or
//! patching it from auth metadata the first time it is seen. Idempotent:
//! repeated calls never create duplicates and never erase populated names.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::domains::identity::jwt::AuthPrincipal;
use crate::domains::identity::models::UserRecord;

/// Derive (first_name, last_name) from the principal's metadata, in order:
/// explicit given/family fields, whitespace-split full name, `.`-split email
/// local part, whole local part as first name.
pub fn derive_names(principal: &AuthPrincipal) -> (Option<String>, Option<String>) {
    let mut first = principal
        .given_name
        .clone()
        .filter(|name| !name.trim().is_empty());
    let mut last = principal
        .family_name
        .clone()
        .filter(|name| !name.trim().is_empty());

    if (first.is_none() || last.is_none()) && principal.full_name.is_some() {
        let full = principal.full_name.as_deref().unwrap_or_default();
        let mut parts = full.split_whitespace();
        if let Some(head) = parts.next() {
            if first.is_none() {
                first = Some(head.to_string());
            }
            let rest = parts.collect::<Vec<_>>().join(" ");
            if last.is_none() && !rest.is_empty() {
                last = Some(rest);
            }
        }
    }

    if first.is_none() {
        let local = principal.email.split('@').next().unwrap_or_default();
        if !local.is_empty() {
            match local.split_once('.') {
                Some((head, rest)) if !rest.is_empty() => {
                    first = Some(head.to_string());
                    if last.is_none() {
                        last = Some(rest.replace('.', " "));
                    }
                }
                _ => first = Some(local.to_string()),
            }
        }
    }

    (first, last)
}

/// Ensure a user row exists for the principal and return it.
///
/// Lookup order: by id, then by email (a row pre-created under a different
/// id gets re-keyed), then insert with derived names.
pub async fn ensure_user_record(principal: &AuthPrincipal, pool: &PgPool) -> Result<UserRecord> {
    let (first_name, last_name) = derive_names(principal);

    if let Some(existing) = UserRecord::find_by_id(principal.id, pool).await? {
        if existing.first_name.as_deref().unwrap_or("").is_empty()
            || existing.last_name.as_deref().unwrap_or("").is_empty()
        {
            return UserRecord::patch_names(existing.id, first_name, last_name, pool).await;
        }
        return Ok(existing);
    }

    if let Some(by_email) = UserRecord::find_by_email(&principal.email, pool).await? {
        info!(user_id = %principal.id, "Re-keying user row found by email");
        let rekeyed = UserRecord::rekey(by_email.id, principal.id, pool).await?;
        return UserRecord::patch_names(rekeyed.id, first_name, last_name, pool).await;
    }

    info!(user_id = %principal.id, "Creating user row for new principal");
    UserRecord::create(principal.id, &principal.email, first_name, last_name, pool).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserId;

    fn principal(
        email: &str,
        given: Option<&str>,
        family: Option<&str>,
        full: Option<&str>,
    ) -> AuthPrincipal {
        AuthPrincipal {
            id: UserId::new(),
            email: email.to_string(),
            given_name: given.map(String::from),
            family_name: family.map(String::from),
            full_name: full.map(String::from),
        }
    }

    #[test]
    fn test_explicit_metadata_wins() {
        let p = principal("x@example.com", Some("Jane"), Some("Doe"), Some("Ignored Name"));
        assert_eq!(
            derive_names(&p),
            (Some("Jane".to_string()), Some("Doe".to_string()))
        );
    }

    #[test]
    fn test_full_name_split() {
        let p = principal("x@example.com", None, None, Some("Jane van der Doe"));
        assert_eq!(
            derive_names(&p),
            (Some("Jane".to_string()), Some("van der Doe".to_string()))
        );
    }

    #[test]
    fn test_single_word_full_name() {
        let p = principal("x@example.com", None, None, Some("Cher"));
        let (first, last) = derive_names(&p);
        assert_eq!(first.as_deref(), Some("Cher"));
        // A single-word full name leaves last_name unset
        assert_eq!(last, None);
    }

    #[test]
    fn test_dotted_email_local_part() {
        let p = principal("jane.doe@example.com", None, None, None);
        assert_eq!(
            derive_names(&p),
            (Some("jane".to_string()), Some("doe".to_string()))
        );
    }

    #[test]
    fn test_plain_email_local_part() {
        let p = principal("janedoe@example.com", None, None, None);
        assert_eq!(derive_names(&p), (Some("janedoe".to_string()), None));
    }

    #[test]
    fn test_partial_metadata_completed_from_full_name() {
        let p = principal("x@example.com", Some("Jane"), None, Some("Jane Doe"));
        assert_eq!(
            derive_names(&p),
            (Some("Jane".to_string()), Some("Doe".to_string()))
        );
    }
}
