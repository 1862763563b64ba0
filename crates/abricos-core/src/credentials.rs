//! Registration and login against accounts kept in a [`KeyValueStore`].
//!
//! The duplicate-email check and the append that follows are two separate
//! store operations. Two hosts sharing one backend can race between them.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::{AbricosError, ValidationError};
use crate::ids::TimeIds;
use crate::models::{LoginForm, RegisterForm, SessionUser, UserAccount};
use crate::storage::{self, KeyValueStore};

/// Key holding the JSON array of every registered account.
pub const USERS_KEY: &str = "users";
/// Key holding the signed-in user's projection.
pub const CURRENT_USER_KEY: &str = "currentUser";

pub const MIN_PASSWORD_LEN: usize = 6;

/// Whitespace as browsers define it for `\s`. Differs from the regex crate's
/// `\s` on U+0085 and U+FEFF.
const WHITESPACE: &str = r"\t\n\x0B\x0C\r \x{00A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let part = format!("[^@{WHITESPACE}]+");
        Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("email pattern is valid")
    })
}

/// `local@domain.tld` shape check; no further address validation.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Account list plus the current-session slot, both persisted in `S`.
pub struct CredentialStore<S> {
    store: S,
    ids: TimeIds,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            ids: TimeIds::new(),
        }
    }

    /// Every registered account, oldest first.
    pub fn users(&self) -> Result<Vec<UserAccount>, AbricosError> {
        Ok(storage::read_json(&self.store, USERS_KEY)?.unwrap_or_default())
    }

    /// Who is signed in, if anyone ever was.
    pub fn current_user(&self) -> Result<Option<SessionUser>, AbricosError> {
        storage::read_json(&self.store, CURRENT_USER_KEY)
    }

    pub fn register(&mut self, form: &RegisterForm) -> Result<UserAccount, AbricosError> {
        self.register_at(form, Utc::now())
    }

    /// Validate `form`, append a new account and sign it in.
    pub fn register_at(
        &mut self,
        form: &RegisterForm,
        now: DateTime<Utc>,
    ) -> Result<UserAccount, AbricosError> {
        if let Err(e) = validate_registration(form) {
            tracing::warn!(reason = %e, "Registration rejected");
            return Err(e.into());
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u.email == form.email) {
            tracing::warn!(email = %form.email, "Registration rejected: email taken");
            return Err(ValidationError::EmailTaken.into());
        }

        let account = UserAccount {
            id: self.ids.next_at(now),
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            created_at: now,
        };
        users.push(account.clone());
        storage::write_json(&mut self.store, USERS_KEY, &users)?;
        self.set_session(&account)?;

        tracing::info!(id = account.id, username = %account.username, "Account registered");
        Ok(account)
    }

    /// Sign in with an exact email and password match.
    pub fn login(&mut self, form: &LoginForm) -> Result<UserAccount, AbricosError> {
        if form.email.is_empty() || form.password.is_empty() {
            tracing::warn!("Login rejected: missing fields");
            return Err(ValidationError::MissingFields.into());
        }

        let account = self
            .users()?
            .into_iter()
            .find(|u| u.email == form.email && u.password == form.password);
        let Some(account) = account else {
            tracing::warn!(email = %form.email, "Login rejected: invalid credentials");
            return Err(ValidationError::InvalidCredentials.into());
        };

        self.set_session(&account)?;
        tracing::info!(id = account.id, username = %account.username, "Signed in");
        Ok(account)
    }

    fn set_session(&mut self, account: &UserAccount) -> Result<(), AbricosError> {
        storage::write_json(
            &mut self.store,
            CURRENT_USER_KEY,
            &SessionUser::from(account),
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Field checks that need no stored state, in the order the form reports them.
pub fn validate_registration(form: &RegisterForm) -> Result<(), ValidationError> {
    if form.username.is_empty()
        || form.email.is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(&form.email) {
        return Err(ValidationError::InvalidEmail);
    }
    // Length in UTF-16 units, the way stored browser accounts were checked.
    if form.password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn form(username: &str, email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    fn alice() -> RegisterForm {
        form("alice", "alice@example.com", "secret1", "secret1")
    }

    fn login(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.into(),
            password: password.into(),
        }
    }

    fn rejection(result: Result<UserAccount, AbricosError>) -> ValidationError {
        result
            .unwrap_err()
            .validation()
            .expect("expected a validation error")
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("user.name@mail.example.org"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("no@tld"));
        assert!(!is_valid_email("two@@at.com"));
        assert!(!is_valid_email("spa ce@x.com"));
    }

    #[test]
    fn test_email_whitespace_follows_browser_rules() {
        assert!(!is_valid_email("a\u{FEFF}b@x.com"));
        assert!(!is_valid_email("a\u{00A0}b@x.com"));
        assert!(!is_valid_email("a@x\u{3000}y.com"));
        assert!(is_valid_email("a\u{0085}b@x.com"));
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        // Three astral characters are six UTF-16 units.
        let emoji = form("kira", "kira@mail.ru", "😀😀😀", "😀😀😀");
        assert_eq!(validate_registration(&emoji), Ok(()));

        let short = form("kira", "kira@mail.ru", "😀😀", "😀😀");
        assert_eq!(
            validate_registration(&short),
            Err(ValidationError::PasswordTooShort)
        );
        let cyrillic = form("kira", "kira@mail.ru", "пароль", "пароль");
        assert_eq!(validate_registration(&cyrillic), Ok(()));
    }

    #[test]
    fn test_register_signs_in() {
        let mut creds = CredentialStore::new(MemoryStore::new());
        assert_eq!(creds.current_user().unwrap(), None);

        let account = creds.register(&alice()).unwrap();
        assert_eq!(account.username, "alice");
        assert_eq!(account.password, "secret1");
        assert_eq!(creds.users().unwrap(), vec![account.clone()]);
        assert_eq!(
            creds.current_user().unwrap(),
            Some(SessionUser::from(&account))
        );
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let mut creds = CredentialStore::new(MemoryStore::new());
        creds.register(&alice()).unwrap();
        assert_eq!(creds.users().unwrap().len(), 1);

        let again = form("alice2", "alice@example.com", "another1", "another1");
        assert_eq!(rejection(creds.register(&again)), ValidationError::EmailTaken);
        assert_eq!(creds.users().unwrap().len(), 1);
    }

    #[test]
    fn test_email_uniqueness_is_case_sensitive() {
        let mut creds = CredentialStore::new(MemoryStore::new());
        creds.register(&alice()).unwrap();
        let upper = form("alice", "Alice@example.com", "secret1", "secret1");
        assert!(creds.register(&upper).is_ok());
        assert_eq!(creds.users().unwrap().len(), 2);
    }

    #[test]
    fn test_registration_validation_order() {
        let mut creds = CredentialStore::new(MemoryStore::new());
        let cases = [
            (form("", "bad", "1", "2"), ValidationError::MissingFields),
            (form("a", "bad", "1", "2"), ValidationError::InvalidEmail),
            (form("a", "a@b.c", "12345", "2"), ValidationError::PasswordTooShort),
            (form("a", "a@b.c", "123456", "1234567"), ValidationError::PasswordMismatch),
        ];
        for (f, expected) in cases {
            assert_eq!(rejection(creds.register(&f)), expected);
        }
        assert!(creds.users().unwrap().is_empty());
        assert_eq!(creds.current_user().unwrap(), None);
    }

    #[test]
    fn test_login() {
        let mut creds = CredentialStore::new(MemoryStore::new());
        let account = creds.register(&alice()).unwrap();

        let signed_in = creds.login(&login("alice@example.com", "secret1")).unwrap();
        assert_eq!(signed_in, account);
    }

    #[test]
    fn test_login_missing_fields() {
        let mut creds = CredentialStore::new(MemoryStore::new());
        assert_eq!(
            rejection(creds.login(&login("", "secret1"))),
            ValidationError::MissingFields
        );
        assert_eq!(
            rejection(creds.login(&login("alice@example.com", ""))),
            ValidationError::MissingFields
        );
    }

    #[test]
    fn test_failed_login_keeps_session() {
        let mut creds = CredentialStore::new(MemoryStore::new());
        let account = creds.register(&alice()).unwrap();
        let before = creds.current_user().unwrap();

        assert_eq!(
            rejection(creds.login(&login("nobody@example.com", "whatever"))),
            ValidationError::InvalidCredentials
        );
        assert_eq!(
            rejection(creds.login(&login("alice@example.com", "wrong-pass"))),
            ValidationError::InvalidCredentials
        );
        assert_eq!(creds.current_user().unwrap(), before);
        assert_eq!(before, Some(SessionUser::from(&account)));
    }

    #[test]
    fn test_login_switches_session() {
        let mut creds = CredentialStore::new(MemoryStore::new());
        let a = creds.register(&alice()).unwrap();
        let b = creds
            .register(&form("bob", "bob@example.com", "hunter22", "hunter22"))
            .unwrap();
        assert_eq!(creds.current_user().unwrap().map(|u| u.id), Some(b.id));

        creds.login(&login("alice@example.com", "secret1")).unwrap();
        assert_eq!(creds.current_user().unwrap().map(|u| u.id), Some(a.id));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_persisted_layout() {
        let mut creds = CredentialStore::new(MemoryStore::new());
        let now = DateTime::parse_from_rfc3339("2024-11-20T10:00:00.000Z")
            .unwrap()
            .with_timezone(&Utc);
        creds.register_at(&alice(), now).unwrap();

        let raw = creds.store().get(USERS_KEY).unwrap().unwrap();
        let users: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let user = &users[0];
        assert_eq!(user["id"], now.timestamp_millis());
        assert_eq!(user["email"], "alice@example.com");
        assert_eq!(user["password"], "secret1");
        assert!(user["createdAt"].as_str().unwrap().starts_with("2024-11-20T10:00:00"));

        let raw = creds.store().get(CURRENT_USER_KEY).unwrap().unwrap();
        let current: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            current,
            serde_json::json!({
                "id": now.timestamp_millis(),
                "username": "alice",
                "email": "alice@example.com",
            })
        );
    }

    #[test]
    fn test_reads_accounts_written_by_browser() {
        let mut store = MemoryStore::new();
        store
            .put(
                USERS_KEY,
                r#"[{"id":1732096800000,"username":"kira","email":"kira@mail.ru",
                    "password":"qwerty1","createdAt":"2024-11-20T10:00:00.000Z"}]"#,
            )
            .unwrap();
        let mut creds = CredentialStore::new(store);
        let account = creds.login(&login("kira@mail.ru", "qwerty1")).unwrap();
        assert_eq!(account.id, 1_732_096_800_000);
    }
}
