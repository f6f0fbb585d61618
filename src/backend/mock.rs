use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::backend::{Backend, UserRecord};
use crate::common::debug;
use crate::core::principal::{Principal, Role, SessionToken, Status};
use crate::{CustodiaError, Result};

const MOCK_USERS_FILE: &str = "mock_users.json";

// Seed account for the mock backend, loadable from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Serialize, Deserialize)]
struct Account {
    record: UserRecord,
    // Plaintext by design of the simulation; real credential handling is a
    // backend concern outside this crate.
    password: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct State {
    accounts: Vec<Account>,
    sessions: HashMap<SessionToken, u64>,
    next_id: u64,
}

impl State {
    fn from_seed(seed: Vec<UserEntry>) -> Self {
        let accounts: Vec<Account> = seed
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Account {
                record: UserRecord {
                    id: i as u64 + 1,
                    username: entry.username,
                    email: entry.email,
                    roles: entry.roles,
                    status: entry.status,
                },
                password: entry.password,
            })
            .collect();
        let next_id = accounts.len() as u64 + 1;

        Self {
            accounts,
            sessions: HashMap::new(),
            next_id,
        }
    }

    fn require(&self, token: &SessionToken) -> Result<u64> {
        self.sessions
            .get(token)
            .copied()
            .ok_or(CustodiaError::Unauthenticated)
    }

    fn account_mut(&mut self, user_id: u64) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.record.id == user_id)
            .ok_or(CustodiaError::UserNotFound { id: user_id })
    }
}

// In-memory users table simulating the REST backend, optionally persisted
// to a json file under the profile directory so that sessions issued by
// one process invocation are still valid in the next.
pub struct MockBackend {
    state: Mutex<State>,
    path: Option<PathBuf>,
}

impl MockBackend {
    pub fn new(seed: Vec<UserEntry>) -> Self {
        Self {
            state: Mutex::new(State::from_seed(seed)),
            path: None,
        }
    }

    // The standard simulation accounts, used when no seed is configured.
    pub fn default_users() -> Vec<UserEntry> {
        let entry = |username: &str, email: &str, roles: &[Role]| UserEntry {
            username: username.to_owned(),
            password: "password".to_owned(),
            email: email.to_owned(),
            roles: roles.iter().copied().collect(),
            status: Status::Active,
        };
        vec![
            entry("admin", "admin@facility.gov", &[Role::Admin]),
            entry("doctor", "doctor@facility.gov", &[Role::Medical]),
            entry("personnel", "staff@facility.gov", &[Role::Personnel]),
        ]
    }

    // Open (or seed) a file backed mock under `dir`.
    pub async fn open(dir: impl AsRef<Path>, seed: Vec<UserEntry>) -> Result<Self> {
        let path = dir.as_ref().join(MOCK_USERS_FILE);

        let state = match tokio::fs::read(&path).await {
            Ok(raw) => serde_json::from_slice(&raw)
                .map_err(|err| CustodiaError::Internal(err.to_string()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Seed mock backend state");
                State::from_seed(seed)
            }
            Err(err) => return Err(err.into()),
        };

        let backend = Self {
            state: Mutex::new(state),
            path: Some(path),
        };
        backend.persist(&*backend.state.lock().await).await?;
        Ok(backend)
    }

    // Invalidate a session token without the client's involvement, as an
    // expired token would be. Any later call with that token answers 401.
    pub async fn revoke(&self, token: &SessionToken) {
        let mut state = self.state.lock().await;
        state.sessions.remove(token);
        let _ = self.persist(&state).await;
    }

    async fn persist(&self, state: &State) -> Result<()> {
        if let Some(path) = &self.path {
            let raw = serde_json::to_vec_pretty(state)
                .map_err(|err| CustodiaError::Internal(err.to_string()))?;
            tokio::fs::write(path, raw).await?;
        }
        Ok(())
    }

    fn mint_token() -> SessionToken {
        format!(
            "mock-token-{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn login(&self, username: &str, password: &str) -> Result<Principal> {
        let mut state = self.state.lock().await;

        let record = state
            .accounts
            .iter()
            .find(|account| account.record.username == username && account.password == password)
            .map(|account| account.record.clone())
            .ok_or(CustodiaError::InvalidCredentials)?;

        let token = Self::mint_token();
        state.sessions.insert(token.clone(), record.id);
        self.persist(&state).await?;

        Ok(Principal {
            id: record.id,
            username: record.username,
            email: record.email,
            roles: record.roles,
            status: record.status,
            token,
        })
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<UserRecord> {
        let mut state = self.state.lock().await;

        if state
            .accounts
            .iter()
            .any(|account| account.record.username == username)
        {
            return Err(CustodiaError::UsernameTaken {
                username: username.to_owned(),
            });
        }

        let record = UserRecord {
            id: state.next_id,
            username: username.to_owned(),
            email: email.to_owned(),
            // New accounts await role assignment by an administrator.
            roles: BTreeSet::new(),
            status: Status::Active,
        };
        state.next_id += 1;
        state.accounts.push(Account {
            record: record.clone(),
            password: password.to_owned(),
        });
        self.persist(&state).await?;

        Ok(record)
    }

    async fn logout(&self, token: &SessionToken) -> Result<()> {
        let mut state = self.state.lock().await;
        state.sessions.remove(token);
        self.persist(&state).await
    }

    async fn list_users(&self, token: &SessionToken) -> Result<Vec<UserRecord>> {
        let state = self.state.lock().await;
        state.require(token)?;
        Ok(state
            .accounts
            .iter()
            .map(|account| account.record.clone())
            .collect())
    }

    async fn update_roles(
        &self,
        token: &SessionToken,
        user_id: u64,
        roles: &BTreeSet<Role>,
    ) -> Result<UserRecord> {
        let mut state = self.state.lock().await;
        state.require(token)?;

        let account = state.account_mut(user_id)?;
        account.record.roles = roles.clone();
        let record = account.record.clone();

        self.persist(&state).await?;
        Ok(record)
    }

    async fn update_status(
        &self,
        token: &SessionToken,
        user_id: u64,
        status: Status,
    ) -> Result<UserRecord> {
        let mut state = self.state.lock().await;
        state.require(token)?;

        let account = state.account_mut(user_id)?;
        account.record.status = status;
        let record = account.record.clone();

        self.persist(&state).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MockBackend {
        MockBackend::new(MockBackend::default_users())
    }

    #[test]
    fn login_verifies_credentials() {
        tokio_test::block_on(async move {
            let backend = seeded();

            let principal = backend.login("admin", "password").await.unwrap();
            assert_eq!(principal.username, "admin");
            assert!(principal.roles.contains(&Role::Admin));
            assert!(!principal.token.is_empty());

            let err = backend.login("admin", "wrong").await.unwrap_err();
            assert!(matches!(err, CustodiaError::InvalidCredentials));
        })
    }

    #[test]
    fn register_starts_pending() {
        tokio_test::block_on(async move {
            let backend = seeded();

            let record = backend
                .register("newcomer", "new@facility.gov", "secret")
                .await
                .unwrap();
            assert!(record.is_pending());
            assert_eq!(record.status, Status::Active);

            let err = backend
                .register("admin", "dup@facility.gov", "secret")
                .await
                .unwrap_err();
            assert!(matches!(err, CustodiaError::UsernameTaken { .. }));
        })
    }

    #[test]
    fn revoked_token_answers_unauthenticated() {
        tokio_test::block_on(async move {
            let backend = seeded();
            let principal = backend.login("admin", "password").await.unwrap();

            assert!(backend.list_users(&principal.token).await.is_ok());

            backend.revoke(&principal.token).await;
            let err = backend.list_users(&principal.token).await.unwrap_err();
            assert!(err.is_unauthenticated());
        })
    }

    #[test]
    fn state_survives_reopen() {
        tokio_test::block_on(async move {
            let dir = tempfile::tempdir().unwrap();

            let backend = MockBackend::open(dir.path(), MockBackend::default_users())
                .await
                .unwrap();
            let principal = backend.login("doctor", "password").await.unwrap();
            drop(backend);

            // A fresh process sees the same accounts and live sessions.
            let backend = MockBackend::open(dir.path(), Vec::new()).await.unwrap();
            let users = backend.list_users(&principal.token).await.unwrap();
            assert_eq!(users.len(), 3);
        })
    }
}
