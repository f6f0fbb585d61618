mod mock;
pub use mock::{MockBackend, UserEntry};

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::principal::{Principal, Role, SessionToken, Status};
use crate::Result;

// Backend side account record. The session token never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    pub status: Status,
}

impl UserRecord {
    // Accounts without roles await administrative assignment.
    pub fn is_pending(&self) -> bool {
        self.roles.is_empty()
    }
}

// The collaborating backend behind a stable seam. The core never assumes
// whether the implementation is a local store or a network service.
//
// Every authenticated operation may answer `Unauthenticated` at any time;
// the dispatcher translates that into a forced logout regardless of which
// feature issued the call.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Principal>;
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<UserRecord>;
    async fn logout(&self, token: &SessionToken) -> Result<()>;
    async fn list_users(&self, token: &SessionToken) -> Result<Vec<UserRecord>>;
    async fn update_roles(
        &self,
        token: &SessionToken,
        user_id: u64,
        roles: &BTreeSet<Role>,
    ) -> Result<UserRecord>;
    async fn update_status(
        &self,
        token: &SessionToken,
        user_id: u64,
        status: Status,
    ) -> Result<UserRecord>;
}
