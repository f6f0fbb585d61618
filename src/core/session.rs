use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::{oneshot, watch};

use crate::backend::{Backend, UserRecord};
use crate::common::{error, info};
use crate::core::middleware::{Dispatcher, MiddlewareChain, RequestContext};
use crate::core::principal::{Principal, Role, Status};
use crate::core::UnitOfWork;
use crate::store::SessionSlot;
use crate::{CustodiaError, Result};

pub struct Builder {
    slot: Option<Arc<dyn SessionSlot>>,
    backend: Option<Arc<dyn Backend>>,
    request_channel_buffer: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            slot: None,
            backend: None,
            request_channel_buffer: 1024,
        }
    }

    pub fn slot(mut self, slot: Arc<dyn SessionSlot>) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub async fn build(self) -> Result<(SessionCore, SessionHandle, Resolver)> {
        let slot = self
            .slot
            .ok_or_else(|| CustodiaError::Internal("session slot not configured".to_owned()))?;
        let backend = self
            .backend
            .ok_or_else(|| CustodiaError::Internal("backend not configured".to_owned()))?;

        // A session persisted by a previous invocation survives the
        // restart; expiry is only discovered reactively via the backend.
        let initial = slot.load().await?;
        let (current_send, current_recv) = watch::channel(initial);

        let (request_send, request_recv) = mpsc::channel(self.request_channel_buffer);

        let dispatcher = Dispatcher::new(backend, slot, current_send);
        let middlewares = MiddlewareChain::new(dispatcher);

        Ok((
            SessionCore {
                request_recv,
                current: current_recv.clone(),
                middlewares,
            },
            SessionHandle { request_send },
            Resolver {
                current: current_recv,
            },
        ))
    }
}

// Single writer over the session state. All mutations funnel through its
// request channel, so readers always observe the latest committed value
// and no locking is needed anywhere else.
pub struct SessionCore {
    request_recv: Receiver<UnitOfWork>,
    current: watch::Receiver<Option<Principal>>,
    middlewares: MiddlewareChain,
}

impl SessionCore {
    pub async fn run(mut self) {
        info!("Session core running");

        while let Some(request) = self.request_recv.recv().await {
            let acting = self.current.borrow().clone();
            let ctx = RequestContext::new(acting);

            if let Err(err) = self.middlewares.apply(ctx, request).await {
                error!("Handle request {}", err);
            }
        }
    }
}

// Pure read of the current principal. Never blocks, never fails; safe to
// call from any rendering context.
#[derive(Clone)]
pub struct Resolver {
    current: watch::Receiver<Option<Principal>>,
}

impl Resolver {
    pub fn current(&self) -> Option<Principal> {
        self.current.borrow().clone()
    }
}

// Cloneable entry point for session mutations and backend calls.
#[derive(Clone)]
pub struct SessionHandle {
    request_send: Sender<UnitOfWork>,
}

impl SessionHandle {
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Principal> {
        let (uow, rx) = UnitOfWork::new_login(username.into(), password.into());
        self.submit(uow, rx).await
    }

    pub async fn register(
        &self,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<UserRecord> {
        let (uow, rx) = UnitOfWork::new_register(username.into(), email.into(), password.into());
        self.submit(uow, rx).await
    }

    pub async fn logout(&self) -> Result<()> {
        let (uow, rx) = UnitOfWork::new_logout();
        self.submit(uow, rx).await
    }

    pub async fn users(&self) -> Result<Vec<UserRecord>> {
        let (uow, rx) = UnitOfWork::new_list_users();
        self.submit(uow, rx).await
    }

    pub async fn assign_roles(&self, user_id: u64, roles: BTreeSet<Role>) -> Result<UserRecord> {
        let (uow, rx) = UnitOfWork::new_assign_roles(user_id, roles);
        self.submit(uow, rx).await
    }

    pub async fn set_status(&self, user_id: u64, status: Status) -> Result<UserRecord> {
        let (uow, rx) = UnitOfWork::new_set_status(user_id, status);
        self.submit(uow, rx).await
    }

    async fn submit<Res>(
        &self,
        uow: UnitOfWork,
        rx: oneshot::Receiver<Result<Res>>,
    ) -> Result<Res> {
        self.request_send
            .send(uow)
            .await
            .map_err(|_| CustodiaError::Internal("session core unavailable".to_owned()))?;

        rx.await
            .map_err(|_| CustodiaError::Internal("response channel closed".to_owned()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::store::MemorySlot;

    // Both constructors must yield a working request channel.
    #[test]
    fn default_builder_is_usable() {
        tokio_test::block_on(async move {
            let (core, handle, resolver) = Builder::default()
                .slot(Arc::new(MemorySlot::new()))
                .backend(Arc::new(MockBackend::new(MockBackend::default_users())))
                .build()
                .await
                .unwrap();
            tokio::spawn(core.run());

            let principal = handle.login("admin", "password").await.unwrap();
            assert_eq!(principal.username, "admin");
            assert_eq!(resolver.current().unwrap().username, "admin");
        })
    }
}
