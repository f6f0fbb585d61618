use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::backend::{Backend, UserRecord};
use crate::common::{error, info, warn};
use crate::core::middleware::{Middleware, RequestContext};
use crate::core::principal::{Principal, SessionToken, Status};
use crate::core::uow::AssignRoles;
use crate::core::UnitOfWork;
use crate::store::SessionSlot;
use crate::{CustodiaError, Result};

// Terminal middleware. Executes work against the backend collaborator and
// owns the session mutations: slot writes and the published current
// principal both happen here and nowhere else.
pub(crate) struct Dispatcher {
    backend: Arc<dyn Backend>,
    slot: Arc<dyn SessionSlot>,
    current: watch::Sender<Option<Principal>>,
}

impl Dispatcher {
    pub(crate) fn new(
        backend: Arc<dyn Backend>,
        slot: Arc<dyn SessionSlot>,
        current: watch::Sender<Option<Principal>>,
    ) -> Self {
        Self {
            backend,
            slot,
            current,
        }
    }

    // Translate a backend-reported authentication failure into a forced
    // logout. The session is already gone by the time the caller sees
    // `SessionExpired`, and the binary owns the single user-visible
    // message for it; callers render nothing of their own.
    async fn reconcile<T>(&self, result: Result<T>) -> Result<T> {
        match result {
            Err(err) if err.is_unauthenticated() => {
                self.force_logout().await;
                Err(CustodiaError::SessionExpired)
            }
            other => other,
        }
    }

    async fn force_logout(&self) {
        warn!("Authentication failure reported by backend, clearing session");
        self.current.send_replace(None);
        if let Err(err) = self.slot.clear().await {
            error!(%err, "Clear session slot");
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<Principal> {
        // On failure the slot stays untouched.
        let principal = self.backend.login(username, password).await?;

        self.slot.store(&principal).await?;
        self.current.send_replace(Some(principal.clone()));
        info!(username = %principal.username, "Session established");

        Ok(principal)
    }

    async fn logout(&self, token: Option<&SessionToken>) -> Result<()> {
        // Best-effort backend notification; local clearing never depends
        // on it.
        if let Some(token) = token {
            if let Err(err) = self.backend.logout(token).await {
                warn!(%err, "Backend logout failed");
            }
        }

        self.current.send_replace(None);
        self.slot.clear().await
    }

    async fn assign_roles(&self, token: &SessionToken, request: &AssignRoles) -> Result<UserRecord> {
        let users = self.backend.list_users(token).await?;
        let prior = users
            .iter()
            .find(|user| user.id == request.user_id)
            .ok_or(CustodiaError::UserNotFound {
                id: request.user_id,
            })?;
        let was_pending = prior.is_pending();

        let updated = self
            .backend
            .update_roles(token, request.user_id, &request.roles)
            .await?;

        // Leaving the pending state requires both a role and active
        // status, so the first assignment also activates the account.
        if was_pending && !updated.roles.is_empty() && updated.status != Status::Active {
            return self
                .backend
                .update_status(token, request.user_id, Status::Active)
                .await;
        }

        Ok(updated)
    }
}

#[async_trait]
impl Middleware for Dispatcher {
    async fn apply(&mut self, ctx: RequestContext, uow: UnitOfWork) -> Result<()> {
        match uow {
            UnitOfWork::Login(mut work) => {
                let result = self
                    .login(&work.request.username, &work.request.password)
                    .await;
                work.send_response(result)
            }
            UnitOfWork::Register(mut work) => {
                let result = self
                    .backend
                    .register(
                        &work.request.username,
                        &work.request.email,
                        &work.request.password,
                    )
                    .await;
                work.send_response(result)
            }
            UnitOfWork::Logout(mut work) => {
                let result = self.logout(ctx.token.as_ref()).await;
                work.send_response(result)
            }
            UnitOfWork::ListUsers(mut work) => match &ctx.token {
                None => work.send_response(Err(CustodiaError::Unauthenticated)),
                Some(token) => {
                    let result = self.reconcile(self.backend.list_users(token).await).await;
                    work.send_response(result)
                }
            },
            UnitOfWork::AssignRoles(mut work) => match &ctx.token {
                None => work.send_response(Err(CustodiaError::Unauthenticated)),
                Some(token) => {
                    let result = self.assign_roles(token, &work.request).await;
                    let result = self.reconcile(result).await;
                    work.send_response(result)
                }
            },
            UnitOfWork::SetStatus(mut work) => match &ctx.token {
                None => work.send_response(Err(CustodiaError::Unauthenticated)),
                Some(token) => {
                    let result = self
                        .backend
                        .update_status(token, work.request.user_id, work.request.status)
                        .await;
                    let result = self.reconcile(result).await;
                    work.send_response(result)
                }
            },
        }
    }
}
