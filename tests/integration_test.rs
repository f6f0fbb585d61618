use std::sync::Arc;

use custodia::backend::MockBackend;
use custodia::config::{Config, Initializer};
use custodia::core::guard::{self, Decision, Page};
use custodia::core::{redirect, Builder, PendingWatcher};
use custodia::store::MemorySlot;
use custodia::{CustodiaError, Role, Status};

mod common;

#[test]
fn session_lifecycle() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    tokio_test::block_on(async move {
        let root_dir = common::temp_dir();

        let mut initializer = Initializer::from_config(Config::default());
        initializer.set_root_dir(root_dir.path());
        initializer.init_dir().await.unwrap();

        let (handle, resolver) = initializer.run_session().await.unwrap();

        // Anonymous: gated paths bounce to login, home is the login page.
        assert!(resolver.current().is_none());
        assert_eq!(
            guard::decide(resolver.current().as_ref(), "/planning"),
            Some(Decision::Redirect(Page::Login))
        );
        assert_eq!(redirect::home(resolver.current().as_ref()).path(), "/login");

        // Failed login leaves the session untouched.
        let err = handle.login("admin", "wrong").await.unwrap_err();
        assert!(matches!(err, CustodiaError::InvalidCredentials));
        assert!(resolver.current().is_none());

        // Admin login.
        let admin = handle.login("admin", "password").await.unwrap();
        assert!(admin.has_role(Role::Admin));
        let current = resolver.current().unwrap();
        assert_eq!(current.username, "admin");
        assert_eq!(
            redirect::home(Some(&current)).path(),
            "/admin-dashboard"
        );
        assert_eq!(
            guard::decide(Some(&current), "/admin-dashboard"),
            Some(Decision::Render)
        );

        // Register a pending account, then activate it via role assignment.
        let newcomer = handle
            .register("newcomer", "new@facility.gov", "secret")
            .await
            .unwrap();
        assert!(newcomer.is_pending());

        let updated = handle
            .assign_roles(newcomer.id, [Role::Personnel].into_iter().collect())
            .await
            .unwrap();
        assert!(updated.roles.contains(&Role::Personnel));
        assert_eq!(updated.status, Status::Active);

        // The assignee can now log in and lands on their dashboard.
        handle.logout().await.unwrap();
        assert!(resolver.current().is_none());

        let staff = handle.login("newcomer", "secret").await.unwrap();
        assert_eq!(
            redirect::home(Some(&staff)).path(),
            "/personnel-dashboard"
        );

        // Logout twice; the second is a no-op.
        handle.logout().await.unwrap();
        handle.logout().await.unwrap();
        assert!(resolver.current().is_none());
    });
}

#[test]
fn session_survives_restart() {
    tokio_test::block_on(async move {
        let root_dir = common::temp_dir();

        let mut initializer = Initializer::from_config(Config::default());
        initializer.set_root_dir(root_dir.path());
        initializer.init_dir().await.unwrap();
        let (handle, _resolver) = initializer.run_session().await.unwrap();

        handle.login("doctor", "password").await.unwrap();

        // Second invocation over the same profile directory.
        let mut initializer = Initializer::from_config(Config::default());
        initializer.set_root_dir(root_dir.path());
        initializer.init_dir().await.unwrap();
        let (handle, resolver) = initializer.run_session().await.unwrap();

        let current = resolver.current().unwrap();
        assert_eq!(current.username, "doctor");
        assert_eq!(redirect::home(Some(&current)).path(), "/medical-dashboard");

        // The restored principal still drives the admin gate.
        let err = handle.users().await.unwrap_err();
        assert!(matches!(err, CustodiaError::AdministrativeActionDenied));
    });
}

#[test]
fn non_admin_cannot_administrate() {
    tokio_test::block_on(async move {
        let root_dir = common::temp_dir();

        let mut initializer = Initializer::from_config(Config::default());
        initializer.set_root_dir(root_dir.path());
        initializer.init_dir().await.unwrap();
        let (handle, resolver) = initializer.run_session().await.unwrap();

        handle.login("personnel", "password").await.unwrap();

        let err = handle.users().await.unwrap_err();
        assert!(matches!(err, CustodiaError::AdministrativeActionDenied));

        let err = handle
            .assign_roles(1, [Role::Personnel].into_iter().collect())
            .await
            .unwrap_err();
        assert!(matches!(err, CustodiaError::AdministrativeActionDenied));

        let err = handle.set_status(1, Status::Suspended).await.unwrap_err();
        assert!(matches!(err, CustodiaError::AdministrativeActionDenied));

        // The denial must not have touched the session.
        assert_eq!(resolver.current().unwrap().username, "personnel");

        // Nothing was mutated: the admin account still works unchanged.
        handle.logout().await.unwrap();
        let admin = handle.login("admin", "password").await.unwrap();
        assert!(admin.has_role(Role::Admin));
        assert_eq!(admin.status, Status::Active);
    });
}

#[test]
fn expired_token_forces_logout() {
    tokio_test::block_on(async move {
        let backend = Arc::new(MockBackend::new(MockBackend::default_users()));
        let slot = Arc::new(MemorySlot::new());

        let (core, handle, resolver) = Builder::new()
            .slot(slot)
            .backend(backend.clone())
            .build()
            .await
            .unwrap();
        tokio::spawn(core.run());

        let admin = handle.login("admin", "password").await.unwrap();
        assert!(handle.users().await.is_ok());

        // The backend invalidates the token behind the client's back.
        backend.revoke(&admin.token).await;

        let err = handle.users().await.unwrap_err();
        assert!(err.is_session_expired());

        // The stale session was cleared as a side effect.
        assert!(resolver.current().is_none());
        assert_eq!(
            redirect::home(resolver.current().as_ref()).path(),
            "/login"
        );
    });
}

#[test]
fn pending_watcher_counts_and_cancels() {
    tokio_test::block_on(async move {
        let backend = Arc::new(MockBackend::new(MockBackend::default_users()));
        let slot = Arc::new(MemorySlot::new());

        let (core, handle, _resolver) = Builder::new()
            .slot(slot)
            .backend(backend)
            .build()
            .await
            .unwrap();
        tokio::spawn(core.run());

        handle.login("admin", "password").await.unwrap();
        handle
            .register("newcomer", "new@facility.gov", "secret")
            .await
            .unwrap();

        let mut watcher =
            PendingWatcher::spawn(handle.clone(), tokio::time::Duration::from_millis(10));

        watcher.changed().await;
        assert_eq!(watcher.pending_count(), 1);

        watcher.cancel();
    });
}
