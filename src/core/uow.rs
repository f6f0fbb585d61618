use std::collections::BTreeSet;
use std::fmt;

use tokio::sync::oneshot;

use crate::backend::UserRecord;
use crate::core::principal::{Principal, Role, Status};
use crate::{CustodiaError, Result};

// Session mutations and backend calls, serialized through the session
// core's single writer loop and applied via the middleware chain.
pub(crate) enum UnitOfWork {
    Login(Work<Login, Principal>),
    Register(Work<Register, UserRecord>),
    Logout(Work<(), ()>),
    ListUsers(Work<(), Vec<UserRecord>>),
    AssignRoles(Work<AssignRoles, UserRecord>),
    SetStatus(Work<SetStatus, UserRecord>),
}

pub(crate) struct Login {
    pub(crate) username: String,
    pub(crate) password: String,
}

pub(crate) struct Register {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

pub(crate) struct AssignRoles {
    pub(crate) user_id: u64,
    pub(crate) roles: BTreeSet<Role>,
}

pub(crate) struct SetStatus {
    pub(crate) user_id: u64,
    pub(crate) status: Status,
}

pub(crate) struct Work<Req, Res> {
    pub(crate) request: Req,
    // Wrap with option so that response can be sent via mut reference.
    pub(crate) response_sender: Option<oneshot::Sender<Result<Res>>>,
}

impl<Req, Res> Work<Req, Res> {
    pub(crate) fn send_response(&mut self, response: Result<Res>) -> Result<()> {
        self.response_sender
            .take()
            .expect("response already sent")
            .send(response)
            .map_err(|_| CustodiaError::Internal("send response".to_owned()))
    }
}

fn work<Req, Res>(request: Req) -> (Work<Req, Res>, oneshot::Receiver<Result<Res>>) {
    let (tx, rx) = oneshot::channel();
    (
        Work {
            request,
            response_sender: Some(tx),
        },
        rx,
    )
}

impl UnitOfWork {
    pub(crate) fn new_login(
        username: String,
        password: String,
    ) -> (UnitOfWork, oneshot::Receiver<Result<Principal>>) {
        let (w, rx) = work(Login { username, password });
        (UnitOfWork::Login(w), rx)
    }

    pub(crate) fn new_register(
        username: String,
        email: String,
        password: String,
    ) -> (UnitOfWork, oneshot::Receiver<Result<UserRecord>>) {
        let (w, rx) = work(Register {
            username,
            email,
            password,
        });
        (UnitOfWork::Register(w), rx)
    }

    pub(crate) fn new_logout() -> (UnitOfWork, oneshot::Receiver<Result<()>>) {
        let (w, rx) = work(());
        (UnitOfWork::Logout(w), rx)
    }

    pub(crate) fn new_list_users() -> (UnitOfWork, oneshot::Receiver<Result<Vec<UserRecord>>>) {
        let (w, rx) = work(());
        (UnitOfWork::ListUsers(w), rx)
    }

    pub(crate) fn new_assign_roles(
        user_id: u64,
        roles: BTreeSet<Role>,
    ) -> (UnitOfWork, oneshot::Receiver<Result<UserRecord>>) {
        let (w, rx) = work(AssignRoles { user_id, roles });
        (UnitOfWork::AssignRoles(w), rx)
    }

    pub(crate) fn new_set_status(
        user_id: u64,
        status: Status,
    ) -> (UnitOfWork, oneshot::Receiver<Result<UserRecord>>) {
        let (w, rx) = work(SetStatus { user_id, status });
        (UnitOfWork::SetStatus(w), rx)
    }
}

impl fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            // Credentials never reach the log.
            UnitOfWork::Login(login) => write!(f, "Login {}", login.request.username),
            UnitOfWork::Register(register) => write!(f, "Register {}", register.request.username),
            UnitOfWork::Logout(_) => write!(f, "Logout"),
            UnitOfWork::ListUsers(_) => write!(f, "ListUsers"),
            UnitOfWork::AssignRoles(assign) => write!(
                f,
                "AssignRoles user_id={} roles={:?}",
                assign.request.user_id, assign.request.roles
            ),
            UnitOfWork::SetStatus(set) => write!(
                f,
                "SetStatus user_id={} status={}",
                set.request.user_id, set.request.status
            ),
        }
    }
}
