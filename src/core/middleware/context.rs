use crate::core::principal::{Principal, SessionToken};

// Per unit-of-work context threaded through the middleware chain.
//
// The token starts empty; the decorator middleware is the single place
// that copies it out of the acting principal. The dispatcher consumes
// only `token`, so call sites can never attach credentials themselves.
pub(crate) struct RequestContext {
    pub(crate) acting: Option<Principal>,
    pub(crate) token: Option<SessionToken>,
}

impl RequestContext {
    pub(crate) fn new(acting: Option<Principal>) -> Self {
        Self {
            acting,
            token: None,
        }
    }
}
