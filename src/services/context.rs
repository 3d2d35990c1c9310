use uuid::Uuid;

use crate::middleware::SessionUser;

/// Identity of the caller, threaded explicitly through every service call.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
}

impl From<&SessionUser> for RequestContext {
    fn from(session: &SessionUser) -> Self {
        Self {
            user_id: session.0.id,
        }
    }
}
