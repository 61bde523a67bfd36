use crate::session::{Session, SessionGateway};
use crate::store::RecordStore;
use std::sync::Arc;

/// A matched identity provider and document store.
///
/// Document-store access is always on behalf of a signed-in session, so the
/// store is obtained per session rather than shared globally.
pub trait Backend: Send + Sync {
    /// The identity provider.
    fn sessions(&self) -> Arc<dyn SessionGateway>;

    /// A record store authorized as `session`.
    fn records(&self, session: &Session) -> Arc<dyn RecordStore>;
}
