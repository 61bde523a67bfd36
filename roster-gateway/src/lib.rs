//! Gateways between Roster and its external providers.
//!
//! Everything above this crate talks to two narrow capabilities:
//! - [`SessionGateway`]: email/password sign-in and sign-out against an identity provider
//! - [`RecordStore`]: list/create/update/delete of untyped documents in a named collection
//!
//! Two implementations of each are provided: Firebase (Auth + Cloud Firestore over
//! REST) in [`firebase`], and process-local doubles in [`memory`]. A [`Backend`]
//! bundles a matching pair so callers can bind a record store to a signed-in session.

pub mod backend;
pub mod error;
pub mod firebase;
pub mod memory;
pub mod session;
pub mod store;

pub use backend::Backend;
pub use error::{AuthError, AuthResult, StoreError, StoreResult};
pub use firebase::{FirebaseAuth, FirebaseBackend, FirebaseConfig, FirestoreStore};
pub use memory::{MemoryBackend, MemoryRecordStore, MemorySessionGateway, StoreCall};
pub use session::{Session, SessionGateway};
pub use store::{Document, Fields, RecordStore};
