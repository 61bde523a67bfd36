//! Screen state machines.
//!
//! Each screen owns its state and talks to the gateways directly; HTTP
//! handlers only translate requests into screen calls and render the result.

mod form;
mod login;
mod notice;
mod students;

pub use form::{FormMode, StudentForm, Submission};
pub use login::{INVALID_CREDENTIALS, LoginScreen};
pub use notice::{NOTICE_TTL, Notice, NoticeKind};
pub use students::{
    DELETE_FAILED, DELETE_SUCCEEDED, LOAD_FAILED, SAVE_FAILED, StudentsScreen,
};
