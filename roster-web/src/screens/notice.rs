use std::time::Duration;
use tokio::time::Instant;

/// How long a transient notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A user-visible message that clears itself after [`NOTICE_TTL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: &'static str,
    shown_at: Instant,
}

impl Notice {
    pub fn success(text: &'static str) -> Self {
        Self::new(NoticeKind::Success, text)
    }

    pub fn error(text: &'static str) -> Self {
        Self::new(NoticeKind::Error, text)
    }

    fn new(kind: NoticeKind, text: &'static str) -> Self {
        Self {
            kind,
            text,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Time left before the notice clears.
    pub fn remaining(&self) -> Duration {
        NOTICE_TTL.saturating_sub(self.shown_at.elapsed())
    }
}
