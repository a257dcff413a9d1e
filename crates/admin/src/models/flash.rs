//! One-shot notices carried across a redirect.
//!
//! A handler pushes a [`Notice`] before redirecting and the next full page
//! render takes it out of the session, so each notice is shown once.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session_keys;

/// Visual tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A short message shown as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// CSS modifier used by the toast markup.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "toast-success",
            NoticeKind::Error => "toast-error",
        }
    }
}

/// Queue a notice for the next page render.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn push_flash(
    session: &Session,
    notice: Notice,
) -> Result<(), tower_sessions::session::Error> {
    let mut pending: Vec<Notice> = session
        .get(session_keys::FLASH)
        .await?
        .unwrap_or_default();
    pending.push(notice);
    session.insert(session_keys::FLASH, pending).await
}

/// Remove and return every queued notice. Store failures yield nothing.
pub async fn take_flashes(session: &Session) -> Vec<Notice> {
    match session.remove::<Vec<Notice>>(session_keys::FLASH).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash messages from session");
            Vec::new()
        }
    }
}
