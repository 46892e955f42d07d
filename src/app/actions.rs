//! Actions representing side effects to be executed by the host.
//!
//! The event handler returns a list of [`Action`]s alongside the render flag,
//! keeping the boundary between pure state transitions and host-owned side
//! effects explicit. The host (rendering layer, out of scope here) executes
//! them in order: today that means showing notifications; the table core
//! itself never blocks on them.

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    /// Informational toast (e.g. export completed).
    Info,
    /// Non-blocking error toast with the failure description.
    Error,
}

/// Commands representing side effects to be executed by the host.
///
/// Produced by the event handler after processing a view event. Notifications
/// are always non-blocking: a failed export or store read never leaves the
/// view in a partially updated state, it only produces an `Action::Notify`
/// and/or an inline error in the view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Shows a non-blocking toast to the user.
    Notify {
        /// Notification severity.
        level: NotifyLevel,
        /// Human-readable message.
        message: String,
    },
}

impl Action {
    /// Convenience constructor for an informational notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::Notify {
            level: NotifyLevel::Info,
            message: message.into(),
        }
    }

    /// Convenience constructor for an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Notify {
            level: NotifyLevel::Error,
            message: message.into(),
        }
    }
}
