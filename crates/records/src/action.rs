//! Status-gated record actions.
//!
//! The client never moves a record between states itself; it only mirrors
//! the backend's status string and decides which action buttons to enable.
//! The transition happens server-side when the action is POSTed.

use std::fmt;

use erpdesk_core::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MarkPaid,
    Accept,
    Reject,
    Convert,
    Confirm,
    Cancel,
    Receive,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MarkPaid,
        Action::Accept,
        Action::Reject,
        Action::Convert,
        Action::Confirm,
        Action::Cancel,
        Action::Receive,
    ];

    /// Last path segment of the action endpoint, `<resource>/<id>/<segment>/`.
    pub fn segment(self) -> &'static str {
        match self {
            Action::MarkPaid => "mark_paid",
            Action::Accept => "accept",
            Action::Reject => "reject",
            Action::Convert => "convert",
            Action::Confirm => "confirm",
            Action::Cancel => "cancel",
            Action::Receive => "receive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::MarkPaid => "mark paid",
            Action::Accept => "accept",
            Action::Reject => "reject",
            Action::Convert => "convert to order",
            Action::Confirm => "confirm",
            Action::Cancel => "cancel",
            Action::Receive => "receive",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Records whose available actions depend on their status.
pub trait Workflow: Record {
    /// Status as reported by the backend.
    fn status(&self) -> &str;

    fn allows(&self, action: Action) -> bool;

    /// Actions to enable, in a stable order.
    fn actions(&self) -> Vec<Action> {
        Action::ALL.into_iter().filter(|a| self.allows(*a)).collect()
    }
}
