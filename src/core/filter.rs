// InternDesk - core/filter.rs
//
// View filters for the interns roster and the notifications feed.
// Core layer: pure logic, no I/O or UI dependencies.
//
// Both filters return indices into the source slice rather than copies so
// the UI can keep one owned list per screen and virtual-scroll the view.

use crate::core::model::{Intern, Notification, NotificationFilter};

/// Roster search state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternFilter {
    /// Case-insensitive substring. Empty = no filter.
    pub search: String,
}

impl InternFilter {
    /// Returns true if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
    }
}

/// Indices of interns whose name, student id, major or position contains
/// the search text, ignoring case.
pub fn filter_interns(interns: &[Intern], filter: &InternFilter) -> Vec<usize> {
    if filter.is_empty() {
        return (0..interns.len()).collect();
    }

    let needle = filter.search.trim().to_lowercase();

    interns
        .iter()
        .enumerate()
        .filter(|(_, intern)| intern_matches(intern, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

fn intern_matches(intern: &Intern, needle_lower: &str) -> bool {
    [
        &intern.name,
        &intern.student_id,
        &intern.major,
        &intern.position,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle_lower))
}

/// Whether a single notification passes `filter`.
pub fn notification_matches(notification: &Notification, filter: NotificationFilter) -> bool {
    match filter {
        NotificationFilter::All => true,
        NotificationFilter::Unread => !notification.is_read,
        NotificationFilter::Important => notification.is_important,
        NotificationFilter::ActionRequired => notification.action_required,
    }
}

/// Indices of notifications that pass `filter`.
pub fn filter_notifications(
    notifications: &[Notification],
    filter: NotificationFilter,
) -> Vec<usize> {
    notifications
        .iter()
        .enumerate()
        .filter(|(_, n)| notification_matches(n, filter))
        .map(|(idx, _)| idx)
        .collect()
}

/// Number of notifications passing each filter, in `NotificationFilter::all()`
/// order. Used for the chip badges.
pub fn notification_counts(notifications: &[Notification]) -> Vec<(NotificationFilter, usize)> {
    NotificationFilter::all()
        .iter()
        .map(|&f| {
            let count = notifications
                .iter()
                .filter(|n| notification_matches(n, f))
                .count();
            (f, count)
        })
        .collect()
}
