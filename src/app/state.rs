// InternDesk - app/state.rs
//
// Application state management. Holds the fetched data of each screen,
// view-only UI state (filters, modals, hover, animation clocks), alerts,
// and the queue of requests waiting to be handed to the fetch worker.
// Owned by the eframe::App implementation.
//
// Mutations follow confirm-then-apply: an action marks its rows pending,
// and the local lists change only when the worker reports success.

use crate::app::context::SessionContext;
use crate::app::fetch::{ActionOutcome, DashboardData, FetchRequest, FetchResult, Screen};
use crate::core::animation::{self, AnimatedStats};
use crate::core::filter::{self, InternFilter};
use crate::core::model::{AttendanceRecord, Intern, Notification, NotificationFilter};
use crate::core::stats;
use crate::util::constants::{MAX_PENDING_ALERTS, MAX_REASON_LENGTH, MONTHS_PER_YEAR};
use chrono::{Datelike, NaiveDate};
use std::collections::{HashSet, VecDeque};
use std::time::Instant;

/// Elapsed time reported when animations are off or never started.
pub const SETTLED: f32 = f32::MAX;

// =============================================================================
// Alerts
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Failure,
}

/// A modal confirmation or failure message for a user-initiated action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    fn success(title: &str, message: &str) -> Self {
        Self {
            kind: AlertKind::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    fn failure(title: &str, message: &str) -> Self {
        Self {
            kind: AlertKind::Failure,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

// =============================================================================
// Per-screen state
// =============================================================================

/// Dashboard screen.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub loading: bool,
    pub data: Option<DashboardData>,
    /// Calendar year the chart shows.
    pub chart_year: i32,
    /// Month column under the pointer, if any.
    pub hovered_month: Option<usize>,
    pub chart_started: Option<Instant>,
    pub counters_started: Option<Instant>,
    /// View-only toggle; never sent anywhere or persisted.
    pub favorite: bool,
}

fn elapsed_since(start: Option<Instant>, now: Instant) -> f32 {
    start
        .map(|s| now.saturating_duration_since(s).as_secs_f32())
        .unwrap_or(SETTLED)
}

impl DashboardState {
    pub fn chart_elapsed(&self, now: Instant) -> f32 {
        elapsed_since(self.chart_started, now)
    }

    pub fn counters_elapsed(&self, now: Instant) -> f32 {
        elapsed_since(self.counters_started, now)
    }

    /// Whether any chart or counter animation still needs frames.
    pub fn is_animating(&self, now: Instant) -> bool {
        if self.data.is_none() {
            return false;
        }
        !animation::is_complete(self.chart_elapsed(now), MONTHS_PER_YEAR - 1)
            || !AnimatedStats::is_settled(self.counters_elapsed(now))
    }
}

/// Attendance history modal for one intern.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceModal {
    pub student_id: String,
    pub intern_name: String,
    pub loading: bool,
    pub records: Vec<AttendanceRecord>,
}

/// Remove-intern confirmation modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalDialog {
    pub application_id: String,
    pub intern_name: String,
    pub reason: String,
    /// Validation message shown under the reason field.
    pub error: Option<String>,
}

/// Interns screen.
#[derive(Debug, Default)]
pub struct InternsState {
    pub loading: bool,
    pub list: Vec<Intern>,
    pub filter: InternFilter,
    /// Indices into `list` passing `filter`.
    pub filtered: Vec<usize>,
    /// Application id of the intern whose details modal is open.
    pub selected: Option<String>,
    pub attendance: Option<AttendanceModal>,
    pub removal: Option<RemovalDialog>,
    /// Application ids with a removal in flight.
    pub pending_removals: HashSet<String>,
    /// Removals the server confirmed that a reload has not caught up with yet.
    confirmed_removals: HashSet<String>,
}

impl InternsState {
    pub fn apply_filter(&mut self) {
        self.filtered = filter::filter_interns(&self.list, &self.filter);
    }

    /// Replace the list with a reload. Pending removals stay flagged;
    /// confirmed ones stay hidden until the server stops returning them.
    fn replace_list(&mut self, interns: Vec<Intern>) {
        self.confirmed_removals
            .retain(|id| interns.iter().any(|i| &i.application_id == id));
        self.list = interns;
        let removed = &self.confirmed_removals;
        self.list.retain(|i| !removed.contains(&i.application_id));
        self.apply_filter();
    }

    pub fn selected_intern(&self) -> Option<&Intern> {
        let id = self.selected.as_ref()?;
        self.list.iter().find(|i| &i.application_id == id)
    }

    /// Interns currently visible, in list order.
    pub fn visible(&self) -> Vec<&Intern> {
        self.filtered
            .iter()
            .filter_map(|&idx| self.list.get(idx))
            .collect()
    }
}

/// Notifications screen.
#[derive(Debug, Default)]
pub struct NotificationsState {
    pub loading: bool,
    pub list: Vec<Notification>,
    pub filter: NotificationFilter,
    /// Indices into `list` passing `filter`.
    pub filtered: Vec<usize>,
    pub unread_count: usize,
    /// Notification ids with a mark-read in flight.
    pub pending_reads: HashSet<String>,
    /// Ids covered by an in-flight "mark all read", captured at request time.
    mark_all_ids: Option<HashSet<String>>,
    /// Reads the server confirmed that a reload may still show as unread.
    confirmed_reads: HashSet<String>,
}

impl NotificationsState {
    /// Recompute the filtered view and the unread badge. Returns true when
    /// the unread count changed.
    fn refresh(&mut self) -> bool {
        self.filtered = filter::filter_notifications(&self.list, self.filter);
        let unread = stats::unread_count(&self.list);
        let changed = unread != self.unread_count;
        self.unread_count = unread;
        changed
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending_reads.contains(id)
            || self
                .mark_all_ids
                .as_ref()
                .is_some_and(|ids| ids.contains(id))
    }

    pub fn is_marking_all(&self) -> bool {
        self.mark_all_ids.is_some()
    }

    fn mark_confirmed(&mut self, id: &str) {
        if let Some(n) = self.list.iter_mut().find(|n| n.id == id) {
            n.is_read = true;
        }
        self.confirmed_reads.insert(id.to_string());
    }

    /// Replace the list with a reload, keeping confirmed reads read.
    fn replace_list(&mut self, notifications: Vec<Notification>) {
        self.list = notifications;
        let confirmed = &mut self.confirmed_reads;
        confirmed.retain(|id| self.list.iter().any(|n| &n.id == id && !n.is_read));
        for n in &mut self.list {
            if confirmed.contains(&n.id) {
                n.is_read = true;
            }
        }
    }
}

// =============================================================================
// AppState
// =============================================================================

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    pub context: SessionContext,
    pub active_screen: Screen,
    pub dashboard: DashboardState,
    pub interns: InternsState,
    pub notifications: NotificationsState,

    /// Alerts waiting to be shown, oldest first.
    pub alerts: VecDeque<Alert>,
    /// Status message for the status bar.
    pub status_message: String,
    /// Non-fatal warnings (config problems) shown in the status bar.
    pub warnings: Vec<String>,

    /// Whether chart and counter animations run.
    pub animations: bool,
    pub dark_mode: bool,
    pub show_about: bool,

    /// Requests queued by the UI, drained into the fetch worker each frame.
    pending_requests: Vec<FetchRequest>,
}

impl AppState {
    pub fn new(context: SessionContext, today: NaiveDate, animations: bool, dark_mode: bool) -> Self {
        Self {
            context,
            active_screen: Screen::Dashboard,
            dashboard: DashboardState {
                chart_year: today.year(),
                ..Default::default()
            },
            interns: InternsState::default(),
            notifications: NotificationsState::default(),
            alerts: VecDeque::new(),
            status_message: "Loading...".to_string(),
            warnings: Vec::new(),
            animations,
            dark_mode,
            show_about: false,
            pending_requests: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Requests
    // -------------------------------------------------------------------------

    /// Queue a request and set the matching loading flag.
    pub fn request(&mut self, request: FetchRequest) {
        match request.load_screen() {
            Some(Screen::Dashboard) => self.dashboard.loading = true,
            Some(Screen::Interns) => self.interns.loading = true,
            Some(Screen::Notifications) => self.notifications.loading = true,
            None => {}
        }
        self.pending_requests.push(request);
    }

    /// Requests queued since the last call.
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending_requests)
    }

    /// Reload one screen.
    pub fn refresh(&mut self, screen: Screen, today: NaiveDate) {
        let request = match screen {
            Screen::Dashboard => FetchRequest::Dashboard {
                year: self.dashboard.chart_year,
                today,
            },
            Screen::Interns => FetchRequest::Interns,
            Screen::Notifications => FetchRequest::Notifications,
        };
        self.request(request);
    }

    /// Reload every screen (start-up and "Refresh all").
    pub fn refresh_all(&mut self, today: NaiveDate) {
        for &screen in Screen::all() {
            self.refresh(screen, today);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.dashboard.loading || self.interns.loading || self.notifications.loading
    }

    pub fn push_alert(&mut self, alert: Alert) {
        if self.alerts.len() >= MAX_PENDING_ALERTS {
            self.alerts.pop_front();
        }
        self.alerts.push_back(alert);
    }

    // -------------------------------------------------------------------------
    // Dashboard
    // -------------------------------------------------------------------------

    /// Switch the chart to `year`. The series is recomputed from the loaded
    /// interns; no refetch is needed.
    pub fn set_chart_year(&mut self, year: i32, now: Instant) {
        if year == self.dashboard.chart_year {
            return;
        }
        self.dashboard.chart_year = year;
        self.dashboard.hovered_month = None;
        if let Some(ref mut data) = self.dashboard.data {
            data.year = year;
            data.recompute();
        }
        self.dashboard.chart_started = self.animations.then_some(now);
    }

    pub fn toggle_favorite(&mut self) {
        self.dashboard.favorite = !self.dashboard.favorite;
    }

    // -------------------------------------------------------------------------
    // Interns
    // -------------------------------------------------------------------------

    pub fn set_intern_search(&mut self, text: &str) {
        self.interns.filter.search = text.to_string();
        self.interns.apply_filter();
    }

    pub fn open_intern_details(&mut self, application_id: &str) {
        self.interns.selected = Some(application_id.to_string());
    }

    /// Open the attendance modal and queue the history fetch.
    pub fn open_attendance(&mut self, application_id: &str, today: NaiveDate) {
        let Some(intern) = self
            .interns
            .list
            .iter()
            .find(|i| i.application_id == application_id)
        else {
            return;
        };
        let student_id = intern.student_id.clone();
        self.interns.attendance = Some(AttendanceModal {
            student_id: student_id.clone(),
            intern_name: intern.name.clone(),
            loading: true,
            records: Vec::new(),
        });
        self.request(FetchRequest::InternAttendance { student_id, today });
    }

    pub fn open_removal(&mut self, application_id: &str) {
        if self.interns.pending_removals.contains(application_id) {
            return;
        }
        let Some(intern) = self
            .interns
            .list
            .iter()
            .find(|i| i.application_id == application_id)
        else {
            return;
        };
        self.interns.removal = Some(RemovalDialog {
            application_id: application_id.to_string(),
            intern_name: intern.name.clone(),
            reason: String::new(),
            error: None,
        });
    }

    /// Validate the removal reason and send the request. The dialog stays
    /// open with an error message when the reason is unusable.
    pub fn confirm_removal(&mut self) {
        let Some(ref mut dialog) = self.interns.removal else {
            return;
        };
        let reason = dialog.reason.trim();
        if reason.is_empty() {
            dialog.error = Some("Please give a reason for removing this intern.".to_string());
            return;
        }
        if reason.chars().count() > MAX_REASON_LENGTH {
            dialog.error = Some(format!(
                "The reason must be at most {MAX_REASON_LENGTH} characters."
            ));
            return;
        }

        let request = FetchRequest::RemoveIntern {
            application_id: dialog.application_id.clone(),
            reason: reason.to_string(),
        };
        self.interns
            .pending_removals
            .insert(dialog.application_id.clone());
        self.interns.removal = None;
        self.status_message = "Removing intern...".to_string();
        self.request(request);
    }

    pub fn cancel_removal(&mut self) {
        self.interns.removal = None;
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    pub fn set_notification_filter(&mut self, filter: NotificationFilter) {
        self.notifications.filter = filter;
        self.notifications.refresh();
    }

    /// Request marking one notification read. No-op if it is already read
    /// or a request for it is in flight.
    pub fn mark_read(&mut self, notification_id: &str) {
        let unread = self
            .notifications
            .list
            .iter()
            .any(|n| n.id == notification_id && !n.is_read);
        if !unread || self.notifications.is_pending(notification_id) {
            return;
        }
        self.notifications
            .pending_reads
            .insert(notification_id.to_string());
        self.request(FetchRequest::MarkRead {
            notification_id: notification_id.to_string(),
        });
    }

    /// Request marking every notification read. No-op when nothing is unread.
    /// Only the notifications listed now are marked locally on success.
    pub fn mark_all_read(&mut self) {
        if self.notifications.unread_count == 0 || self.notifications.is_marking_all() {
            return;
        }
        let ids = self
            .notifications
            .list
            .iter()
            .filter(|n| !n.is_read)
            .map(|n| n.id.clone())
            .collect();
        self.notifications.mark_all_ids = Some(ids);
        self.request(FetchRequest::MarkAllRead);
    }

    // -------------------------------------------------------------------------
    // Results
    // -------------------------------------------------------------------------

    /// Apply one worker result.
    pub fn apply_result(&mut self, result: FetchResult, now: Instant) {
        match result {
            FetchResult::Dashboard { data, .. } => self.apply_dashboard(data, now),
            FetchResult::Interns { interns, .. } => {
                self.interns.loading = false;
                self.interns.replace_list(interns);
                if self.interns.selected_intern().is_none() {
                    self.interns.selected = None;
                }
                self.update_status();
            }
            FetchResult::Notifications { notifications, .. } => {
                self.notifications.loading = false;
                self.notifications.replace_list(notifications);
                self.refresh_unread();
                self.update_status();
            }
            FetchResult::InternAttendance {
                student_id,
                records,
            } => {
                if let Some(ref mut modal) = self.interns.attendance {
                    if modal.student_id == student_id {
                        modal.loading = false;
                        modal.records = records;
                    }
                }
            }
            FetchResult::InternRemoved {
                application_id,
                outcome,
            } => self.apply_removal(&application_id, outcome),
            FetchResult::NotificationRead {
                notification_id,
                outcome,
            } => {
                self.notifications.pending_reads.remove(&notification_id);
                match outcome {
                    Ok(()) => {
                        self.notifications.mark_confirmed(&notification_id);
                        self.refresh_unread();
                    }
                    Err(_) => self.push_alert(Alert::failure(
                        "Error",
                        "Failed to mark the notification as read. Please try again.",
                    )),
                }
            }
            FetchResult::AllNotificationsRead { outcome } => {
                let ids = self.notifications.mark_all_ids.take().unwrap_or_default();
                match outcome {
                    Ok(()) => {
                        for id in &ids {
                            self.notifications.mark_confirmed(id);
                        }
                        self.refresh_unread();
                        self.push_alert(Alert::success(
                            "Done",
                            "All notifications marked as read.",
                        ));
                    }
                    Err(_) => self.push_alert(Alert::failure(
                        "Error",
                        "Failed to mark all notifications as read. Please try again.",
                    )),
                }
            }
        }
    }

    fn apply_dashboard(&mut self, mut data: DashboardData, now: Instant) {
        self.dashboard.loading = false;
        // The year may have been changed while the load was in flight.
        if data.year != self.dashboard.chart_year {
            data.year = self.dashboard.chart_year;
            data.recompute();
        }
        self.dashboard.data = Some(data);
        self.dashboard.hovered_month = None;
        let start = self.animations.then_some(now);
        self.dashboard.chart_started = start;
        self.dashboard.counters_started = start;
        self.update_status();
    }

    fn apply_removal(&mut self, application_id: &str, outcome: ActionOutcome) {
        self.interns.pending_removals.remove(application_id);
        match outcome {
            Ok(()) => {
                self.interns
                    .list
                    .retain(|i| i.application_id != application_id);
                self.interns
                    .confirmed_removals
                    .insert(application_id.to_string());
                self.interns.apply_filter();
                if self.interns.selected.as_deref() == Some(application_id) {
                    self.interns.selected = None;
                }
                if let Some(ref mut data) = self.dashboard.data {
                    data.interns.retain(|i| i.application_id != application_id);
                    data.recompute();
                }
                self.push_alert(Alert::success("Success", "Intern removed successfully."));
                self.update_status();
            }
            Err(_) => {
                self.push_alert(Alert::failure(
                    "Error",
                    "Failed to remove the intern. Please try again.",
                ));
                self.status_message = "Removal failed.".to_string();
            }
        }
    }

    fn refresh_unread(&mut self) {
        if self.notifications.refresh() {
            tracing::debug!(
                unread = self.notifications.unread_count,
                "Unread count changed"
            );
        }
    }

    fn update_status(&mut self) {
        if self.is_loading() {
            self.status_message = "Loading...".to_string();
            return;
        }
        self.status_message = format!(
            "{} interns | {} unread notifications",
            self.interns.list.len(),
            self.notifications.unread_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::CompanyStats;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn make_state() -> AppState {
        AppState::new(SessionContext::new("u1", "c1"), today(), true, true)
    }

    fn make_intern(id: &str, name: &str, month: u32) -> Intern {
        Intern {
            application_id: id.to_string(),
            student_id: format!("S-{id}"),
            name: name.to_string(),
            approved_at: Some(Utc.with_ymd_and_hms(2025, month, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    fn make_note(id: &str, is_read: bool) -> Notification {
        Notification {
            id: id.to_string(),
            is_read,
            ..Default::default()
        }
    }

    fn loaded_state() -> AppState {
        let mut state = make_state();
        state.refresh_all(today());
        state.take_requests();
        let interns = vec![make_intern("a1", "Ana", 1), make_intern("a2", "Ben", 3)];
        let mut data = DashboardData {
            interns: interns.clone(),
            year: 2025,
            ..Default::default()
        };
        data.recompute();
        let now = Instant::now();
        state.apply_result(FetchResult::Dashboard { generation: 1, data }, now);
        state.apply_result(FetchResult::Interns { generation: 1, interns }, now);
        state.apply_result(
            FetchResult::Notifications {
                generation: 1,
                notifications: vec![make_note("n1", false), make_note("n2", false), make_note("n3", true)],
            },
            now,
        );
        state
    }

    #[test]
    fn test_refresh_all_sets_loading_and_queues_loads() {
        let mut state = make_state();
        state.refresh_all(today());
        assert!(state.dashboard.loading && state.interns.loading && state.notifications.loading);
        let requests = state.take_requests();
        assert_eq!(requests.len(), 3);
        assert!(state.take_requests().is_empty());
    }

    #[test]
    fn test_loaded_state_clears_flags() {
        let state = loaded_state();
        assert!(!state.is_loading());
        assert_eq!(state.notifications.unread_count, 2);
        assert_eq!(state.interns.filtered, vec![0, 1]);
        assert_eq!(state.status_message, "2 interns | 2 unread notifications");
    }

    #[test]
    fn test_removal_requires_reason() {
        let mut state = loaded_state();
        state.open_removal("a1");
        state.confirm_removal();
        assert!(state.interns.removal.as_ref().unwrap().error.is_some());
        assert!(state.take_requests().is_empty());

        state.interns.removal.as_mut().unwrap().reason = "x".repeat(MAX_REASON_LENGTH + 1);
        state.confirm_removal();
        assert!(state.take_requests().is_empty());
    }

    #[test]
    fn test_removal_is_applied_only_on_success() {
        let mut state = loaded_state();
        state.open_removal("a1");
        state.interns.removal.as_mut().unwrap().reason = "  Contract ended  ".to_string();
        state.confirm_removal();

        assert!(state.interns.removal.is_none());
        assert!(state.interns.pending_removals.contains("a1"));
        assert_eq!(state.interns.list.len(), 2);
        assert_eq!(
            state.take_requests(),
            vec![FetchRequest::RemoveIntern {
                application_id: "a1".to_string(),
                reason: "Contract ended".to_string(),
            }]
        );

        state.apply_result(
            FetchResult::InternRemoved {
                application_id: "a1".to_string(),
                outcome: Ok(()),
            },
            Instant::now(),
        );
        assert!(state.interns.pending_removals.is_empty());
        assert_eq!(state.interns.list.len(), 1);
        let data = state.dashboard.data.as_ref().unwrap();
        assert_eq!(data.stats.total_interns, 1);
        assert_eq!(data.monthly[0], 0);
        assert_eq!(data.monthly[2], 1);
        assert_eq!(state.alerts.back().unwrap().kind, AlertKind::Success);
    }

    #[test]
    fn test_failed_removal_keeps_list_and_alerts() {
        let mut state = loaded_state();
        state.open_removal("a2");
        state.interns.removal.as_mut().unwrap().reason = "Left".to_string();
        state.confirm_removal();
        state.apply_result(
            FetchResult::InternRemoved {
                application_id: "a2".to_string(),
                outcome: Err("HTTP 500".to_string()),
            },
            Instant::now(),
        );
        assert_eq!(state.interns.list.len(), 2);
        assert!(state.interns.pending_removals.is_empty());
        assert_eq!(state.alerts.back().unwrap().kind, AlertKind::Failure);
    }

    #[test]
    fn test_mark_read_waits_for_confirmation() {
        let mut state = loaded_state();
        state.mark_read("n1");
        // Second click while pending is ignored.
        state.mark_read("n1");
        // Already read.
        state.mark_read("n3");
        assert_eq!(state.take_requests().len(), 1);
        assert_eq!(state.notifications.unread_count, 2);

        state.apply_result(
            FetchResult::NotificationRead {
                notification_id: "n1".to_string(),
                outcome: Ok(()),
            },
            Instant::now(),
        );
        assert_eq!(state.notifications.unread_count, 1);
        assert!(!state.notifications.is_pending("n1"));
    }

    #[test]
    fn test_mark_all_read_failure_leaves_flags() {
        let mut state = loaded_state();
        state.mark_all_read();
        assert!(state.notifications.is_pending("n2"));
        state.apply_result(
            FetchResult::AllNotificationsRead {
                outcome: Err("offline".to_string()),
            },
            Instant::now(),
        );
        assert_eq!(state.notifications.unread_count, 2);
        assert_eq!(state.alerts.back().unwrap().kind, AlertKind::Failure);

        state.mark_all_read();
        state.apply_result(
            FetchResult::AllNotificationsRead { outcome: Ok(()) },
            Instant::now(),
        );
        assert_eq!(state.notifications.unread_count, 0);
        // Nothing left to mark.
        state.take_requests();
        state.mark_all_read();
        assert!(state.take_requests().is_empty());
    }

    #[test]
    fn test_reload_during_removal_keeps_it_pending() {
        let mut state = loaded_state();
        state.open_removal("a1");
        state.interns.removal.as_mut().unwrap().reason = "Contract ended".to_string();
        state.confirm_removal();
        state.take_requests();

        // Tab switch reload answered before the server saw the removal.
        let snapshot = vec![make_intern("a1", "Ana", 1), make_intern("a2", "Ben", 3)];
        let now = Instant::now();
        state.apply_result(
            FetchResult::Interns {
                generation: 2,
                interns: snapshot.clone(),
            },
            now,
        );
        assert!(state.interns.pending_removals.contains("a1"));
        state.open_removal("a1");
        state.confirm_removal();
        assert!(state.interns.removal.is_none());
        assert!(state.take_requests().is_empty());

        state.apply_result(
            FetchResult::InternRemoved {
                application_id: "a1".to_string(),
                outcome: Ok(()),
            },
            now,
        );
        // A reload that still carries a1 does not bring it back.
        state.apply_result(
            FetchResult::Interns {
                generation: 3,
                interns: snapshot,
            },
            now,
        );
        assert_eq!(state.interns.list.len(), 1);
        assert_eq!(state.interns.list[0].application_id, "a2");

        state.apply_result(
            FetchResult::Interns {
                generation: 4,
                interns: vec![make_intern("a2", "Ben", 3)],
            },
            now,
        );
        assert!(state.interns.confirmed_removals.is_empty());
    }

    #[test]
    fn test_reload_during_mark_read_keeps_it_pending() {
        let mut state = loaded_state();
        state.mark_read("n1");
        state.take_requests();
        let feed = || vec![make_note("n1", false), make_note("n2", false), make_note("n3", true)];
        let now = Instant::now();

        state.apply_result(
            FetchResult::Notifications {
                generation: 2,
                notifications: feed(),
            },
            now,
        );
        assert!(state.notifications.is_pending("n1"));
        state.mark_read("n1");
        assert!(state.take_requests().is_empty());

        state.apply_result(
            FetchResult::NotificationRead {
                notification_id: "n1".to_string(),
                outcome: Ok(()),
            },
            now,
        );
        state.apply_result(
            FetchResult::Notifications {
                generation: 3,
                notifications: feed(),
            },
            now,
        );
        assert_eq!(state.notifications.unread_count, 1);
        assert!(!state.notifications.is_pending("n1"));
    }

    #[test]
    fn test_mark_all_read_covers_only_listed_notifications() {
        let mut state = loaded_state();
        state.mark_all_read();
        let now = Instant::now();
        state.apply_result(
            FetchResult::Notifications {
                generation: 2,
                notifications: vec![
                    make_note("n1", false),
                    make_note("n2", false),
                    make_note("n4", false),
                ],
            },
            now,
        );
        assert!(state.notifications.is_marking_all());
        assert!(state.notifications.is_pending("n2"));
        assert!(!state.notifications.is_pending("n4"));

        state.apply_result(FetchResult::AllNotificationsRead { outcome: Ok(()) }, now);
        assert!(!state.notifications.is_marking_all());
        assert_eq!(state.notifications.unread_count, 1);
        let n4 = state.notifications.list.iter().find(|n| n.id == "n4").unwrap();
        assert!(!n4.is_read);
    }

    #[test]
    fn test_unread_filter_view() {
        let mut state = loaded_state();
        state.set_notification_filter(NotificationFilter::Unread);
        assert_eq!(state.notifications.filtered, vec![0, 1]);
    }

    #[test]
    fn test_chart_year_change_recomputes_locally() {
        let mut state = loaded_state();
        state.set_chart_year(2024, Instant::now());
        let data = state.dashboard.data.as_ref().unwrap();
        assert_eq!(data.monthly, [0; 12]);
        assert!(state.take_requests().is_empty());
    }

    #[test]
    fn test_animations_disabled_are_settled() {
        let mut state = AppState::new(SessionContext::new("u", "c"), today(), false, true);
        let now = Instant::now();
        state.apply_result(
            FetchResult::Dashboard {
                generation: 1,
                data: DashboardData {
                    year: 2025,
                    ..Default::default()
                },
            },
            now,
        );
        assert!(!state.dashboard.is_animating(now));
        assert_eq!(state.dashboard.counters_elapsed(now), SETTLED);
        assert_eq!(
            AnimatedStats::at(&CompanyStats::default(), SETTLED),
            AnimatedStats::default()
        );
    }

    #[test]
    fn test_alert_queue_is_bounded() {
        let mut state = make_state();
        for _ in 0..(MAX_PENDING_ALERTS + 3) {
            state.push_alert(Alert::success("t", "m"));
        }
        assert_eq!(state.alerts.len(), MAX_PENDING_ALERTS);
    }
}
