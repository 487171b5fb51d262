// InternDesk - app/fetch.rs
//
// Background fetch worker. Runs portal API calls off the UI thread and
// hands results back over an mpsc channel.
//
// Architecture:
//   - `FetchManager` lives on the UI thread; each request runs on its own
//     short-lived background thread.
//   - All cross-thread communication is via `FetchResult` channel messages,
//     polled without blocking once per frame.
//   - Loads never fail from the UI's point of view: every API error is
//     logged and replaced by a safe default (empty list, zero counts,
//     default profile).
//   - Actions (remove intern, mark read) report success or failure so the
//     UI can apply the change or raise an alert.
//   - Requests are not cancelled. A load result that arrives after the same
//     screen was re-requested is stale and is dropped on receipt.

use crate::app::context::SessionContext;
use crate::core::model::{
    AttendanceQuery, AttendanceRecord, AttendanceStats, CompanyInfo, CompanyStats, Intern,
    Notification,
};
use crate::core::stats;
use crate::platform::api::PortalApi;
use crate::util::constants::{MAX_FETCH_MESSAGES_PER_FRAME, MONTHS_PER_YEAR, REJECTED_STATUS};
use crate::util::error::ApiError;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::{mpsc, Arc};

/// Days of history shown in the intern attendance modal.
pub const ATTENDANCE_HISTORY_DAYS: i64 = 14;

// =============================================================================
// Messages
// =============================================================================

/// The three screens of the portal. Also the key for stale-result tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Dashboard,
    Interns,
    Notifications,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Interns, Self::Notifications]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Interns => "Interns",
            Self::Notifications => "Notifications",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Interns => 1,
            Self::Notifications => 2,
        }
    }
}

/// Work the UI asks the worker to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Profile, interns, today's attendance and this month's statistics.
    Dashboard { year: i32, today: NaiveDate },
    /// Current interns roster.
    Interns,
    /// Notification feed.
    Notifications,
    /// Recent attendance rows for one intern (attendance modal).
    InternAttendance { student_id: String, today: NaiveDate },
    /// Set an application to rejected with a reason.
    RemoveIntern {
        application_id: String,
        reason: String,
    },
    /// Mark one notification read.
    MarkRead { notification_id: String },
    /// Mark every notification read.
    MarkAllRead,
}

impl FetchRequest {
    /// The screen whose load this request is, if it is a load.
    pub fn load_screen(&self) -> Option<Screen> {
        match self {
            Self::Dashboard { .. } => Some(Screen::Dashboard),
            Self::Interns => Some(Screen::Interns),
            Self::Notifications => Some(Screen::Notifications),
            _ => None,
        }
    }
}

/// Everything the dashboard renders, fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub company: CompanyInfo,
    pub interns: Vec<Intern>,
    pub today: Vec<AttendanceRecord>,
    pub month_stats: Option<AttendanceStats>,
    pub stats: CompanyStats,
    pub year: i32,
    pub monthly: [u32; MONTHS_PER_YEAR],
}

impl DashboardData {
    /// Recompute the derived counters and chart series after the intern list
    /// or the chart year changed.
    pub fn recompute(&mut self) {
        self.stats = stats::company_stats(&self.interns, &self.today, self.month_stats.as_ref());
        self.monthly = stats::monthly_additions(&self.interns, self.year);
    }
}

/// Result of a user-initiated action. `Err` carries the diagnostic text;
/// the user only sees a generic failure alert.
pub type ActionOutcome = Result<(), String>;

/// Results sent from worker threads to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Dashboard {
        generation: u64,
        data: DashboardData,
    },
    Interns {
        generation: u64,
        interns: Vec<Intern>,
    },
    Notifications {
        generation: u64,
        notifications: Vec<Notification>,
    },
    InternAttendance {
        student_id: String,
        records: Vec<AttendanceRecord>,
    },
    InternRemoved {
        application_id: String,
        outcome: ActionOutcome,
    },
    NotificationRead {
        notification_id: String,
        outcome: ActionOutcome,
    },
    AllNotificationsRead {
        outcome: ActionOutcome,
    },
}

impl FetchResult {
    fn load_generation(&self) -> Option<(Screen, u64)> {
        match self {
            Self::Dashboard { generation, .. } => Some((Screen::Dashboard, *generation)),
            Self::Interns { generation, .. } => Some((Screen::Interns, *generation)),
            Self::Notifications { generation, .. } => Some((Screen::Notifications, *generation)),
            _ => None,
        }
    }
}

// =============================================================================
// Loaders and actions (pure over the API seam; run on worker threads)
// =============================================================================

fn or_default<T: Default>(what: &'static str, result: Result<T, ApiError>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(what, error = %e, "Fetch failed; showing empty state");
        T::default()
    })
}

/// Load everything the dashboard shows. Never fails; each failed call falls
/// back to its default independently of the others.
pub fn load_dashboard(
    api: &dyn PortalApi,
    ctx: &SessionContext,
    year: i32,
    today: NaiveDate,
) -> DashboardData {
    let company = or_default("company profile", api.fetch_company_profile(&ctx.user_id));
    let applications = or_default(
        "approved applications",
        api.fetch_approved_applications(&ctx.company_id),
    );
    let today_rows = or_default(
        "today's attendance",
        api.fetch_today_attendance(&ctx.company_id, &ctx.user_id, None),
    );

    let month = AttendanceQuery {
        start_date: today.with_day(1).unwrap_or(today),
        end_date: today,
    };
    let month_stats = api
        .fetch_attendance_stats(&ctx.company_id, &month)
        .map_err(|e| tracing::warn!(error = %e, "Attendance statistics unavailable"))
        .ok();

    let mut data = DashboardData {
        company,
        interns: stats::interns_from_applications(&applications),
        today: today_rows,
        month_stats,
        year,
        ..Default::default()
    };
    data.recompute();

    tracing::info!(
        interns = data.interns.len(),
        present = data.stats.present_today,
        "Dashboard loaded"
    );
    data
}

/// Load the interns roster.
pub fn load_interns(api: &dyn PortalApi, ctx: &SessionContext) -> Vec<Intern> {
    let applications = or_default(
        "approved applications",
        api.fetch_approved_applications(&ctx.company_id),
    );
    let interns = stats::interns_from_applications(&applications);
    tracing::info!(interns = interns.len(), "Roster loaded");
    interns
}

/// Load the notification feed.
pub fn load_notifications(api: &dyn PortalApi, ctx: &SessionContext) -> Vec<Notification> {
    let notifications = or_default(
        "notifications",
        api.fetch_notifications(&ctx.company_id, &ctx.user_id),
    );
    tracing::info!(
        total = notifications.len(),
        unread = stats::unread_count(&notifications),
        "Notifications loaded"
    );
    notifications
}

/// Attendance rows of one intern over the last `ATTENDANCE_HISTORY_DAYS`.
pub fn load_intern_attendance(
    api: &dyn PortalApi,
    ctx: &SessionContext,
    student_id: &str,
    today: NaiveDate,
) -> Vec<AttendanceRecord> {
    let range = AttendanceQuery {
        start_date: today - Duration::days(ATTENDANCE_HISTORY_DAYS - 1),
        end_date: today,
    };
    let mut rows: Vec<AttendanceRecord> = or_default(
        "intern attendance",
        api.fetch_today_attendance(&ctx.company_id, &ctx.user_id, Some(&range)),
    )
    .into_iter()
    .filter(|r| r.student_id == student_id)
    .collect();
    // Newest first; undated rows last.
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

fn action(what: &'static str, result: Result<(), ApiError>) -> ActionOutcome {
    match result {
        Ok(()) => {
            tracing::info!(what, "Action confirmed by server");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(what, error = %e, "Action failed");
            Err(e.to_string())
        }
    }
}

/// Reject the application behind an intern, recording the reason.
pub fn remove_intern(
    api: &dyn PortalApi,
    ctx: &SessionContext,
    application_id: &str,
    reason: &str,
) -> ActionOutcome {
    action(
        "remove intern",
        api.update_application_status(application_id, REJECTED_STATUS, &ctx.user_id, reason),
    )
}

/// Mark one notification read.
pub fn mark_read(api: &dyn PortalApi, ctx: &SessionContext, notification_id: &str) -> ActionOutcome {
    action(
        "mark notification read",
        api.mark_notification_read(notification_id, &ctx.user_id),
    )
}

/// Mark all notifications read.
pub fn mark_all_read(api: &dyn PortalApi, ctx: &SessionContext) -> ActionOutcome {
    action(
        "mark all notifications read",
        api.mark_all_notifications_read(&ctx.company_id, &ctx.user_id),
    )
}

/// Run `request` synchronously on the calling thread.
pub fn execute(
    api: &dyn PortalApi,
    ctx: &SessionContext,
    request: FetchRequest,
    generation: u64,
) -> FetchResult {
    match request {
        FetchRequest::Dashboard { year, today } => FetchResult::Dashboard {
            generation,
            data: load_dashboard(api, ctx, year, today),
        },
        FetchRequest::Interns => FetchResult::Interns {
            generation,
            interns: load_interns(api, ctx),
        },
        FetchRequest::Notifications => FetchResult::Notifications {
            generation,
            notifications: load_notifications(api, ctx),
        },
        FetchRequest::InternAttendance { student_id, today } => {
            let records = load_intern_attendance(api, ctx, &student_id, today);
            FetchResult::InternAttendance {
                student_id,
                records,
            }
        }
        FetchRequest::RemoveIntern {
            application_id,
            reason,
        } => {
            let outcome = remove_intern(api, ctx, &application_id, &reason);
            FetchResult::InternRemoved {
                application_id,
                outcome,
            }
        }
        FetchRequest::MarkRead { notification_id } => {
            let outcome = mark_read(api, ctx, &notification_id);
            FetchResult::NotificationRead {
                notification_id,
                outcome,
            }
        }
        FetchRequest::MarkAllRead => FetchResult::AllNotificationsRead {
            outcome: mark_all_read(api, ctx),
        },
    }
}

// =============================================================================
// FetchManager
// =============================================================================

/// Dispatches requests to background threads and collects their results.
pub struct FetchManager {
    api: Arc<dyn PortalApi>,
    context: SessionContext,
    tx: mpsc::Sender<FetchResult>,
    rx: mpsc::Receiver<FetchResult>,
    /// Latest generation issued per screen load.
    generations: [u64; 3],
    /// Requests sent but not yet received back.
    in_flight: usize,
}

impl FetchManager {
    pub fn new(api: Arc<dyn PortalApi>, context: SessionContext) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            context,
            tx,
            rx,
            generations: [0; 3],
            in_flight: 0,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Whether any request is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Spawn a background thread for `request`.
    pub fn submit(&mut self, request: FetchRequest) {
        let generation = match request.load_screen() {
            Some(screen) => {
                let slot = &mut self.generations[screen.index()];
                *slot += 1;
                *slot
            }
            None => 0,
        };

        let api = Arc::clone(&self.api);
        let ctx = self.context.clone();
        let tx = self.tx.clone();
        tracing::debug!(?request, generation, "Fetch submitted");

        self.in_flight += 1;
        std::thread::spawn(move || {
            let result = execute(api.as_ref(), &ctx, request, generation);
            // Receiver dropped means the window closed; nothing to deliver to.
            let _ = tx.send(result);
        });
    }

    /// Poll for results without blocking. Returns at most
    /// `MAX_FETCH_MESSAGES_PER_FRAME` fresh results; stale loads are dropped.
    pub fn poll_results(&mut self) -> Vec<FetchResult> {
        let mut results = Vec::new();
        while results.len() < MAX_FETCH_MESSAGES_PER_FRAME {
            let Ok(result) = self.rx.try_recv() else {
                break;
            };
            self.in_flight = self.in_flight.saturating_sub(1);

            if let Some((screen, generation)) = result.load_generation() {
                if generation != self.generations[screen.index()] {
                    tracing::debug!(?screen, generation, "Dropping stale load result");
                    continue;
                }
            }
            results.push(result);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Application, ApplicationStatus, AttendanceStatus};
    use std::sync::Mutex;
    use std::time::{Duration as StdDuration, Instant};

    /// Canned API. `fail` makes every call fail.
    #[derive(Default)]
    struct FakeApi {
        fail: bool,
        status_updates: Mutex<Vec<(String, String, String, String)>>,
    }

    fn rejected(endpoint: &str) -> ApiError {
        ApiError::Rejected {
            endpoint: endpoint.to_string(),
            message: "offline".to_string(),
        }
    }

    impl PortalApi for FakeApi {
        fn fetch_company_profile(&self, _user_id: &str) -> Result<CompanyInfo, ApiError> {
            if self.fail {
                return Err(rejected("profile"));
            }
            Ok(CompanyInfo {
                id: "c1".to_string(),
                name: "Acme Labs".to_string(),
                ..Default::default()
            })
        }

        fn fetch_approved_applications(
            &self,
            _company_id: &str,
        ) -> Result<Vec<Application>, ApiError> {
            if self.fail {
                return Err(rejected("applications"));
            }
            Ok(vec![Application {
                id: "a1".to_string(),
                student_id: "s1".to_string(),
                first_name: "Ana".to_string(),
                status: ApplicationStatus::Approved,
                ..Default::default()
            }])
        }

        fn fetch_today_attendance(
            &self,
            _company_id: &str,
            _user_id: &str,
            range: Option<&AttendanceQuery>,
        ) -> Result<Vec<AttendanceRecord>, ApiError> {
            if self.fail {
                return Err(rejected("attendance"));
            }
            let mut rows = vec![AttendanceRecord {
                student_id: "s1".to_string(),
                status: AttendanceStatus::Present,
                date: NaiveDate::from_ymd_opt(2025, 3, 10),
                ..Default::default()
            }];
            if range.is_some() {
                rows.push(AttendanceRecord {
                    student_id: "s1".to_string(),
                    status: AttendanceStatus::Late,
                    date: NaiveDate::from_ymd_opt(2025, 3, 11),
                    ..Default::default()
                });
                rows.push(AttendanceRecord {
                    student_id: "s2".to_string(),
                    ..Default::default()
                });
            }
            Ok(rows)
        }

        fn fetch_attendance_stats(
            &self,
            _company_id: &str,
            _range: &AttendanceQuery,
        ) -> Result<AttendanceStats, ApiError> {
            Err(rejected("stats"))
        }

        fn fetch_notifications(
            &self,
            _company_id: &str,
            _user_id: &str,
        ) -> Result<Vec<Notification>, ApiError> {
            if self.fail {
                return Err(rejected("notifications"));
            }
            Ok(vec![Notification {
                id: "n1".to_string(),
                ..Default::default()
            }])
        }

        fn mark_notification_read(&self, _id: &str, _user_id: &str) -> Result<(), ApiError> {
            if self.fail {
                Err(rejected("read"))
            } else {
                Ok(())
            }
        }

        fn mark_all_notifications_read(
            &self,
            _company_id: &str,
            _user_id: &str,
        ) -> Result<(), ApiError> {
            if self.fail {
                Err(rejected("read-all"))
            } else {
                Ok(())
            }
        }

        fn update_application_status(
            &self,
            application_id: &str,
            status: &str,
            actor_id: &str,
            reason: &str,
        ) -> Result<(), ApiError> {
            self.status_updates.lock().unwrap().push((
                application_id.to_string(),
                status.to_string(),
                actor_id.to_string(),
                reason.to_string(),
            ));
            if self.fail {
                Err(rejected("status"))
            } else {
                Ok(())
            }
        }
    }

    fn ctx() -> SessionContext {
        SessionContext::new("u1", "c1")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
    }

    #[test]
    fn test_dashboard_load_combines_sources() {
        let data = load_dashboard(&FakeApi::default(), &ctx(), 2025, today());
        assert_eq!(data.company.name, "Acme Labs");
        assert_eq!(data.stats.total_interns, 1);
        assert_eq!(data.stats.present_today, 1);
        // Stats endpoint failed: rate falls back to today's rows.
        assert!(data.month_stats.is_none());
        assert_eq!(data.stats.attendance_rate, 100.0);
        assert_eq!(data.year, 2025);
    }

    #[test]
    fn test_failed_loads_fall_back_to_defaults() {
        let api = FakeApi {
            fail: true,
            ..Default::default()
        };
        let data = load_dashboard(&api, &ctx(), 2025, today());
        assert_eq!(data.company, CompanyInfo::default());
        assert!(data.interns.is_empty());
        assert_eq!(data.stats, CompanyStats::default());
        assert_eq!(data.monthly, [0; 12]);
        assert!(load_interns(&api, &ctx()).is_empty());
        assert!(load_notifications(&api, &ctx()).is_empty());
    }

    #[test]
    fn test_intern_attendance_filters_to_student_newest_first() {
        let rows = load_intern_attendance(&FakeApi::default(), &ctx(), "s1", today());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, AttendanceStatus::Late);
        assert_eq!(rows[1].status, AttendanceStatus::Present);
    }

    #[test]
    fn test_remove_intern_sends_rejected_with_actor_and_reason() {
        let api = FakeApi::default();
        assert!(remove_intern(&api, &ctx(), "a1", "Ended early").is_ok());
        let calls = api.status_updates.lock().unwrap();
        assert_eq!(
            calls[0],
            (
                "a1".to_string(),
                "rejected".to_string(),
                "u1".to_string(),
                "Ended early".to_string()
            )
        );
    }

    #[test]
    fn test_actions_report_failure() {
        let api = FakeApi {
            fail: true,
            ..Default::default()
        };
        assert!(mark_read(&api, &ctx(), "n1").is_err());
        assert!(mark_all_read(&api, &ctx()).is_err());
        assert!(remove_intern(&api, &ctx(), "a1", "x").is_err());
    }

    fn drain(manager: &mut FetchManager, expected: usize) -> Vec<FetchResult> {
        let deadline = Instant::now() + StdDuration::from_secs(5);
        let mut out = Vec::new();
        while manager.is_busy() && Instant::now() < deadline {
            out.extend(manager.poll_results());
            std::thread::sleep(StdDuration::from_millis(5));
        }
        out.extend(manager.poll_results());
        assert!(out.len() <= expected);
        out
    }

    #[test]
    fn test_manager_delivers_results() {
        let mut manager = FetchManager::new(Arc::new(FakeApi::default()), ctx());
        manager.submit(FetchRequest::Notifications);
        manager.submit(FetchRequest::MarkAllRead);
        let results = drain(&mut manager, 2);
        assert_eq!(results.len(), 2);
        assert!(!manager.is_busy());
        assert!(results
            .iter()
            .any(|r| matches!(r, FetchResult::AllNotificationsRead { outcome: Ok(()) })));
    }

    #[test]
    fn test_manager_drops_superseded_loads() {
        let mut manager = FetchManager::new(Arc::new(FakeApi::default()), ctx());
        manager.submit(FetchRequest::Interns);
        manager.submit(FetchRequest::Interns);
        let results = drain(&mut manager, 2);
        // Only the second (generation 2) load survives.
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0],
            FetchResult::Interns { generation: 2, .. }
        ));
    }
}
