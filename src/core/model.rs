// InternDesk - core/model.rs
//
// Core data model: display records mirrored from the portal API.
// Every type here is a read-only snapshot of backend state; nothing is
// persisted locally and nothing outlives the screen that fetched it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// API envelope
// =============================================================================

/// Wire envelope shared by every portal API response.
///
/// `data` is only meaningful when `success` is true; `message` usually
/// accompanies a failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

// =============================================================================
// Lenient field decoding
// =============================================================================

/// Field decoders for loosely-typed backend JSON. A present-but-`null` value
/// takes the field's default, and scalar ids may arrive as numbers.
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Flag(bool),
    }

    impl Scalar {
        fn into_text(self) -> String {
            match self {
                Self::Text(s) => s,
                Self::Int(n) => n.to_string(),
                Self::Float(f) => f.to_string(),
                Self::Flag(b) => b.to_string(),
            }
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(Option::<Scalar>::deserialize(d)?
            .map(Scalar::into_text)
            .unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Scalar>::deserialize(d)?.map(Scalar::into_text))
    }

    /// Status-like enums parsed from their string form.
    pub fn parsed<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: From<String> + Default,
    {
        Ok(Option::<Scalar>::deserialize(d)?
            .map(|s| T::from(s.into_text()))
            .unwrap_or_default())
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Option::<Scalar>::deserialize(d)? {
            Some(Scalar::Flag(b)) => b,
            Some(Scalar::Int(n)) => n != 0,
            Some(Scalar::Float(f)) => f != 0.0,
            Some(Scalar::Text(s)) => {
                matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes")
            }
            None => false,
        })
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        Ok(match Option::<Scalar>::deserialize(d)? {
            Some(Scalar::Int(n)) => n.clamp(0, i64::from(u32::MAX)) as u32,
            Some(Scalar::Float(f)) if f.is_finite() && f > 0.0 => f.min(u32::MAX as f64) as u32,
            Some(Scalar::Text(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        })
    }
}

// =============================================================================
// Company profile
// =============================================================================

/// Memorandum-of-Agreement state between the company and the university.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MoaStatus {
    Active,
    Pending,
    Expired,
    #[default]
    None,
}

impl From<String> for MoaStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "active" | "approved" | "signed" => Self::Active,
            "pending" | "processing" => Self::Pending,
            "expired" => Self::Expired,
            _ => Self::None,
        }
    }
}

impl MoaStatus {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "MOA Active",
            Self::Pending => "MOA Pending",
            Self::Expired => "MOA Expired",
            Self::None => "No MOA",
        }
    }
}

/// Company profile as returned by the profile endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub industry: String,
    #[serde(deserialize_with = "lenient::string")]
    pub contact_person: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub website: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::parsed")]
    pub moa_status: MoaStatus,
    pub moa_expires: Option<NaiveDate>,
}

impl CompanyInfo {
    /// Name to show in headers; falls back when the backend sent none.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Your Company"
        } else {
            &self.name
        }
    }
}

// =============================================================================
// Applications and interns
// =============================================================================

/// Lifecycle state of an internship application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "approved" | "accepted" => Self::Approved,
            "rejected" | "declined" => Self::Rejected,
            "withdrawn" | "cancelled" => Self::Withdrawn,
            _ => Self::Pending,
        }
    }
}

/// An internship application record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub student_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub major: String,
    #[serde(deserialize_with = "lenient::string")]
    pub position: String,
    #[serde(deserialize_with = "lenient::string")]
    pub university: String,
    #[serde(deserialize_with = "lenient::parsed")]
    pub status: ApplicationStatus,
    pub applied_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Attendance summary attached to an intern view.
///
/// Placeholder: always default-initialised; the roster endpoint does not
/// carry per-intern attendance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InternAttendance {
    pub present_days: u32,
    pub late_days: u32,
    pub absent_days: u32,
    pub rate: f32,
}

/// Performance summary attached to an intern view. Placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InternPerformance {
    pub rating: Option<f32>,
    pub remarks: String,
}

/// A submitted document reference attached to an intern view. Placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InternDocument {
    pub name: String,
    pub submitted: bool,
}

/// Local view of an approved application ("current intern").
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Intern {
    /// Application id; the key used for status updates.
    pub application_id: String,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub major: String,
    pub position: String,
    pub university: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub approved_at: Option<DateTime<Utc>>,
    pub attendance: InternAttendance,
    pub performance: InternPerformance,
    pub documents: Vec<InternDocument>,
}

// =============================================================================
// Attendance
// =============================================================================

/// Attendance status of one intern for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AttendanceStatus {
    Present,
    Late,
    #[default]
    Absent,
}

impl From<String> for AttendanceStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "present" | "on_time" | "on-time" => Self::Present,
            "late" | "tardy" => Self::Late,
            _ => Self::Absent,
        }
    }
}

impl AttendanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Late => "Late",
            Self::Absent => "Absent",
        }
    }
}

/// One attendance row. Times are kept as the backend's display strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub student_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub intern_name: String,
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::parsed")]
    pub status: AttendanceStatus,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub am_time_in: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub am_time_out: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub pm_time_in: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub pm_time_out: Option<String>,
}

/// Aggregate attendance counts for a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceStats {
    #[serde(deserialize_with = "lenient::count")]
    pub total_records: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub present: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub late: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub absent: u32,
}

impl AttendanceRecord {
    /// Morning session as "in - out", with `--` for a missing punch.
    pub fn morning(&self) -> String {
        session_span(&self.am_time_in, &self.am_time_out)
    }

    /// Afternoon session as "in - out".
    pub fn afternoon(&self) -> String {
        session_span(&self.pm_time_in, &self.pm_time_out)
    }
}

fn session_span(time_in: &Option<String>, time_out: &Option<String>) -> String {
    let punch = |t: &Option<String>| match t.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => "--".to_string(),
    };
    format!("{} - {}", punch(time_in), punch(time_out))
}

impl AttendanceStats {
    /// Percentage of records where the intern showed up (present or late).
    /// Zero when there are no records.
    pub fn attendance_rate(&self) -> f32 {
        if self.total_records == 0 {
            return 0.0;
        }
        (self.present + self.late) as f32 * 100.0 / self.total_records as f32
    }
}

/// Optional date range applied to attendance queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// =============================================================================
// Dashboard counters
// =============================================================================

/// Counters shown on the dashboard. Recomputed from fetched lists.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompanyStats {
    pub total_interns: u32,
    pub present_today: u32,
    pub late_today: u32,
    pub absent_today: u32,
    /// Percentage, 0.0-100.0.
    pub attendance_rate: f32,
}

// =============================================================================
// Notifications
// =============================================================================

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NotificationKind {
    Application,
    Attendance,
    Document,
    #[default]
    System,
    Reminder,
}

impl From<String> for NotificationKind {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "application" => Self::Application,
            "attendance" => Self::Attendance,
            "document" | "documents" => Self::Document,
            "reminder" => Self::Reminder,
            _ => Self::System,
        }
    }
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::Attendance => "Attendance",
            Self::Document => "Document",
            Self::System => "System",
            Self::Reminder => "Reminder",
        }
    }
}

/// One notification in the company feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "lenient::parsed")]
    pub kind: NotificationKind,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub message: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_read: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_important: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub action_required: bool,
}

/// Feed filter chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Important,
    ActionRequired,
}

impl NotificationFilter {
    /// All filters in chip display order.
    pub fn all() -> &'static [NotificationFilter] {
        &[
            Self::All,
            Self::Unread,
            Self::Important,
            Self::ActionRequired,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Unread => "Unread",
            Self::Important => "Important",
            Self::ActionRequired => "Action required",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_missing_optional_fields() {
        let env: ApiEnvelope<CompanyInfo> =
            serde_json::from_str(r#"{"success":true,"data":{"name":"Acme"}}"#).unwrap();
        assert!(env.success);
        let company = env.data.unwrap();
        assert_eq!(company.name, "Acme");
        assert_eq!(company.moa_status, MoaStatus::None);
        assert!(company.website.is_none());
    }

    #[test]
    fn test_failed_envelope_has_no_data() {
        let env: ApiEnvelope<Vec<Notification>> =
            serde_json::from_str(r#"{"success":false,"message":"denied"}"#).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("denied"));
    }

    #[test]
    fn test_status_strings_are_case_insensitive() {
        let rec: AttendanceRecord =
            serde_json::from_str(r#"{"id":"a1","status":"LATE","am_time_in":"08:15"}"#).unwrap();
        assert_eq!(rec.status, AttendanceStatus::Late);
        assert_eq!(rec.am_time_in.as_deref(), Some("08:15"));

        let app: Application = serde_json::from_str(r#"{"status":"Approved"}"#).unwrap();
        assert_eq!(app.status, ApplicationStatus::Approved);
    }

    #[test]
    fn test_unknown_notification_kind_is_system() {
        let n: Notification =
            serde_json::from_str(r#"{"id":"n1","type":"billing","is_read":true}"#).unwrap();
        assert_eq!(n.kind, NotificationKind::System);
        assert!(n.is_read);
        assert!(!n.action_required);
    }

    #[test]
    fn test_null_fields_and_numeric_ids_take_defaults() {
        let env: ApiEnvelope<Vec<Application>> = serde_json::from_str(
            r#"{"success":true,"data":[
                {"id":"a1","student_id":"S1","first_name":"Ana","major":"CS","status":"approved"},
                {"id":42,"student_id":null,"first_name":"Ben","major":null,"status":null}
            ]}"#,
        )
        .unwrap();
        let apps = env.data.unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[1].id, "42");
        assert_eq!(apps[1].student_id, "");
        assert_eq!(apps[1].major, "");
        assert_eq!(apps[1].status, ApplicationStatus::Pending);

        let n: Notification = serde_json::from_str(
            r#"{"id":17,"type":null,"title":null,"is_read":null,"is_important":1}"#,
        )
        .unwrap();
        assert_eq!(n.id, "17");
        assert_eq!(n.kind, NotificationKind::System);
        assert!(!n.is_read);
        assert!(n.is_important);

        let rec: AttendanceRecord =
            serde_json::from_str(r#"{"id":5,"intern_name":null,"am_time_out":null}"#).unwrap();
        assert_eq!(rec.id, "5");
        assert!(rec.am_time_out.is_none());

        let stats: AttendanceStats =
            serde_json::from_str(r#"{"total_records":null,"present":"3","late":2}"#).unwrap();
        assert_eq!((stats.total_records, stats.present, stats.late), (0, 3, 2));

        let company: CompanyInfo =
            serde_json::from_str(r#"{"id":9,"name":null,"moa_status":null}"#).unwrap();
        assert_eq!(company.id, "9");
        assert_eq!(company.display_name(), "Your Company");
        assert_eq!(company.moa_status, MoaStatus::None);
    }

    #[test]
    fn test_attendance_sessions_show_both_punches() {
        let rec = AttendanceRecord {
            am_time_in: Some("08:02".to_string()),
            am_time_out: Some("12:00".to_string()),
            pm_time_in: Some(" ".to_string()),
            pm_time_out: Some("17:05".to_string()),
            ..Default::default()
        };
        assert_eq!(rec.morning(), "08:02 - 12:00");
        assert_eq!(rec.afternoon(), "-- - 17:05");
        assert_eq!(AttendanceRecord::default().morning(), "-- - --");
    }

    #[test]
    fn test_attendance_rate_without_records_is_zero() {
        assert_eq!(AttendanceStats::default().attendance_rate(), 0.0);
        let stats = AttendanceStats {
            total_records: 4,
            present: 2,
            late: 1,
            absent: 1,
        };
        assert!((stats.attendance_rate() - 75.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_company_display_name_fallback() {
        assert_eq!(CompanyInfo::default().display_name(), "Your Company");
    }
}
