// InternDesk - core/stats.rs
//
// Derivations from fetched lists: the intern roster view, dashboard
// counters, and the monthly additions series that feeds the chart.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{
    Application, ApplicationStatus, AttendanceRecord, AttendanceStats, AttendanceStatus,
    CompanyStats, Intern, InternAttendance, InternPerformance, Notification,
};
use crate::util::constants::MONTHS_PER_YEAR;
use chrono::Datelike;

/// Build the roster view from application records.
///
/// Only approved applications become interns. Attendance, performance and
/// documents are placeholders; nothing in the roster response fills them.
pub fn interns_from_applications(applications: &[Application]) -> Vec<Intern> {
    applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::Approved)
        .map(|a| Intern {
            application_id: a.id.clone(),
            student_id: a.student_id.clone(),
            name: full_name(&a.first_name, &a.last_name),
            email: a.email.clone(),
            major: a.major.clone(),
            position: a.position.clone(),
            university: a.university.clone(),
            start_date: a.start_date,
            end_date: a.end_date,
            approved_at: a.approved_at.or(a.applied_at),
            attendance: InternAttendance::default(),
            performance: InternPerformance::default(),
            documents: Vec::new(),
        })
        .collect()
}

fn full_name(first: &str, last: &str) -> String {
    let name = format!("{} {}", first.trim(), last.trim());
    let name = name.trim();
    if name.is_empty() {
        "Unnamed intern".to_string()
    } else {
        name.to_string()
    }
}

/// Dashboard counters.
///
/// Today's present/late/absent counts come from today's attendance rows.
/// The attendance rate prefers the aggregate range statistics and falls
/// back to today's rows when the aggregate is unavailable.
pub fn company_stats(
    interns: &[Intern],
    today: &[AttendanceRecord],
    range: Option<&AttendanceStats>,
) -> CompanyStats {
    let mut present = 0u32;
    let mut late = 0u32;
    let mut absent = 0u32;
    for record in today {
        match record.status {
            AttendanceStatus::Present => present += 1,
            AttendanceStatus::Late => late += 1,
            AttendanceStatus::Absent => absent += 1,
        }
    }

    let attendance_rate = match range {
        Some(stats) if stats.total_records > 0 => stats.attendance_rate(),
        _ => AttendanceStats {
            total_records: present + late + absent,
            present,
            late,
            absent,
        }
        .attendance_rate(),
    };

    CompanyStats {
        total_interns: u32::try_from(interns.len()).unwrap_or(u32::MAX),
        present_today: present,
        late_today: late,
        absent_today: absent,
        attendance_rate,
    }
}

/// Count approved interns per month of `year`.
///
/// Each intern is bucketed by approval date, falling back to the application
/// date; interns with neither are not charted.
pub fn monthly_additions(interns: &[Intern], year: i32) -> [u32; MONTHS_PER_YEAR] {
    let mut months = [0u32; MONTHS_PER_YEAR];
    for intern in interns {
        let Some(when) = intern.approved_at else {
            continue;
        };
        if when.year() != year {
            continue;
        }
        let idx = when.month0() as usize;
        if let Some(slot) = months.get_mut(idx) {
            *slot = slot.saturating_add(1);
        }
    }
    months
}

/// Number of unread notifications.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_application(id: &str, status: ApplicationStatus, month: u32) -> Application {
        Application {
            id: id.to_string(),
            student_id: format!("S-{id}"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            status,
            approved_at: Some(Utc.with_ymd_and_hms(2025, month, 3, 9, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    fn make_record(status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_only_approved_applications_become_interns() {
        let apps = vec![
            make_application("1", ApplicationStatus::Approved, 1),
            make_application("2", ApplicationStatus::Pending, 1),
            make_application("3", ApplicationStatus::Rejected, 2),
        ];
        let interns = interns_from_applications(&apps);
        assert_eq!(interns.len(), 1);
        assert_eq!(interns[0].application_id, "1");
        assert_eq!(interns[0].name, "Ada Lovelace");
        assert_eq!(interns[0].attendance, InternAttendance::default());
        assert!(interns[0].documents.is_empty());
    }

    #[test]
    fn test_blank_names_get_placeholder() {
        let app = Application {
            status: ApplicationStatus::Approved,
            ..Default::default()
        };
        assert_eq!(interns_from_applications(&[app])[0].name, "Unnamed intern");
    }

    #[test]
    fn test_company_stats_counts_today() {
        let interns = interns_from_applications(&[
            make_application("1", ApplicationStatus::Approved, 1),
            make_application("2", ApplicationStatus::Approved, 1),
            make_application("3", ApplicationStatus::Approved, 1),
        ]);
        let today = vec![
            make_record(AttendanceStatus::Present),
            make_record(AttendanceStatus::Late),
            make_record(AttendanceStatus::Absent),
        ];
        let stats = company_stats(&interns, &today, None);
        assert_eq!(stats.total_interns, 3);
        assert_eq!(stats.present_today, 1);
        assert_eq!(stats.late_today, 1);
        assert_eq!(stats.absent_today, 1);
        // Fallback rate from today's rows: 2 of 3 showed up.
        assert!((stats.attendance_rate - 66.666_67).abs() < 0.01);
    }

    #[test]
    fn test_company_stats_prefers_range_aggregate() {
        let range = AttendanceStats {
            total_records: 10,
            present: 8,
            late: 1,
            absent: 1,
        };
        let stats = company_stats(&[], &[], Some(&range));
        assert!((stats.attendance_rate - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_company_stats_empty_inputs_are_zero() {
        let stats = company_stats(&[], &[], Some(&AttendanceStats::default()));
        assert_eq!(stats, CompanyStats::default());
    }

    #[test]
    fn test_monthly_additions_buckets_by_year_and_month() {
        let mut apps = vec![
            make_application("1", ApplicationStatus::Approved, 1),
            make_application("2", ApplicationStatus::Approved, 1),
            make_application("3", ApplicationStatus::Approved, 3),
        ];
        let mut other_year = make_application("4", ApplicationStatus::Approved, 3);
        other_year.approved_at = Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        apps.push(other_year);
        let mut undated = make_application("5", ApplicationStatus::Approved, 1);
        undated.approved_at = None;
        apps.push(undated);

        let interns = interns_from_applications(&apps);
        let months = monthly_additions(&interns, 2025);
        assert_eq!(months, [2, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_unread_count() {
        let notes = vec![
            Notification {
                is_read: false,
                ..Default::default()
            },
            Notification {
                is_read: true,
                ..Default::default()
            },
        ];
        assert_eq!(unread_count(&notes), 1);
    }
}
