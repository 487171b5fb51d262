// InternDesk - core/export.rs
//
// CSV and JSON export of the (filtered) interns roster.
// Core layer: writes to any Write trait object.

use crate::core::model::Intern;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export interns to CSV format.
///
/// Writes: application_id, student_id, name, email, major, position,
/// university, start_date, end_date
pub fn export_csv<W: Write>(
    interns: &[&Intern],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    csv_writer
        .write_record([
            "application_id",
            "student_id",
            "name",
            "email",
            "major",
            "position",
            "university",
            "start_date",
            "end_date",
        ])
        .map_err(csv_err)?;

    let mut count = 0;
    for intern in interns {
        let start = intern.start_date.map(|d| d.to_string()).unwrap_or_default();
        let end = intern.end_date.map(|d| d.to_string()).unwrap_or_default();

        csv_writer
            .write_record([
                intern.application_id.as_str(),
                &intern.student_id,
                &intern.name,
                &intern.email,
                &intern.major,
                &intern.position,
                &intern.university,
                &start,
                &end,
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export interns to JSON format (array of objects).
pub fn export_json<W: Write>(
    interns: &[&Intern],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, interns).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(interns.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_intern(id: &str, name: &str) -> Intern {
        Intern {
            application_id: id.to_string(),
            student_id: format!("S-{id}"),
            name: name.to_string(),
            major: "Computer Science".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 2),
            ..Default::default()
        }
    }

    #[test]
    fn test_csv_export() {
        let a = make_intern("1", "Maria Santos");
        let b = make_intern("2", "Reyes, John");
        let mut buf = Vec::new();
        let count = export_csv(&[&a, &b], &mut buf, Path::new("roster.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("application_id,student_id,name"));
        assert!(output.contains("Maria Santos"));
        // Commas inside a field must be quoted.
        assert!(output.contains("\"Reyes, John\""));
        assert!(output.contains("2025-06-02"));
    }

    #[test]
    fn test_json_export() {
        let a = make_intern("1", "Ana Cruz");
        let mut buf = Vec::new();
        let count = export_json(&[&a], &mut buf, Path::new("roster.json")).unwrap();
        assert_eq!(count, 1);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["name"], "Ana Cruz");
        assert_eq!(value[0]["student_id"], "S-1");
    }
}
