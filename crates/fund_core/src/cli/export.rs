//! CSV export of report tables.

use std::path::Path;

use growfund_core::ReportTable;

use crate::cli::core::CommandError;

/// Writes a report as CSV: the header list, then one record per row.
/// The writer handles delimiter and quote escaping, so embedded commas
/// in names or reasons survive a round trip.
pub fn write_report_csv(report: &ReportTable, path: &Path) -> Result<(), CommandError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|err| CommandError::Command(format!("cannot open {}: {}", path.display(), err)))?;
    writer
        .write_record(&report.headers)
        .map_err(|err| CommandError::Command(err.to_string()))?;
    for row in &report.rows {
        writer
            .write_record(row)
            .map_err(|err| CommandError::Command(err.to_string()))?;
    }
    writer
        .flush()
        .map_err(|err| CommandError::Command(err.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_delimiters_are_escaped() {
        let report = ReportTable {
            title: "Penalties".into(),
            headers: vec!["ID".into(), "Reason".into()],
            rows: vec![vec!["PEN001".into(), "Late, with excuses".into()]],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("penalties.csv");

        write_report_csv(&report, &path).expect("write csv");
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"Late, with excuses\""));

        let mut reader = csv::Reader::from_path(&path).expect("read back");
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "Late, with excuses");
    }
}
