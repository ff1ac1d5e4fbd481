//! Append-only CSV results file, one row per completed run.

use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

use crate::{
    error::{Result, SweepError},
    sweep::samples::Metric,
};

/// Decimal places used for the metric column.
pub const METRIC_PRECISION: usize = 4;

/// One completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub test_case: String,
    pub spawn_count: u32,
    pub metric: f64,
    pub total_collision_checks: u64,
}

/// Writes [`ResultRow`]s to a CSV file, emitting the header before the first row.
///
/// The first row of a report truncates any earlier file at the same path.
/// Every row is flushed as soon as it is written, so an interrupted sweep
/// leaves a valid partial file.
#[derive(Debug)]
pub struct CsvReport {
    path: PathBuf,
    metric: Metric,
    header_written: bool,
    rows_written: usize,
}

impl CsvReport {
    pub fn new(path: impl Into<PathBuf>, metric: Metric) -> Self {
        Self {
            path: path.into(),
            metric,
            header_written: false,
            rows_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn header(&self) -> [&'static str; 4] {
        ["testCase", "spawnCount", self.metric.column_name(), "totalCollisionChecks"]
    }

    pub fn append(&mut self, row: &ResultRow) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
            self.header_written = true;
        }

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        let mut writer = csv_writer(file);
        writer.write_record([
            row.test_case.clone(),
            row.spawn_count.to_string(),
            format!("{:.*}", METRIC_PRECISION, row.metric),
            row.total_collision_checks.to_string(),
        ])?;
        writer.flush().map_err(|source| self.io_error(source))?;

        self.rows_written += 1;
        Ok(())
    }

    fn write_header(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let file = File::create(&self.path).map_err(|source| self.io_error(source))?;
        let mut writer = csv_writer(file);
        writer.write_record(self.header())?;
        writer.flush().map_err(|source| self.io_error(source))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> SweepError {
        SweepError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

// Header and rows share quoting rules and the `\n` terminator.
fn csv_writer(file: File) -> csv::Writer<File> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(count: u32, metric: f64, checks: u64) -> ResultRow {
        ResultRow {
            test_case: "Cube".into(),
            spawn_count: count,
            metric,
            total_collision_checks: checks,
        }
    }

    #[test]
    fn header_precedes_first_row_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut report = CsvReport::new(&path, Metric::AverageDeltaTime);

        report.append(&row(200, 0.016_666, 12)).unwrap();
        report.append(&row(500, 0.02, 40)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "testCase,spawnCount,averageDeltaTime,totalCollisionChecks\n\
             Cube,200,0.0167,12\n\
             Cube,500,0.0200,40\n"
        );
        assert_eq!(report.rows_written(), 2);
    }

    #[test]
    fn fps_metric_changes_header_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fps.csv");
        let mut report = CsvReport::new(&path, Metric::AverageFps);
        report.append(&row(1, 60.0, 0)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("testCase,spawnCount,averageFps,totalCollisionChecks\n"));
        assert!(contents.ends_with("Cube,1,60.0000,0\n"));
    }

    #[test]
    fn first_row_replaces_stale_file_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("results.csv");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "old,data\n").unwrap();

        let mut report = CsvReport::new(&path, Metric::AverageDeltaTime);
        report.append(&row(3, 0.5, 1)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("old,data"));
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn labels_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quoted.csv");
        let mut report = CsvReport::new(&path, Metric::AverageDeltaTime);
        let mut quoted = row(2, 0.0, 0);
        quoted.test_case = "Compound, large".into();
        report.append(&quoted).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Compound, large\",2,0.0000,0\n"));
    }

    #[test]
    fn header_and_rows_parse_back_with_csv_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parsed.csv");
        let mut report = CsvReport::new(&path, Metric::AverageDeltaTime);
        let mut quoted = row(4, 0.25, 8);
        quoted.test_case = "Hull \"A\", convex".into();
        report.append(&quoted).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), report.header().to_vec());
        let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "Hull \"A\", convex");
        assert_eq!(&records[0][2], "0.2500");
    }

    #[test]
    fn unwritable_path_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as the results file.
        let mut report = CsvReport::new(dir.path(), Metric::AverageDeltaTime);
        assert!(matches!(report.append(&row(1, 0.0, 0)), Err(SweepError::Io { .. })));
    }
}
