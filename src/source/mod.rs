// Schedule sources: spreadsheet exports on disk or stdin

pub mod csv_import;

pub use csv_import::*;

use crate::models::ScheduleTable;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

/// Where a schedule export is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSource {
    File(PathBuf),
    Stdin,
}

impl ScheduleSource {
    /// `-` means stdin, anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            ScheduleSource::Stdin
        } else {
            ScheduleSource::File(PathBuf::from(arg))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ScheduleSource::File(path) => path.display().to_string(),
            ScheduleSource::Stdin => "<stdin>".to_string(),
        }
    }

    /// Read and parse the export
    pub fn load(&self) -> Result<ScheduleTable, SourceError> {
        log::debug!("loading schedule from {}", self.describe());
        match self {
            ScheduleSource::File(path) => {
                let file = File::open(path).map_err(|e| SourceError::Open {
                    path: path.clone(),
                    source: e,
                })?;
                parse_schedule_csv(file)
            }
            ScheduleSource::Stdin => {
                let mut buf = Vec::new();
                io::stdin().read_to_end(&mut buf)?;
                parse_schedule_csv(buf.as_slice())
            }
        }
    }
}
