//! Per-session file naming for chat front ends
//!
//! Paths are keyed only by the session id, so two concurrent requests from
//! the same session share files. Serializing them is up to the caller.

use crate::constants::OUTPUT_FILE_PREFIX;
use crate::types::Result;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Temporary input and output paths for one chat session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl SessionPaths {
    pub fn for_session(temp_dir: impl AsRef<Path>, session_id: impl Display) -> Self {
        let temp_dir = temp_dir.as_ref();
        Self {
            input: temp_dir.join(format!("input_{}.csv", session_id)),
            output: temp_dir.join(format!("output_{}.pdf", session_id)),
        }
    }

    /// Remove both files; files that are already gone are not an error.
    pub async fn cleanup(&self) -> Result<()> {
        for path in [&self.input, &self.output] {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// User-facing file name, e.g. `indicador-precios-2024-03-05_14-07.pdf`
pub fn output_file_name<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!(
        "{}-{}.pdf",
        OUTPUT_FILE_PREFIX,
        timestamp.format("%Y-%m-%d_%H-%M")
    )
}

const UPLOAD_EXTENSIONS: [&str; 2] = ["xlsx", "csv"];

/// Whether an uploaded file looks like a spreadsheet we can read
pub fn is_supported_upload(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| UPLOAD_EXTENSIONS.iter().any(|u| ext.eq_ignore_ascii_case(u)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_session_paths() {
        let paths = SessionPaths::for_session("/tmp", 42);
        assert_eq!(paths.input, PathBuf::from("/tmp/input_42.csv"));
        assert_eq!(paths.output, PathBuf::from("/tmp/output_42.pdf"));
    }

    #[test]
    fn test_output_file_name() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 59).unwrap();
        assert_eq!(output_file_name(&ts), "indicador-precios-2024-03-05_14-07.pdf");
    }

    #[test]
    fn test_supported_upload() {
        assert!(is_supported_upload("precios.csv"));
        assert!(is_supported_upload("PRECIOS.CSV"));
        assert!(is_supported_upload("precios.xlsx"));
        assert!(!is_supported_upload("precios.pdf"));
        assert!(!is_supported_upload("csv"));
    }
}
