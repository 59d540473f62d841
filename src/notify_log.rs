use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const NOTIFY_LOG_FILE: &str = "notifications.log";

/// Append one notification to the log file beside the executable. The sink
/// is fire-and-forget; write failures are ignored.
pub fn append(msg: &str) {
    append_to(Path::new(NOTIFY_LOG_FILE), msg);
}

pub fn append_to(path: &Path, msg: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{} - {}", Local::now().to_rfc3339(), msg);
    }
}
