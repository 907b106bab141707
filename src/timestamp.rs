//! Last-modified resolution: git commit time, then filesystem mtime,
//! then the current wall clock. Each step downgrades silently so the
//! caller always receives a valid timestamp string.

use std::{
    io::Read,
    path::Path,
    process::{Child, Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use log::{debug, warn};

/// Source of per-file commit times. The real implementation shells out to
/// git; tests substitute canned results to exercise the fallback chain.
pub trait CommitTimeSource {
    fn last_commit_epoch(&self, path: &Path) -> Option<i64>;
}

/// Queries `git log -1 --format=%ct -- <path>` with a bounded wait.
pub struct GitCli {
    timeout: Duration,
}

impl GitCli {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommitTimeSource for GitCli {
    fn last_commit_epoch(&self, path: &Path) -> Option<i64> {
        let child = Command::new("git")
            .args(["log", "-1", "--format=%ct", "--"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .ok()?;

        let stdout = wait_with_timeout(child, self.timeout)?;
        String::from_utf8_lossy(&stdout).trim().parse::<i64>().ok()
    }
}

// try_wait polling; the output of `git log -1 --format=%ct` is a handful
// of bytes, so reading stdout after exit cannot block on a full pipe.
fn wait_with_timeout(mut child: Child, timeout: Duration) -> Option<Vec<u8>> {
    let mut stdout = child.stdout.take()?;
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    return None;
                }
                let mut buf = Vec::new();
                stdout.read_to_end(&mut buf).ok()?;
                return Some(buf);
            }
            Ok(None) => {
                if start.elapsed() >= timeout {
                    warn!("git log timed out after {timeout:?}, killing");
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                thread::sleep(Duration::from_millis(10));
            }
            Err(_) => return None,
        }
    }
}

/// Resolve the last-modified instant for `path` as an RFC 3339 UTC string
/// with a `Z` suffix. Never fails: git errors fall back to the filesystem
/// mtime, and an unreadable mtime falls back to the current time.
pub fn resolve_mtime(path: &Path, commit_times: &dyn CommitTimeSource) -> String {
    if let Some(epoch) = commit_times.last_commit_epoch(path) {
        if let Some(instant) = Utc.timestamp_opt(epoch, 0).single() {
            return format_instant(instant);
        }
    }

    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => format_instant(DateTime::<Utc>::from(modified)),
        Err(e) => {
            debug!("mtime unavailable for {path:?} ({e}), using current time");
            format_instant(Utc::now())
        }
    }
}

pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
