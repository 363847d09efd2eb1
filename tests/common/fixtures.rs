//! Static log corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of JSON lines in the feed
//! format. [`write_fixture`] puts one on disk for the file feed.

use std::io::Write;

/// Well-formed records covering every optional field combination.
pub const CORPUS_JSONL: &[&str] = &[
    r#"{"id":"req-1","timestamp":"2024-01-15T10:00:00Z","message":"Server started on port 8080","source":"api","level":2}"#,
    r#"{"id":"req-2","timestamp":"2024-01-15T10:00:01Z","message":"Connection refused by db.internal","source":"api","level":0}"#,
    r#"{"id":"req-3","timestamp":"2024-01-15T10:00:02Z","message":"Slow query took 4200ms","source":"db","level":1}"#,
    r#"{"id":"req-4","message":"payment gateway timeout","source":"payments"}"#,
    r#"{"id":"req-5","message":"Token validated for usr-999"}"#,
    r#"{"message":"worker crashed with exit code 137","source":"worker"}"#,
];

/// Lines a feed must skip without stopping.
pub const CORPUS_BAD: &[&str] = &[
    "",
    "plain text is not a record",
    r#"{"id":"no-message","level":0}"#,
    r#"{"id":"truncated","message":"cut of"#,
];

/// `n` JSON lines with ids `id-0..n` and messages `log line {i}`.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            format!(
                r#"{{"id":"id-{i}","timestamp":"2024-01-15T{:02}:{:02}:{:02}Z","message":"log line {i}","source":"producer-{}","level":{}}}"#,
                i / 3600 % 24,
                i / 60 % 60,
                i % 60,
                i % 3,
                i % 4,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixture file generation helpers
// ---------------------------------------------------------------------------

/// Write `lines` to a fresh temp file, one per line.
pub fn write_fixture<S: AsRef<str>>(lines: &[S]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp fixture");
    for line in lines {
        writeln!(file, "{}", line.as_ref()).expect("write fixture line");
    }
    file.flush().expect("flush fixture");
    file
}
