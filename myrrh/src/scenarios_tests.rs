/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! End-to-end scenario tests exercising whole-policy and whole-log behavior,
//! as distinct from the per-module unit tests living alongside each type.

#![cfg(test)]

use std::fmt::Write as _;
use std::fs;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::log::{BufferSink, Log, Severity};
use crate::policy::{recipes, Opener, Path, PathPart};
use crate::tests_support::scratch_dir;

#[test]
fn appender_picks_the_numerically_latest_file_among_siblings() {
    let dir = scratch_dir("scenario-appender-latest");
    for name in [
        "myrrh2.log",
        "myrrh10.log",
        "myrrh01.log",
        "myrrh11.log",
        "myrrh1234.log",
        "myrrh1300.log",
    ] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }

    let mut path = Path::with_parent(dir.path());
    path.add_text("myrrh").unwrap();
    path.add_part(PathPart::index()).unwrap();
    path.add_text(".log").unwrap();

    let handle = Opener::Appender.open(&mut path);
    assert_eq!(handle.path().file_name().unwrap(), "myrrh1300.log");
}

#[test]
fn resizer_crops_to_whole_lines_before_the_next_write_lands() {
    let dir = scratch_dir("scenario-resize-crop");
    let path_buf = dir.path().join("myrrh.log");
    let line = b"Original content\n";
    fs::write(&path_buf, line.repeat(6)).unwrap();

    let mut path = Path::with_parent(dir.path());
    path.add_text("myrrh.log").unwrap();

    let mut handle = Opener::Resizer(64).open(&mut path);
    assert_eq!(handle.written_size(), 3 * line.len() as u64);

    handle.write("New content\n");

    let contents = fs::read(&path_buf).unwrap();
    let mut expected = line.repeat(3);
    expected.extend_from_slice(b"New content\n");
    assert_eq!(contents, expected);
    assert_eq!(contents.len(), 63);
}

#[test]
fn size_restricted_log_stays_under_its_cap_across_many_writes() {
    let dir = scratch_dir("scenario-size-restricted-log");
    let mut path = Path::with_parent(dir.path());
    path.add_text("myrrh.log").unwrap();

    let mut policy = recipes::size_restricted_log(path, 100);
    for _ in 0..15 {
        policy.write(&format!("{}\n", "x".repeat(19)));
        let size = fs::metadata(policy.current_path()).unwrap().len();
        assert!(size <= 100, "file grew past its configured cap: {size}");
    }
}

#[test]
fn size_restricted_logs_spread_writes_across_time_ordered_files() {
    let dir = scratch_dir("scenario-size-restricted-logs");
    let mut path = Path::with_parent(dir.path());
    path.add_text("myrrh").unwrap();
    path.add_part(PathPart::time()).unwrap();
    path.add_text(".log").unwrap();

    let mut policy = recipes::size_restricted_logs(path, 100);
    let mut written = 0u64;
    for _ in 0..25 {
        let line = format!("{}\n", "x".repeat(19));
        written += line.len() as u64;
        policy.write(&line);
    }

    let file_count = fs::read_dir(dir.path()).unwrap().count();
    assert!(file_count > 1, "expected rotation into more than one file");

    let total: u64 = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.metadata().unwrap().len())
        .sum();
    assert_eq!(total, written);
}

#[test]
fn dated_folder_log_places_its_file_under_todays_date_folder() {
    let dir = scratch_dir("scenario-dated-folder");
    let today = chrono::Local::now().format("%Y%m%d").to_string();

    let mut policy = recipes::dated_folder_log(dir.path().to_str().unwrap(), "myrrh.log").unwrap();
    policy.write("hello\n");

    let expected = dir.path().join(&today).join("myrrh.log");
    assert_eq!(policy.current_path(), expected);
    assert_eq!(fs::read_to_string(expected).unwrap(), "hello\n");
}

#[test]
fn concurrent_writers_never_interleave_and_every_line_survives() {
    let log = Arc::new(Log::new());
    log.set_global_level(Severity::Trace);
    let buf = Arc::new(Mutex::new(Vec::new()));
    let _guard = log.add_target(Box::new(BufferSink(buf.clone())), Severity::Trace);

    const THREADS: usize = 10;
    const RECORDS_PER_THREAD: usize = 60;

    thread::scope(|scope| {
        for t in 0..THREADS {
            let log = &log;
            scope.spawn(move || {
                for i in 0..RECORDS_PER_THREAD {
                    let mut record = log.record(Severity::Info);
                    let _ = write!(record, "thread {t} record {i}");
                }
            });
        }
    });

    let contents = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), THREADS * RECORDS_PER_THREAD);

    for line in &lines {
        assert!(line.contains(" I "), "missing severity id in {line:?}");
        let field_count = line.split(' ').count();
        assert!(field_count >= 4, "malformed header in {line:?}");
    }
    assert!(contents.ends_with('\n'));
}
