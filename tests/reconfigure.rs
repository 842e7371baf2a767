// SPDX-License-Identifier: MIT OR Apache-2.0

//! The full setup path: reconfigure the process-wide logger into
//! per-severity file mode, emit through the macros, and inspect the files.
//!
//! This lives in its own integration test binary because it consumes the
//! one supported reconfiguration of the process-wide logger.

use logfan::Severity;

fn file_for(dir: &std::path::Path, severity: Severity) -> String {
    let tag = format!(".log.{}.", severity.name());
    let entry = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap())
        .find(|entry| entry.file_name().to_string_lossy().contains(&tag))
        .unwrap_or_else(|| panic!("no file for {severity}"));
    std::fs::read_to_string(entry.path()).unwrap()
}

#[test]
fn warning_lands_in_warning_info_and_debug_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = logfan::Config {
        log_to_stderr: false,
        directory: dir.path().to_path_buf(),
        threshold: Severity::Debug,
        ..logfan::Config::default()
    };
    logfan::global::reconfigure(&config).unwrap();

    logfan::warning!("cascaded {}", "once");

    for severity in [Severity::Warning, Severity::Info, Severity::Debug] {
        let contents = file_for(dir.path(), severity);
        assert!(
            contents.contains("cascaded once"),
            "{severity} file should hold the line: {contents:?}"
        );
        assert_eq!(contents.matches("cascaded once").count(), 1);
        assert!(contents.ends_with('\n'));
        // The macro captured this file and the enclosing test function.
        assert!(contents.contains("reconfigure.rs"), "{contents:?}");
        assert!(
            contents.contains("warning_lands_in_warning_info_and_debug_files()"),
            "{contents:?}"
        );
    }
    for severity in [Severity::Fatal, Severity::Error] {
        let contents = file_for(dir.path(), severity);
        assert!(
            !contents.contains("cascaded once"),
            "{severity} file must not hold the line"
        );
    }

    // The threshold came from the config.
    assert_eq!(logfan::global::severity(), Severity::Debug);
}
