//! Scoring, classification and evidence properties over generated trees.

use zipscan::core::triage::{Severity, Verdict};
use zipscan::triage::config::ScanConfig;
use zipscan::Scanner;

use crate::common::{base64_run, tree};

fn scanner() -> Scanner {
    Scanner::new(ScanConfig::default()).unwrap()
}

#[test]
fn every_native_extension_yields_one_high_even_when_empty() {
    for ext in ["exe", "dll", "bin", "so", "scr", "com", "pif", "EXE"] {
        let name = format!("x.{ext}");
        let dir = tree(&[(name.as_str(), b"")]);
        let out = scanner().scan_extracted(dir.path()).unwrap();
        assert_eq!(out.findings.len(), 1, "{name}");
        assert_eq!(out.findings[0].severity, Severity::High);
        assert_eq!(out.findings[0].evidence, vec![name.clone()]);
    }
}

#[test]
fn base64_threshold_is_exactly_100() {
    let dir = tree(&[("short.js", &base64_run(99)), ("long.js", &base64_run(100))]);
    let out = scanner().scan_extracted(dir.path()).unwrap();
    assert_eq!(out.findings.len(), 1);
    assert_eq!(out.findings[0].evidence, vec!["long.js"]);
    assert_eq!(out.findings[0].title, "Base64-like blob");
}

#[test]
fn exec_markers_match_anywhere_case_insensitively() {
    let cases: &[(&str, &[u8])] = &[
        ("a.py", b"x = 1  # EXEC(code) in a comment"),
        ("b.js", b"require(\"child_process\").spawn('sh')"),
        ("c.ps1", b"Start-Process POWERSHELL"),
        ("d", b"...eVaL(..."),
    ];
    for (name, data) in cases {
        let dir = tree(&[(*name, *data)]);
        let out = scanner().scan_extracted(dir.path()).unwrap();
        assert_eq!(out.findings.len(), 1, "{name}");
        assert_eq!(out.findings[0].title, "Potential code execution pattern");
    }
}

#[test]
fn unclassified_files_are_never_inspected() {
    let mut data = b"eval(".to_vec();
    data.extend(base64_run(500));
    let dir = tree(&[("notes.txt", &data), ("page.html", &data), ("lib.so.6", &data)]);
    let out = scanner().scan_extracted(dir.path()).unwrap();
    assert!(out.findings.is_empty());
    assert_eq!(out.file_list.len(), 3);
}

#[test]
fn score_drops_ten_per_native_binary() {
    let names: Vec<String> = (0..12).map(|i| format!("bin{i:02}.exe")).collect();
    let mut expected = 100u8;
    for n in 1..=names.len() {
        let files: Vec<(&str, &[u8])> = names[..n]
            .iter()
            .map(|s| (s.as_str(), b"MZ".as_slice()))
            .collect();
        let dir = tree(&files);
        let report = scanner().scan_tree(dir.path(), "a.zip", "00000000").unwrap();
        expected = expected.saturating_sub(10);
        assert_eq!(report.summary.score, expected, "with {n} binaries");
    }
    assert_eq!(expected, 0);
}

#[test]
fn medium_findings_do_not_move_score() {
    let dir = tree(&[
        ("a.sh", b"eval(1)"),
        ("b.sh", b"exec(2)"),
        ("c.rb", &base64_run(300)),
    ]);
    let report = scanner().scan_tree(dir.path(), "a.zip", "00000000").unwrap();
    assert_eq!(report.count_severity(Severity::Medium), 3);
    assert_eq!(report.summary.score, 100);
    assert_eq!(report.summary.verdict, Verdict::Suspicious);
}

#[test]
fn empty_tree_is_clean() {
    let dir = tree(&[]);
    let report = scanner().scan_tree(dir.path(), "a.zip", "00000000").unwrap();
    assert_eq!(report.summary.score, 100);
    assert_eq!(report.summary.verdict, Verdict::Clean);
}

#[test]
fn evidence_never_dangles() {
    let mut blob = b"powershell -enc ".to_vec();
    blob.extend(base64_run(256));
    let dir = tree(&[
        ("a/b/c/x.exe", b""),
        ("a/b/run", &blob),
        ("scripts/setup.py", b"exec(open('x').read())"),
        ("docs/readme.md", b"hello"),
    ]);
    let report = scanner().scan_tree(dir.path(), "a.zip", "00000000").unwrap();
    assert!(report.findings.len() >= 4);
    assert!(report.artifacts.dangling_evidence(&report.findings).is_empty());
    for f in &report.findings {
        for e in &f.evidence {
            assert!(report.artifacts.file_list.contains(e));
            assert!(f.description.contains(e.as_str()));
        }
    }
}

#[test]
fn relative_paths_are_slash_normalized() {
    let dir = tree(&[("outer/inner/tool.exe", b"")]);
    let out = scanner().scan_extracted(dir.path()).unwrap();
    assert_eq!(out.file_list, vec!["outer/inner/tool.exe"]);
    assert!(out.hashes.contains_key("outer/inner/tool.exe"));
}
