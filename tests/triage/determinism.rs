//! Repeated scans of the same tree agree on everything but the timestamp.

use zipscan::triage::config::ScanConfig;
use zipscan::Scanner;

use crate::common::{base64_run, tree};

#[test]
fn repeated_scans_are_identical() {
    let blob = base64_run(400);
    let dir = tree(&[
        ("z/last.exe", b"MZ\x90\x00"),
        ("a/first.sh", b"eval(\"$x\")"),
        ("m/middle.js", &blob),
        ("m/notes.txt", b"plain"),
        ("b.py", b"print('hi')"),
    ]);
    let scanner = Scanner::new(ScanConfig::default()).unwrap();

    let first = scanner.scan_tree(dir.path(), "a.zip", "0123456789abcdef").unwrap();
    let second = scanner.scan_tree(dir.path(), "a.zip", "0123456789abcdef").unwrap();

    assert_eq!(first.job_id, second.job_id);
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.findings, second.findings);
    assert_eq!(first.artifacts, second.artifacts);
}

#[test]
fn file_list_is_sorted_and_hashes_align() {
    let dir = tree(&[("c.txt", b"3"), ("a.txt", b"1"), ("b/a.txt", b"2")]);
    let out = Scanner::new(ScanConfig::default())
        .unwrap()
        .scan_extracted(dir.path())
        .unwrap();

    assert_eq!(out.file_list, vec!["a.txt", "b/a.txt", "c.txt"]);
    let keys: Vec<&String> = out.hashes.keys().collect();
    assert_eq!(keys, out.file_list.iter().collect::<Vec<_>>());
}

#[test]
fn serialized_report_is_stable_apart_from_timestamp() {
    let dir = tree(&[("x.sh", b"exec(1)")]);
    let scanner = Scanner::new(ScanConfig::default()).unwrap();
    let mut a = scanner.scan_tree(dir.path(), "x.zip", "ffffffff").unwrap();
    let mut b = scanner.scan_tree(dir.path(), "x.zip", "ffffffff").unwrap();
    a.created_at.clear();
    b.created_at.clear();
    assert_eq!(a.to_json_string().unwrap(), b.to_json_string().unwrap());
}
