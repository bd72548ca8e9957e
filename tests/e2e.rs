use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const NT_SHARED: &str = "8846f7eaee8fb117ad06bdd830b7586c";
const NT_OTHER: &str = "64f12cddaa88057e06a81b54e73b949b";

fn write_dump(path: &Path, lines: &[String]) {
    let mut f = fs::File::create(path).unwrap();
    for line in lines {
        writeln!(f, "{}", line).unwrap();
    }
}

fn dump_line(user: &str, rid: u32, nt: &str) -> String {
    format!("DOM\\{user}:{rid}:aad3b435b51404eeaad3b435b51404ee:{nt}:::")
}

fn sample_dump() -> Vec<String> {
    vec![
        dump_line("Admin", 500, NT_SHARED),
        dump_line("User", 1001, NT_SHARED),
        dump_line("Svc", 1002, NT_OTHER),
        "garbage".to_string(),
    ]
}

fn blastradius() -> Command {
    let mut cmd = Command::cargo_bin("blastradius").unwrap();
    cmd.arg("--color").arg("never");
    cmd
}

#[test]
fn e2e_prints_report_and_writes_output() {
    let tmp = tempdir().unwrap();
    let dump = tmp.path().join("ntds.txt");
    let out = tmp.path().join("report.txt");
    write_dump(&dump, &sample_dump());
    fs::write(&out, "old report contents\n".repeat(50)).unwrap();

    blastradius()
        .arg("-f")
        .arg(&dump)
        .arg("-d")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("-- Password Reuse Summary --"))
        .stdout(predicate::str::contains(
            "# Users with the exact SAME or SIMILAR password as another user: 2 out of 3",
        ))
        .stdout(predicate::str::contains("Time taken: "));

    let written = fs::read_to_string(&out).unwrap();
    assert!(!written.contains("old report"));
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(
        lines[11],
        format!("Password Hash: {NT_SHARED} is used by users: DOM\\Admin, DOM\\User")
    );
    assert!(written.ends_with('\n'));
}

#[test]
fn animated_presentation_prints_same_report() {
    let tmp = tempdir().unwrap();
    let dump = tmp.path().join("ntds.txt");
    write_dump(&dump, &sample_dump());

    blastradius()
        .arg("-f")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Average password reuse blast radius (equal to 0 when everyone has a unique, dissimilar password): 0.333",
        ));
}

#[test]
fn csv_export_lists_shared_members() {
    let tmp = tempdir().unwrap();
    let dump = tmp.path().join("ntds.txt");
    let outdir = tmp.path().join("out");
    write_dump(&dump, &sample_dump());

    blastradius()
        .arg("-f")
        .arg(&dump)
        .arg("-q")
        .arg("--csv-dir")
        .arg(&outdir)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let files: Vec<_> = fs::read_dir(&outdir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let content = fs::read_to_string(&files[0]).unwrap();
    assert!(content.contains(&format!("{NT_SHARED},DOM\\Admin")));
    assert!(content.contains(&format!("{NT_SHARED},DOM\\User")));
    assert!(!content.contains("Svc"));
}

#[test]
fn mmap_threshold_produces_same_report() {
    let tmp = tempdir().unwrap();
    let dump = tmp.path().join("ntds_big.txt");
    let mut lines = Vec::new();
    for i in 0..50 {
        let nt = if i % 5 == 0 { NT_SHARED } else { NT_OTHER };
        lines.push(dump_line(&format!("U{i}"), 1000 + i, nt));
    }
    write_dump(&dump, &lines);

    let run = |threshold: &str| {
        let output = blastradius()
            .arg("-f")
            .arg(&dump)
            .arg("-d")
            .arg("--mmap-threshold")
            .arg(threshold)
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        stdout
            .lines()
            .filter(|l| !l.starts_with("Time taken"))
            .map(str::to_string)
            .collect::<Vec<_>>()
    };
    let mapped = run("32");
    let buffered = run("0");
    assert_eq!(mapped, buffered);
    assert!(mapped.iter().any(|l| l.ends_with("50 out of 50")));
}

#[test]
fn empty_dump_reports_and_exits_cleanly() {
    let tmp = tempdir().unwrap();
    let dump = tmp.path().join("ntds.txt");
    let out = tmp.path().join("report.txt");
    write_dump(&dump, &["bob:1002".to_string(), "carol:1003:lm::".to_string()]);

    blastradius()
        .arg("-f")
        .arg(&dump)
        .arg("-d")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("No credential records found in input"));

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(
        written,
        "-- Password Reuse Summary --\nNo credential records found in input\n"
    );
}

#[test]
fn missing_dump_file_causes_non_zero_exit() {
    let tmp = tempdir().unwrap();
    blastradius()
        .arg("-f")
        .arg(tmp.path().join("missing-ntds.txt"))
        .assert()
        .code(2);
}

#[test]
fn missing_file_argument_is_usage_error() {
    blastradius().assert().failure();
}

#[test]
fn output_failure_causes_non_zero_exit() {
    let tmp = tempdir().unwrap();
    let dump = tmp.path().join("ntds.txt");
    write_dump(&dump, &sample_dump());
    // a directory cannot be opened as the report file
    blastradius()
        .arg("-f")
        .arg(&dump)
        .arg("-d")
        .arg("-o")
        .arg(tmp.path())
        .assert()
        .code(5);
}

#[test]
fn unreadable_dump_causes_load_exit_code() {
    let tmp = tempdir().unwrap();
    // exists, but reading a directory fails
    blastradius()
        .arg("-f")
        .arg(tmp.path())
        .arg("-d")
        .arg("--mmap-threshold")
        .arg("0")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Password Reuse Summary").not());
}

#[test]
fn csv_failure_causes_csv_exit_code() {
    let tmp = tempdir().unwrap();
    let dump = tmp.path().join("ntds.txt");
    write_dump(&dump, &sample_dump());
    let blocker = tmp.path().join("not-a-dir");
    fs::write(&blocker, b"plain file").unwrap();

    blastradius()
        .arg("-f")
        .arg(&dump)
        .arg("-q")
        .arg("--csv-dir")
        .arg(blocker.join("sub"))
        .assert()
        .code(6);
}
