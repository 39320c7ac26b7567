use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;

fn total() -> Command {
    Command::cargo_bin("total").unwrap()
}

fn path_with(temp: &TempDir, name: &str, contents: &str) -> String {
    let f = temp.child(name);
    f.write_str(contents).unwrap();
    f.path().to_str().unwrap().to_string()
}

const ABC: &str = "1,2,3\n4,5,6\n";

#[test]
fn reads_standard_input_without_file_arguments() {
    total().write_stdin(ABC).assert().success().stdout("5,7,9\n");
}

#[test]
fn standard_input_is_labelled() {
    total().arg("-H").write_stdin(ABC).assert().success().stdout("<stdin>: 5,7,9\n");
}

#[test]
fn a_dash_among_files_is_standard_input() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", ABC);
    total()
        .args(["-H", "-", a.as_str()])
        .write_stdin("1,1,1\n")
        .assert()
        .success()
        .stdout(format!("<stdin>: 1,1,1\n{a}: 5,7,9\nTotals: 6,8,10\n"));
}

#[test]
fn one_file_prints_one_row() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", ABC);
    total().arg(&a).assert().success().stdout("5,7,9\n");
    total().args(["-H", a.as_str()]).assert().success().stdout(format!("{a}: 5,7,9\n"));
    total().args(["-f", "2", a.as_str()]).assert().success().stdout("7\n");
}

#[test]
fn two_files_print_a_grand_total() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", ABC);
    let b = path_with(&temp, "b.txt", ABC);
    total().args([a.as_str(), b.as_str()]).assert().success().stdout("5,7,9\n5,7,9\n10,14,18\n");
    total()
        .args(["--header", a.as_str(), b.as_str()])
        .assert()
        .success()
        .stdout(format!("{a}: 5,7,9\n{b}: 5,7,9\nTotals: 10,14,18\n"));
    total().args(["-t", a.as_str(), b.as_str()]).assert().success().stdout("10,14,18\n");
}

#[test]
fn horizontal_doubles() {
    total()
        .args(["-z", "-d"])
        .write_stdin("1.5,2.5\n3,4\n")
        .assert()
        .success()
        .stdout("4.000000\n7.000000\n");
}

#[test]
fn horizontal_mode_ignores_totals_only_and_header() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", ABC);
    let b = path_with(&temp, "b.txt", "1\n");
    total().args(["-z", "-t", "-H", a.as_str(), b.as_str()]).assert().success().stdout("6\n15\n1\n");
}

#[test]
fn narrow_files_print_an_empty_row_for_an_open_range() {
    let temp = TempDir::new().unwrap();
    let wide = path_with(&temp, "wide.txt", "1,2,3,4,5\n");
    let narrow = path_with(&temp, "narrow.txt", "1,2\n");
    total().args(["-f", "3-", wide.as_str(), narrow.as_str()]).assert().success().stdout("3,4,5\n\n3,4,5\n");
}

#[test]
fn ranges_may_be_written_backwards() {
    let line = "1,2,3,4,5,6\n";
    let forwards = total().args(["-f", "2-5"]).write_stdin(line).output().unwrap().stdout;
    let backwards = total().args(["-f", "5-2"]).write_stdin(line).output().unwrap().stdout;
    assert_eq!(forwards, b"2,3,4,5\n");
    assert_eq!(forwards, backwards);
}

#[test]
fn separators() {
    total().args(["-s", "::"]).write_stdin("1::2\n3::4\n").assert().success().stdout("4::6\n");
    total().args(["-s", "\t", "-S", " "]).write_stdin("1\t2\n").assert().success().stdout("1 2\n");
    total().args(["--separator", ";", "--output-separator", "|"]).write_stdin("1;2\n").assert().stdout("1|2\n");
}

#[test]
fn non_numeric_fields_count_as_zero() {
    total().write_stdin("1,x\nabc,2\n").assert().success().stdout("1,2\n");
}

#[test]
fn crlf_and_utf16_input() {
    let temp = TempDir::new().unwrap();
    let crlf = path_with(&temp, "crlf.txt", "1,2\r\n3,4\r\n");
    total().args(["-s", ",", crlf.as_str()]).assert().success().stdout("4,6\n");

    let utf16 = temp.child("utf16.txt");
    let mut bytes = b"\xff\xfe".to_vec();
    for b in "1,2\n3,4\n".bytes() {
        bytes.extend([b, 0]);
    }
    utf16.write_binary(&bytes).unwrap();
    total().arg(utf16.path()).assert().success().stdout("4,6\n");
}

#[test]
fn fail_on_missing_file() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", ABC);
    let b = path_with(&temp, "b.txt", ABC);
    let missing = temp.child("missing.txt");
    let missing = missing.path().to_str().unwrap();
    total()
        .args([a.as_str(), missing, b.as_str()])
        .assert()
        .failure()
        .code(1)
        .stdout("5,7,9\n")
        .stderr(predicate::str::contains("Unable to open file `").and(predicate::str::contains("missing.txt")));
}

#[test]
fn quiet_silences_the_complaint_but_still_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.child("missing.txt");
    total().args(["-q", missing.path().to_str().unwrap()]).assert().failure().stdout("").stderr("");
}

#[test]
fn keep_going_skips_missing_files() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", ABC);
    let b = path_with(&temp, "b.txt", ABC);
    let missing = temp.child("missing.txt");
    let missing = missing.path().to_str().unwrap();
    total()
        .args(["-k", a.as_str(), missing, b.as_str()])
        .assert()
        .failure()
        .stdout("5,7,9\n5,7,9\n10,14,18\n")
        .stderr(predicate::str::contains("Unable to open file"));
    total().args(["-k", "-q", a.as_str(), missing]).assert().failure().stdout("5,7,9\n").stderr("");
}

#[test]
fn help_goes_to_standard_error() {
    total()
        .arg("-h")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::starts_with("Usage: total").and(predicate::str::contains("--field")));
}

#[test]
fn version() {
    total()
        .arg("--version")
        .assert()
        .success()
        .stdout(format!("total {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn bad_field_lists_and_unknown_options_fail_with_usage() {
    total().args(["-f", "1,x"]).assert().failure().stderr(predicate::str::contains("Usage"));
    total().arg("--bogus").assert().failure().stderr(predicate::str::contains("Usage"));
    total().args(["-s", ""]).assert().failure();
}

#[test]
fn empty_input_prints_nothing() {
    total().arg("-H").write_stdin("").assert().success().stdout("");
}
