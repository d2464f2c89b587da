use std::process::Command;

fn run(fixture: &str) -> (String, String, bool) {
    let path = format!("tests/fixtures/{fixture}");
    let output = Command::new(env!("CARGO_BIN_EXE_vouchers"))
        .arg(&path)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn voucher_lifecycle() {
    let (stdout, stderr, success) = run("valid.csv");

    assert!(success);
    assert!(stderr.is_empty());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "type,code,discount,amount,final_amount,applied,error",
            "create,FIDO10,10,,,,",
            "create,FIDO10,10,,,,Voucher already exist.",
            "apply,FIDO10,10,200.0000,180.0000,true,",
            "apply,FIDO10,10,200.0000,200.0000,false,",
            "apply,NOPE,,200.0000,,,Voucher does not exist.",
            "create,DOG20,20,,,,",
            "apply,DOG20,20,50.0000,50.0000,false,",
            "apply,DOG20,20,100.0000,80.0000,true,",
        ]
    );
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run("with_errors.csv");

    assert!(success);
    assert!(stderr.contains("unrecognized operation type"));
    assert!(stderr.contains("missing amount"));
    assert!(stderr.contains("is not a finite number"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "create,FIDO10,10,,,,");
    assert_eq!(lines[2], "apply,FIDO10,10,250.0000,225.0000,true,");
}

#[test]
fn missing_argument_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_vouchers"))
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage"));
}

#[test]
fn missing_file_fails() {
    let (stdout, stderr, success) = run("absent.csv");

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to open csv file"));
}
