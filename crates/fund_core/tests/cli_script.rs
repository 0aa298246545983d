use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn script_command(home: &std::path::Path, input: &str) -> Command {
    let mut cmd = Command::cargo_bin("fund_core_cli").unwrap();
    cmd.env("FUND_CORE_CLI_SCRIPT", "1")
        .env("FUND_CORE_HOME", home)
        .env("NO_COLOR", "1")
        .write_stdin(input.to_string());
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = tempfile::tempdir().unwrap();
    let input = "fund new Demo\nfund save-as demo\nexit\n";

    script_command(home.path(), input)
        .assert()
        .success()
        .stdout(contains("New fund created").and(contains("Fund `demo` saved")));

    let fund_file = home.path().join("funds").join("demo.json");
    let json = std::fs::read_to_string(fund_file).unwrap();
    assert!(json.contains("\"Demo\""));
}

#[test]
fn deposit_flow_reports_lateness_and_penalty() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
fund new Demo
shareholder register Asha 9000000001 2024-01-01
shareholder register Binu 9000000002 2024-01-01 treasurer
deposit record SH001 Mar-2025 200 2025-03-08 SH002
deposit record SH001 Apr-2025 200 2025-04-15 SH002 online
deposit list
penalty list SH001
exit
";

    script_command(home.path(), script)
        .assert()
        .success()
        .stdout(
            contains("registered as SH001")
                .and(contains("Deposit D0001 recorded (On Time)"))
                .and(contains("Deposit D0002 recorded (Late, penalty due 10.00)"))
                .and(contains("Late Deposit"))
                .and(contains("Total for SH001: 10.00")),
        );
}

#[test]
fn borrowing_and_repayment_workflow_completes() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
fund new Demo
shareholder register Asha 9000000001 2024-01-01
shareholder register Binu 9000000002 2024-01-01 treasurer
shareholder register Devika 9000000003 2024-01-01 admin
borrowing request SH001 1000
borrowing consent B0001 SH002
borrowing approve B0001 SH003
borrowing disburse B0001 2025-01-01 2025-06-01
repayment record B0001 1000 2025-05-20
repayment endorse 1 SH002
repayment finalize 1 SH003
borrowing show B0001
exit
";

    script_command(home.path(), script)
        .assert()
        .success()
        .stdout(
            contains("Borrowing B0001 requested by SH001 for 1000.00")
                .and(contains("Borrowing B0001 approved for 1000.00"))
                .and(contains("Repayment endorsed; awaiting admin approval"))
                .and(contains("Repayment finalized as R0001"))
                .and(contains("Status: Completed")),
        );
}

#[test]
fn workflow_rejects_out_of_order_approvals() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
fund new Demo
shareholder register Asha 9000000001 2024-01-01
shareholder register Binu 9000000002 2024-01-01 treasurer
shareholder register Devika 9000000003 2024-01-01 admin
borrowing request SH001 1000
borrowing consent B0001 SH002
borrowing approve B0001 SH003
borrowing disburse B0001 2025-01-01 2025-06-01
repayment record B0001 400 2025-02-01
repayment finalize 1 SH003
exit
";

    script_command(home.path(), script)
        .assert()
        .success()
        .stdout(contains("cannot advance from Pending"));
}

#[test]
fn report_export_writes_escaped_csv() {
    let home = tempfile::tempdir().unwrap();
    let out = home.path().join("shareholders.csv");
    let script = format!(
        "fund new Demo\n\
         shareholder register \"Asha, the elder\" 9000000001 2024-01-01\n\
         report export shareholders {}\n\
         exit\n",
        out.display()
    );

    script_command(home.path(), &script)
        .assert()
        .success()
        .stdout(contains("exported to").and(contains("1 rows")));

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("ID,Name,Phone"));
    assert!(csv.contains("\"Asha, the elder\""));
}

#[test]
fn configured_mirror_receives_saved_funds() {
    let home = tempfile::tempdir().unwrap();
    let mirror_dir = home.path().join("remote");

    script_command(
        home.path(),
        &format!("config set mirror_root {}\nexit\n", mirror_dir.display()),
    )
    .assert()
    .success()
    .stdout(contains("Configuration updated"));

    script_command(home.path(), "fund new Demo\nfund save-as demo\nexit\n")
        .assert()
        .success()
        .stdout(contains("Fund `demo` saved"));

    let mirrored = mirror_dir.join("demo.json");
    assert!(mirrored.exists(), "mirror document missing at {mirrored:?}");
    assert!(std::fs::read_to_string(mirrored).unwrap().contains("\"Demo\""));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = tempfile::tempdir().unwrap();
    script_command(home.path(), "shareholderz\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command").and(contains("Suggestion: `shareholder`?")));
}
