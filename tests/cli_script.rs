mod common;

use assert_cmd::Command;
use predicates::str::contains;

use common::temp_base;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("money_magnet_cli").unwrap();
    cmd.env("MONEY_MAGNET_CLI_SCRIPT", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let base = temp_base();
    let input = "transaction add 200 Food Groceries --merchant \"Fresh Mart\"\n\
                 budget list\n\
                 summary\n\
                 exit\n";

    cli()
        .env("MONEY_MAGNET_HOME", &base)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Transaction added"))
        .stdout(contains("Food"))
        .stdout(contains("$3,300.00"));

    let stored = std::fs::read_to_string(base.join("data").join("moneyMagnetData.json")).unwrap();
    assert!(stored.contains("Fresh Mart"));
}

#[test]
fn unknown_commands_get_suggestions() {
    let base = temp_base();
    cli()
        .env("MONEY_MAGNET_HOME", &base)
        .write_stdin("budgte list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `budgte`"))
        .stdout(contains("Suggestion: `budget`?"));
}

#[test]
fn bill_payment_is_rejected_the_second_time() {
    let base = temp_base();
    let input = "bill add Gym 45 2025-11-01 Health\nbill pay 1\nbill pay 1\nbill list\n";
    cli()
        .env("MONEY_MAGNET_HOME", &base)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Paid Gym"))
        .stdout(contains("Bill already paid"))
        .stdout(contains("paid"));
}

#[test]
fn export_writes_file_into_requested_directory() {
    let base = temp_base();
    let target = base.join("downloads");
    let input = format!("export \"{}\"\n", target.display());
    cli()
        .env("MONEY_MAGNET_HOME", &base)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Data exported to"));

    let entries: Vec<_> = std::fs::read_dir(&target)
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].starts_with("money-magnet-data-"));
}

#[test]
fn help_lists_commands() {
    let base = temp_base();
    cli()
        .env("MONEY_MAGNET_HOME", &base)
        .write_stdin("help\nhelp goal\n")
        .assert()
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("goal <add|contribute|delete|list>"));
}
