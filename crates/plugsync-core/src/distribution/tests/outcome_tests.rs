#![cfg(test)]

use std::path::{Path, PathBuf};

use crate::discovery::validator::{PluginPath, ServerPath};
use crate::distribution::context::ExecutionMode;
use crate::distribution::dry_run::{DryRunReport, DryRunnable, FileOperation, FileOperationType};
use crate::distribution::outcome::{PairOutcome, PairStatus, RunResult, TransferOutcome, UpdateDecision};

fn pair(plugin: &str, server: &str, decision: UpdateDecision, transfer: Option<TransferOutcome>) -> PairOutcome {
    PairOutcome {
        plugin: PluginPath::new(format!("/updates/{}", plugin)).unwrap(),
        server: ServerPath::new(format!("/srv/{}", server)),
        decision,
        transfer,
    }
}

fn simulated(plugin: &str, server: &str, creates_update_folder: bool) -> PairOutcome {
    let operation = FileOperation::copy(
        format!("/updates/{}", plugin),
        format!("/srv/{}/plugins/update/{}", server, plugin),
        10,
    );
    pair(
        plugin,
        server,
        UpdateDecision::Proceed,
        Some(TransferOutcome::Simulated {
            operation,
            creates_update_folder,
        }),
    )
}

fn result(mode: ExecutionMode, outcomes: Vec<PairOutcome>) -> RunResult {
    let mut servers: Vec<ServerPath> = outcomes.iter().map(|o| o.server.clone()).collect();
    servers.dedup();
    let mut plugins: Vec<PluginPath> = outcomes.iter().map(|o| o.plugin.clone()).collect();
    plugins.dedup();
    RunResult::new(mode, servers, plugins, outcomes)
}

#[test]
fn test_status_classification() {
    let copied = pair(
        "A.jar",
        "s1",
        UpdateDecision::Proceed,
        Some(TransferOutcome::Copied {
            destination: PathBuf::from("/srv/s1/plugins/update/A.jar"),
            bytes: 3,
        }),
    );
    let failed_copy = pair(
        "A.jar",
        "s2",
        UpdateDecision::Proceed,
        Some(TransferOutcome::Failed {
            destination: PathBuf::from("/srv/s2/plugins/update/A.jar"),
            reason: "denied".to_string(),
        }),
    );
    let unreadable = pair("A.jar", "s3", UpdateDecision::SkippedError("bad".to_string()), None);
    let skipped = pair("A.jar", "s4", UpdateDecision::SkippedNotInstalled, None);

    assert_eq!(copied.status(), PairStatus::Copied);
    assert_eq!(failed_copy.status(), PairStatus::Failed);
    assert_eq!(unreadable.status(), PairStatus::Failed);
    assert_eq!(skipped.status(), PairStatus::Skipped);
    assert_eq!(simulated("A.jar", "s5", true).status(), PairStatus::WouldCopy);
}

#[test]
fn test_summary_counts_each_skip_reason() {
    let run = result(
        ExecutionMode::Live,
        vec![
            pair("A.jar", "s1", UpdateDecision::SkippedNotInstalled, None),
            pair(
                "A.jar",
                "s2",
                UpdateDecision::SkippedNameMismatch {
                    installed: "Foo".to_string(),
                    source: "A".to_string(),
                },
                None,
            ),
            pair(
                "A.jar",
                "s3",
                UpdateDecision::SkippedSameVersion {
                    version: "1.0.0".to_string(),
                },
                None,
            ),
            pair(
                "A.jar",
                "s4",
                UpdateDecision::SkippedOlderUpdate {
                    installed: "2.0.0".to_string(),
                    source: "1.0.0".to_string(),
                },
                None,
            ),
            pair("A.jar", "s5", UpdateDecision::SkippedError("corrupt".to_string()), None),
            pair(
                "A.jar",
                "s6",
                UpdateDecision::SkippedSuperseded {
                    by: "A-2.0.0.jar".to_string(),
                },
                None,
            ),
        ],
    );

    let summary = run.summary();
    assert_eq!(summary.pairs, 6);
    assert_eq!(summary.superseded, 1);
    assert_eq!(summary.skipped(), 5);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.copied, 0);
    assert!(run.has_failures());
    assert_eq!(
        summary.to_string(),
        "6 pair(s): 0 copied, 0 would copy, 5 skipped, 1 failed"
    );
}

#[test]
fn test_dry_run_report_creates_each_update_folder_once() {
    let run = result(
        ExecutionMode::Simulate,
        vec![
            simulated("A.jar", "s1", true),
            simulated("A.jar", "s2", false),
            simulated("B.jar", "s1", true),
        ],
    );

    let report = run.dry_run_report();
    assert_eq!(report.copies_count, 3);
    assert_eq!(report.estimated_disk_usage, 30);
    assert_eq!(
        report.descriptions,
        vec![
            "Would create directory /srv/s1/plugins/update".to_string(),
            "Would copy /updates/A.jar to /srv/s1/plugins/update/A.jar".to_string(),
            "Would copy /updates/A.jar to /srv/s2/plugins/update/A.jar".to_string(),
            "Would copy /updates/B.jar to /srv/s1/plugins/update/B.jar".to_string(),
        ]
    );
    assert!(report.to_string().starts_with("Simulation Results:"));
}

#[test]
fn test_outcome_lookup() {
    let run = result(
        ExecutionMode::Simulate,
        vec![simulated("A.jar", "s1", true), simulated("A.jar", "s2", true)],
    );

    let found = run
        .outcome_for(&PathBuf::from("/updates/A.jar"), &PathBuf::from("/srv/s2"))
        .unwrap();
    assert_eq!(found.server.path(), Path::new("/srv/s2"));
    assert!(run.outcome_for(&PathBuf::from("/updates/B.jar"), &PathBuf::from("/srv/s1")).is_none());
    assert_eq!(run.planned_operations().len(), 2);
}

#[test]
fn test_file_operation_descriptions() {
    let copy = FileOperation::copy("/a.jar", "/b/a.jar", 42);
    assert_eq!(copy.operation_type, FileOperationType::Copy);
    assert_eq!(copy.estimated_disk_usage(), 42);

    let mkdir = FileOperation::create_dir("/b");
    assert_eq!(mkdir.dry_run_description(), "Would create directory /b");
    assert_eq!(mkdir.estimated_disk_usage(), 0);

    let report = DryRunReport::from_operations(&[mkdir, copy]);
    assert_eq!(report.copies_count, 1);
    assert_eq!(report.estimated_disk_usage, 42);
}

#[test]
fn test_decision_display() {
    assert_eq!(UpdateDecision::SkippedNotInstalled.to_string(), "skipped: not installed");
    assert_eq!(
        UpdateDecision::SkippedSameVersion {
            version: "1.0.0".to_string()
        }
        .to_string(),
        "skipped: version 1.0.0 already installed"
    );
    assert_eq!(
        UpdateDecision::SkippedSuperseded {
            by: "Foo-2.0.0.jar".to_string()
        }
        .to_string(),
        "skipped: superseded by Foo-2.0.0.jar"
    );
}
