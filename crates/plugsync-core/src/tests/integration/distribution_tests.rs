#![cfg(test)]

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use crate::distribution::{
    DistributionEngine, DistributionError, PairStatus, RunConfiguration, TransferOutcome, UpdateDecision,
};
use crate::tests::fixtures::{make_server, snapshot, write_corrupt_jar, write_plugin_jar};

fn install(server: &Path, file_name: &str, name: &str, version: &str) {
    write_plugin_jar(&server.join("plugins").join(file_name), name, version);
}

#[tokio::test]
async fn test_end_to_end_byte_identical_copy() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    let server = make_server(&root.join("servers"), "survival");
    install(&server, "ExamplePlugin.jar", "ExamplePlugin", "1.2.0");
    let updates = root.join("updates");
    fs::create_dir(&updates).unwrap();
    let plugin = updates.join("ExamplePlugin.jar");
    write_plugin_jar(&plugin, "ExamplePlugin", "1.3.0");
    let installed_before = fs::read(server.join("plugins/ExamplePlugin.jar")).unwrap();

    let config = RunConfiguration::builder()
        .server_directory(root.join("servers"))
        .plugin_directory(&updates)
        .build()
        .unwrap();
    let result = DistributionEngine::local().run(config).await.unwrap();

    assert_eq!(result.servers().len(), 1);
    assert_eq!(result.plugins().len(), 1);
    assert_eq!(
        fs::read(server.join("plugins/update/ExamplePlugin.jar")).unwrap(),
        fs::read(&plugin).unwrap()
    );
    // Installed copy stays in place; the server swaps it in on restart
    assert_eq!(fs::read(server.join("plugins/ExamplePlugin.jar")).unwrap(), installed_before);
}

#[tokio::test]
async fn test_simulation_reports_without_mutation() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    let servers = root.join("servers");
    for name in ["hub", "skyblock"] {
        let server = make_server(&servers, name);
        install(&server, "ExamplePlugin.jar", "ExamplePlugin", "1.0.0");
    }
    let plugin = root.join("ExamplePlugin.jar");
    write_plugin_jar(&plugin, "ExamplePlugin", "1.0.1");
    let before = snapshot(root);

    let config = RunConfiguration::builder()
        .server_directory(&servers)
        .plugin_path(&plugin)
        .simulate(true)
        .build()
        .unwrap();
    let result = DistributionEngine::local().run(config).await.unwrap();

    assert_eq!(snapshot(root), before);
    assert!(result.mode().is_simulate());
    assert!(result
        .outcomes()
        .iter()
        .all(|o| matches!(o.transfer, Some(TransferOutcome::Simulated { .. }))));
    let report = result.dry_run_report();
    assert_eq!(report.copies_count, 2);
    assert_eq!(report.descriptions.len(), 4);
}

#[tokio::test]
async fn test_empty_plugin_directory_fails_before_any_pair() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    let server = make_server(root, "lobby");
    let updates = root.join("updates");
    fs::create_dir(&updates).unwrap();
    fs::write(updates.join("README.txt"), b"drop jars here").unwrap();
    let before = snapshot(root);

    let config = RunConfiguration::builder()
        .server_path(&server)
        .plugin_directory(&updates)
        .build()
        .unwrap();
    let err = DistributionEngine::local().run(config).await.unwrap_err();

    assert!(matches!(err, DistributionError::NoPluginsFound { .. }));
    assert_eq!(snapshot(root), before);
}

#[tokio::test]
async fn test_mixed_fleet_with_one_corrupt_plugin() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    let servers = root.join("servers");
    let lobby = make_server(&servers, "lobby");
    let survival = make_server(&servers, "survival");
    install(&lobby, "Alpha.jar", "Alpha", "1.0.0");
    install(&survival, "Alpha.jar", "Alpha", "1.0.0");
    install(&lobby, "Beta.jar", "Beta", "2.0.0");
    install(&survival, "Broken.jar", "Broken", "1.0.0");

    let updates = root.join("updates");
    fs::create_dir(&updates).unwrap();
    write_plugin_jar(&updates.join("Alpha.jar"), "Alpha", "1.1.0");
    write_plugin_jar(&updates.join("Beta.jar"), "Beta", "2.0.0");
    write_corrupt_jar(&updates.join("Broken.jar"));

    let config = RunConfiguration::builder()
        .server_directory(&servers)
        .plugin_directory(&updates)
        .build()
        .unwrap();
    let result = DistributionEngine::local().run(config).await.unwrap();

    assert_eq!(result.outcomes().len(), 6);
    let alpha = updates.join("Alpha.jar");
    let beta = updates.join("Beta.jar");
    let broken = updates.join("Broken.jar");
    assert_eq!(result.outcome_for(&alpha, &lobby).unwrap().status(), PairStatus::Copied);
    assert_eq!(result.outcome_for(&alpha, &survival).unwrap().status(), PairStatus::Copied);
    assert!(matches!(
        result.outcome_for(&beta, &lobby).unwrap().decision,
        UpdateDecision::SkippedSameVersion { .. }
    ));
    assert_eq!(
        result.outcome_for(&beta, &survival).unwrap().decision,
        UpdateDecision::SkippedNotInstalled
    );
    assert_eq!(
        result.outcome_for(&broken, &lobby).unwrap().decision,
        UpdateDecision::SkippedNotInstalled
    );
    assert!(result.outcome_for(&broken, &survival).unwrap().decision.is_error());

    let summary = result.summary();
    assert_eq!(summary.copied, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped(), 3);
    assert!(!lobby.join("plugins/update/Beta.jar").exists());
    assert!(!survival.join("plugins/update/Broken.jar").exists());
}
