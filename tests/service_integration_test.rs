use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wi_patrol::app::{Notice, NoticeLevel, PatrolService, Selection};
use wi_patrol::domain::NetworkStatus;
use wi_patrol::store::DataFiles;

const SCAN: &str = "\
Home_Network,AA:BB:CC:DD:EE:FF,-45,6,WPA2
Free_Airport,DE:AD:BE:EF:00:01,-70,1,WPA2
Office,33:33:33:33:33:33,-50,6,WPA3
Legacy,44:44:44:44:44:44,-80,11,WEP
";

fn setup(scan: &str) -> (TempDir, DataFiles) {
    let dir = TempDir::new().unwrap();
    let files = DataFiles::in_dir(dir.path());
    fs::write(&files.scan, scan).unwrap();
    (dir, files)
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_load_defaults_statuses_and_touches_nothing() {
    let (_dir, files) = setup(SCAN);
    let mut service = PatrolService::new(files.clone());

    let view = service.load();

    assert_eq!(view.status_message, "Loaded 4 networks");
    assert!(
        view.records()
            .all(|record| record.status == Some(NetworkStatus::UnknownSafe))
    );
    assert!(!files.snapshot.exists());
    assert!(service.notices().notices().is_empty());
}

#[test]
fn test_load_keeps_statuses_from_scan_file() {
    let (_dir, files) = setup("Lab,01,-40,1,WPA2,Rogue AP\n");
    let mut service = PatrolService::new(files);

    let view = service.load();
    assert_eq!(
        view.rows[0].record.status,
        Some(NetworkStatus::Other("Rogue AP".to_string()))
    );
}

#[test]
fn test_missing_files_are_empty() {
    let dir = TempDir::new().unwrap();
    let mut service = PatrolService::new(DataFiles::in_dir(dir.path()));

    let view = service.analyze();

    assert!(view.rows.is_empty());
    assert_eq!(view.status_message, "Analysis complete");
    assert!(service.notices().notices().is_empty());
}

#[test]
fn test_refresh_overwrites_snapshot_with_scan() {
    let (_dir, files) = setup(SCAN);
    fs::write(&files.snapshot, "Stale,00,-1,1,WPA2,Known: Safe\n").unwrap();
    let mut service = PatrolService::new(files.clone());

    let view = service.refresh_scan();

    assert_eq!(view.status_message, "Scan refreshed");
    let snapshot = lines(&files.snapshot);
    assert_eq!(snapshot.len(), 4);
    assert_eq!(snapshot[0], "Home_Network,AA:BB:CC:DD:EE:FF,-45,6,WPA2,Unknown: Safe");
}

#[test]
fn test_analyze_classifies_and_persists() {
    let (_dir, files) = setup(SCAN);
    fs::write(
        &files.allowlist,
        "Home_Network,aa:bb:cc:dd:ee:ff,-45,6,WPA2,Known: Safe\n",
    )
    .unwrap();
    fs::write(&files.snapshot, "Office,33:33:33:33:33:33,-50,6,WPA2,Unknown: Safe\n").unwrap();
    let mut service = PatrolService::new(files.clone());

    let view = service.analyze();

    let statuses: Vec<NetworkStatus> = view
        .records()
        .map(|record| record.effective_status())
        .collect();
    assert_eq!(
        statuses,
        vec![
            NetworkStatus::KnownSafe,
            NetworkStatus::UnknownSuspicious,
            NetworkStatus::UnknownSuspicious,
            NetworkStatus::UnknownSuspicious,
        ]
    );
    assert_eq!(
        lines(&files.snapshot),
        vec![
            "Home_Network,AA:BB:CC:DD:EE:FF,-45,6,WPA2,Known: Safe",
            "Free_Airport,DE:AD:BE:EF:00:01,-70,1,WPA2,Unknown: Suspicious",
            "Office,33:33:33:33:33:33,-50,6,WPA3,Unknown: Suspicious",
            "Legacy,44:44:44:44:44:44,-80,11,WEP,Unknown: Suspicious",
        ]
    );
}

#[test]
fn test_snapshot_is_compared_before_it_is_rewritten() {
    let (_dir, files) = setup("Office,33:33:33:33:33:33,-50,6,WPA2\n");
    let mut service = PatrolService::new(files.clone());

    // First analysis records the baseline
    let view = service.analyze();
    assert_eq!(view.rows[0].record.effective_status(), NetworkStatus::UnknownSafe);

    // The access point changes its name on the same channel
    fs::write(&files.scan, "Office2,33:33:33:33:33:33,-50,6,WPA2\n").unwrap();
    let view = service.analyze();
    assert_eq!(
        view.rows[0].record.effective_status(),
        NetworkStatus::UnknownSuspicious
    );

    // Once the new name is the baseline, it is no longer flagged
    let view = service.analyze();
    assert_eq!(view.rows[0].record.effective_status(), NetworkStatus::UnknownSafe);
}

#[test]
fn test_duplicates_survive_analysis() {
    let (_dir, files) = setup("Cafe,01,-40,1,WPA2\nCafe,01,-40,1,WPA2\n");
    let mut service = PatrolService::new(files.clone());

    let view = service.analyze();

    assert_eq!(view.rows.len(), 2);
    assert_eq!(lines(&files.snapshot).len(), 2);
}

#[test]
fn test_add_to_allowlist_appends_and_reanalyzes() {
    let (_dir, files) = setup(SCAN);
    fs::write(&files.allowlist, "Existing,99,-40,1,WPA2,Known: Safe\n").unwrap();
    let mut service = PatrolService::new(files.clone());

    let view = service.add_to_allowlist(&Selection::Network {
        bssid: "de:ad:be:ef:00:01".to_string(),
        ssid: None,
    });

    let allowlist = lines(&files.allowlist);
    assert_eq!(allowlist.len(), 2);
    // The row is stored with the status it had when selected
    assert_eq!(
        allowlist[1],
        "Free_Airport,DE:AD:BE:EF:00:01,-70,1,WPA2,Unknown: Suspicious"
    );

    assert_eq!(view.status_message, "Analysis complete");
    assert_eq!(view.rows[1].record.effective_status(), NetworkStatus::KnownSafe);
    assert!(files.snapshot.exists());

    let notices = service.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert_eq!(notices[0].title, Notice::ALLOWLIST_UPDATED);
}

#[test]
fn test_add_to_allowlist_by_row() {
    let (_dir, files) = setup(SCAN);
    let mut service = PatrolService::new(files.clone());

    service.add_to_allowlist(&Selection::Row(4));

    let allowlist = lines(&files.allowlist);
    assert_eq!(allowlist, vec!["Legacy,44:44:44:44:44:44,-80,11,WEP,Unknown: Suspicious"]);
}

#[test]
fn test_no_selection_leaves_files_untouched() {
    let (_dir, files) = setup(SCAN);
    let mut service = PatrolService::new(files.clone());

    let view = service.add_to_allowlist(&Selection::Row(42));

    assert_eq!(view.status_message, "No network selected");
    assert!(!files.allowlist.exists());
    assert!(!files.snapshot.exists());
    assert!(service.notices().has_problems());
    assert_eq!(service.notices().notices()[0].title, Notice::NO_SELECTION);
}

#[test]
fn test_unreadable_allowlist_is_reported_and_treated_as_empty() {
    let (_dir, files) = setup(SCAN);
    // A directory where the allowlist should be cannot be read as text
    fs::create_dir(&files.allowlist).unwrap();
    let mut service = PatrolService::new(files.clone());

    let view = service.analyze();

    assert_eq!(view.rows.len(), 4);
    assert_eq!(view.rows[0].record.effective_status(), NetworkStatus::UnknownSafe);
    let notices = service.notices().notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].title, Notice::ALLOWLIST_ERROR);
}

#[test]
fn test_add_to_allowlist_reports_each_read_failure_once() {
    let (_dir, files) = setup(SCAN);
    fs::write(&files.allowlist, [0xff, 0xfe, b'\n']).unwrap();
    let mut service = PatrolService::new(files.clone());

    let view = service.add_to_allowlist(&Selection::Row(1));

    assert_eq!(view.status_message, "Analysis complete");
    assert_eq!(view.rows[0].record.effective_status(), NetworkStatus::KnownSafe);

    let titles: Vec<String> = service
        .take_notices()
        .into_iter()
        .map(|notice| notice.title)
        .collect();
    assert_eq!(
        titles,
        vec![
            Notice::ALLOWLIST_ERROR.to_string(),
            Notice::ALLOWLIST_UPDATED.to_string(),
        ]
    );
}

#[test]
fn test_unwritable_snapshot_is_reported() {
    let (_dir, files) = setup(SCAN);
    fs::create_dir(&files.snapshot).unwrap();
    let mut service = PatrolService::new(files);

    let view = service.refresh_scan();

    assert_eq!(view.rows.len(), 4);
    let titles: Vec<&str> = service
        .notices()
        .notices()
        .iter()
        .map(|notice| notice.title.as_str())
        .collect();
    assert_eq!(titles, vec![Notice::FILE_WRITE_ERROR]);
}

#[test]
fn test_malformed_scan_lines_are_skipped_silently() {
    let (_dir, files) = setup("Good,01,-40,1,WPA2\ngarbage\nAlso,02,x,1,WPA2\n");
    let mut service = PatrolService::new(files);

    let view = service.load();

    assert_eq!(view.rows.len(), 1);
    assert!(service.notices().notices().is_empty());
}

#[test]
fn test_app_renders_json_report() {
    use wi_patrol::app::{Command, OutputFormat};
    use wi_patrol::{App, Config};

    let (_dir, files) = setup(SCAN);
    let config = Config {
        scan_file: files.scan.clone(),
        snapshot_file: files.snapshot.clone(),
        allowlist_file: files.allowlist.clone(),
        output: OutputFormat::Json,
        command: Some(Command::Analyze),
        ..Config::default()
    };

    let outcome = App::from_config(config).run().unwrap();

    assert!(outcome.is_success());
    let report: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
    assert_eq!(report["command"], "analyze");
    assert_eq!(report["status_message"], "Analysis complete");
    assert_eq!(report["networks"].as_array().unwrap().len(), 4);
    assert_eq!(report["networks"][3]["status"], "Unknown: Suspicious");
    assert_eq!(report["networks"][3]["reason"]["rule"], "weak_encryption");
}

#[test]
fn test_app_reports_failure_when_nothing_is_selected() {
    use wi_patrol::app::config::AllowArgs;
    use wi_patrol::app::Command;
    use wi_patrol::{App, Config};

    let (_dir, files) = setup(SCAN);
    let config = Config {
        scan_file: files.scan.clone(),
        snapshot_file: files.snapshot.clone(),
        allowlist_file: files.allowlist.clone(),
        command: Some(Command::Allow(AllowArgs {
            row: None,
            bssid: Some("00:00:00:00:00:00".to_string()),
            ssid: None,
        })),
        ..Config::default()
    };

    let outcome = App::from_config(config).run().unwrap();

    assert!(!outcome.is_success());
    assert!(outcome.output.ends_with("No network selected\n"));
    assert!(!files.allowlist.exists());
}
