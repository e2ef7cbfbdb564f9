//! Config watcher picks up edits to the file.

use std::fs;
use std::time::Duration;

use bridge_config::config::watcher::ConfigWatcher;
use bridge_config::TrackerRole;

mod common;

#[tokio::test]
async fn test_reload_on_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_file(&dir, "vrconfig.toml", "[bridges.steamvr]\n");

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run().unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    fs::write(&path, "[bridges.steamvr.trackers]\nhead = true\n").unwrap();

    // Editors and filesystems may fire several events; wait for the one with the change.
    let reloaded = tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            let config = updates.recv().await.expect("watcher dropped");
            let head = config
                .bridge("steamvr")
                .map(|b| b.role_enabled(TrackerRole::Head, false));
            if head == Some(true) {
                return config;
            }
        }
    })
    .await
    .expect("no reload within timeout");

    assert_eq!(reloaded.bridges.len(), 1);
}
