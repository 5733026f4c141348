//! Runs an injected bundle under Node.js.
//!
//! Skipped when `node` isn't on PATH.

use keel_build::inject_shim;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const BUNDLE: &str = r#"/* Optimized production build generated by Keel */
setTimeout(() => { throw new Error('timer exploded'); }, 0);
Promise.reject(new Error('nobody caught this'));
setTimeout(() => {
  console.log(`listeners ${process.listenerCount('uncaughtException')} ${process.listenerCount('unhandledRejection')}`);
  console.log('still running');
}, 50);
"#;

fn node_available() -> bool {
    Command::new("node")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

#[tokio::test]
async fn test_monitor_keeps_process_alive_after_double_injection() {
    if !node_available() {
        eprintln!("node not found on PATH, skipping");
        return;
    }

    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("dist");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(out_dir.join("index.mjs"), BUNDLE).unwrap();

    let main = Path::new("index.mjs");
    inject_shim(&out_dir, main, true).await.unwrap();
    let entry = inject_shim(&out_dir, main, true).await.unwrap();

    let output = Command::new("node").arg(&entry).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stdout:\n{stdout}\nstderr:\n{stderr}");
    assert!(stdout.contains("listeners 1 1"), "{stdout}");
    assert!(stdout.contains("still running"), "{stdout}");
    assert!(stdout.contains("[Keel Anti-Crash Monitor] Uncaught Exception"), "{stdout}");
    assert!(stdout.contains("timer exploded"), "{stdout}");
    assert!(
        stdout.contains("[Keel Anti-Crash Monitor] Unhandled promise rejection"),
        "{stdout}"
    );
    assert!(stdout.contains("nobody caught this"), "{stdout}");
}

#[tokio::test]
async fn test_without_monitor_uncaught_exception_exits() {
    if !node_available() {
        eprintln!("node not found on PATH, skipping");
        return;
    }

    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("index.mjs"), BUNDLE).unwrap();

    let entry = inject_shim(temp.path(), Path::new("index.mjs"), false)
        .await
        .unwrap();

    let output = Command::new("node").arg(&entry).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success());
    assert!(!stdout.contains("still running"), "{stdout}");
}
