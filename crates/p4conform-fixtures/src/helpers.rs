//! Helper functions for integration tests.

use p4conform::model::BrokerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Create a unique temporary directory with the given prefix.
#[must_use]
pub fn temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("p4conform-test-{prefix}-{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Write fixture rows to a file, one case per line.
pub fn write_fixture(path: &Path, rows: &[String]) {
    let mut data = rows.join("\n");
    data.push('\n');
    fs::write(path, data).expect("write fixture file");
}

/// Write a broker config as JSON or YAML, by extension.
pub fn write_config(path: &Path, config: &BrokerConfig) {
    let name = path.display().to_string();
    let data = if name.ends_with(".yaml") || name.ends_with(".yml") {
        serde_yml::to_string(config).expect("encode config yaml")
    } else {
        serde_json::to_string_pretty(config).expect("encode config json")
    };
    fs::write(path, data).expect("write config file");
}

/// Drop an executable shell script that stands in for the broker command.
///
/// The script receives the same argument vector the real client would
/// (`-p port -u user access level path`), so `$#` positions are stable.
#[must_use]
pub fn fake_broker_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let script = format!("#!/bin/sh\n{body}\n");
    fs::write(&path, script).expect("write broker script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path).expect("stat broker script").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod broker script");
    }
    path
}
