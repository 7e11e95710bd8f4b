//! Shell scripts standing in for the cpdf binary

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Records its argv (one token per line) to `$ARGS_FILE` and touches the
/// file named after `-o`, like a successful cpdf run would.
pub const RECORDING_SCRIPT: &str = r#"
if [ -n "$ARGS_FILE" ]; then
    printf '%s\n' "$@" > "$ARGS_FILE"
fi
prev=""
for arg in "$@"; do
    if [ "$prev" = "-o" ]; then
        : > "$arg"
    fi
    prev="$arg"
done
"#;

static SPAWN_LOCK: Mutex<()> = Mutex::new(());

/// Serializes script creation and spawning within one test binary
///
/// A script still open for writing in one thread can be inherited by a
/// child forked from another, which makes exec fail with ETXTBSY.
pub fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Write an executable `/bin/sh` script named `cpdf` into `dir`
pub fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("cpdf");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Tokens recorded by [`RECORDING_SCRIPT`]
pub fn recorded_args(args_file: &Path) -> Vec<String> {
    fs::read_to_string(args_file)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
