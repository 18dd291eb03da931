use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// Run record written next to a plan artifact.
#[derive(Debug, Serialize)]
pub struct RunRecord {
    pub code_rev: String,
    pub version: &'static str,
    pub callsite: Callsite,
    pub params: Value,
    pub outputs: Vec<String>,
}

/// Write `<stem>.record.json` beside `artifact` with the git revision,
/// callsite, params, and the artifact path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, params: Value) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = record_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating record dir {}", parent.display()))?;
        }
    }

    let caller = Location::caller();
    let record = RunRecord {
        code_rev: current_git_rev(),
        version: cakecut::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        params,
        outputs: vec![artifact.to_string_lossy().into_owned()],
    };
    fs::write(&path, serde_json::to_vec_pretty(&record)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "record");
    Ok(path)
}

fn record_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("plan"));
    name.push(".record.json");
    artifact.with_file_name(name)
}

/// Build-time `GIT_COMMIT`, then the runtime variable, then `git rev-parse`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn record_path_replaces_extension() {
        let derived = record_path(Path::new("/tmp/plans/grid.json"));
        assert_eq!(derived, Path::new("/tmp/plans/grid.record.json"));
    }

    #[test]
    fn write_sidecar_records_params_and_output() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("out/grid.json");
        let path = write_sidecar(&artifact, json!({"width": 100.0, "requests": 4})).unwrap();
        assert!(path.ends_with("out/grid.record.json"));
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["requests"], 4);
        assert_eq!(parsed["version"], cakecut::VERSION);
        assert!(parsed["callsite"]["file"]
            .as_str()
            .unwrap()
            .ends_with("record.rs"));
    }
}
