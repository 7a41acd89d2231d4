use crate::app::command_support::{app_log, load_settings, map_config_err, sequencing_client};
use crate::config::{default_global_config_path, API_KEY_ENV_VARS, CONFIG_PATH_ENV};
use crate::shared::AppLog;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
struct DoctorFinding {
    id: String,
    ok: bool,
    detail: String,
    remediation: String,
}

fn doctor_finding(
    id: impl Into<String>,
    ok: bool,
    detail: impl Into<String>,
    remediation: impl Into<String>,
) -> DoctorFinding {
    DoctorFinding {
        id: id.into(),
        ok,
        detail: detail.into(),
        remediation: remediation.into(),
    }
}

fn can_write_log(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| format!("failed to open {}: {e}", path.display()))
}

pub fn cmd_doctor() -> Result<String, String> {
    let mut findings = Vec::new();
    let config_path = default_global_config_path().map_err(map_config_err)?;
    findings.push(doctor_finding(
        "config.path",
        true,
        format!(
            "config={} present={}",
            config_path.display(),
            config_path.exists()
        ),
        "none",
    ));

    let loaded = match load_settings() {
        Ok(loaded) => {
            findings.push(doctor_finding(
                "config.parse",
                true,
                if loaded.file_present {
                    "settings parsed and validated"
                } else {
                    "no settings file; using defaults"
                },
                "none",
            ));
            Some(loaded)
        }
        Err(err) => {
            findings.push(doctor_finding(
                "config.parse",
                false,
                format!("settings load failed: {err}"),
                format!("fix ~/.sonicseq/config.yaml (or the file named by {CONFIG_PATH_ENV}) and retry `sonicseq doctor`"),
            ));
            None
        }
    };

    if let Some(loaded) = loaded.as_ref() {
        let client = sequencing_client(&loaded.settings, AppLog::disabled());
        findings.push(doctor_finding(
            "env.api_key",
            client.has_credential(),
            format!("checked={}", API_KEY_ENV_VARS.join(",")),
            format!("export {} with a valid key", API_KEY_ENV_VARS[0]),
        ));
        findings.push(doctor_finding(
            "provider.endpoint",
            true,
            format!("endpoint={} model={}", client.endpoint(), client.model()),
            "none",
        ));

        let log = app_log(&loaded.settings);
        findings.push(match log.path() {
            Some(path) => match can_write_log(path) {
                Ok(()) => doctor_finding(
                    "log.path",
                    true,
                    format!("writable={}", path.display()),
                    "none",
                ),
                Err(err) => doctor_finding(
                    "log.path",
                    false,
                    err,
                    "grant write permission or set `log_path` in ~/.sonicseq/config.yaml",
                ),
            },
            None => doctor_finding(
                "log.path",
                false,
                "log path could not be resolved",
                "set HOME or `log_path` in ~/.sonicseq/config.yaml",
            ),
        });
    }

    let failed = findings.iter().filter(|f| !f.ok).count();
    let summary = if failed == 0 { "healthy" } else { "unhealthy" };
    let mut lines = vec![
        format!("summary={summary}"),
        format!("checks_total={}", findings.len()),
        format!("checks_failed={failed}"),
    ];
    for finding in findings {
        lines.push(format!(
            "check:{}={}",
            finding.id,
            if finding.ok { "ok" } else { "fail" }
        ));
        lines.push(format!("check:{}.detail={}", finding.id, finding.detail));
        if !finding.ok {
            lines.push(format!(
                "check:{}.remediation={}",
                finding.id, finding.remediation
            ));
        }
    }
    Ok(lines.join("\n"))
}
