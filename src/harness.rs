use crate::checks::{self, CheckResult, InitCheckOptions, DEFAULT_REQUIRED_CMDS};
use crate::error::Result;
use crate::r2_api::{get_info, CommandPipe, Session};
use crate::report::Reporter;
use serde::Serialize;
use std::path::PathBuf;

/// Named env var schemes the plugin's test setups have used
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preset {
    /// `E2E_API_KEY` + `E2E_API_URL`, rewrites the config
    E2e,
    /// `TEST_API_KEY` only, leaves the config alone
    Test,
}

impl Preset {
    pub fn from_string(name: &str) -> Option<Preset> {
        match name {
            "e2e" => Some(Preset::E2e),
            "test" => Some(Preset::Test),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub bin: String,
    pub exe: String,
    pub required_cmds: Vec<String>,
    pub init: InitCheckOptions,
}

impl HarnessConfig {
    pub fn new(bin: &str, preset: Preset, config_path: PathBuf) -> Self {
        let init = match preset {
            Preset::E2e => InitCheckOptions {
                api_key_var: "E2E_API_KEY".to_owned(),
                api_url_var: Some("E2E_API_URL".to_owned()),
                config_path,
                rewrite_config: true,
            },
            Preset::Test => InitCheckOptions {
                api_key_var: "TEST_API_KEY".to_owned(),
                api_url_var: None,
                config_path,
                rewrite_config: false,
            },
        };

        HarnessConfig {
            bin: bin.to_owned(),
            exe: "rizin".to_owned(),
            required_cmds: DEFAULT_REQUIRED_CMDS.iter().map(|c| c.to_string()).collect(),
            init,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub bin: String,
    pub opened: bool,
    pub checks: Vec<CheckResult>,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.opened && self.checks.iter().all(|c| c.passed)
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Open a session on `config.bin`, run both checks and close the session.
///
/// `open` builds the pipe, `env` resolves environment variables. Neither
/// check's outcome keeps the other from running.
pub fn run<P, O, F>(config: &HarnessConfig, open: O, env: F, report: &mut Reporter) -> RunReport
where
    P: CommandPipe,
    O: FnOnce(&HarnessConfig) -> Result<P>,
    F: Fn(&str) -> Option<String>,
{
    let mut run_report = RunReport {
        bin: config.bin.clone(),
        opened: false,
        checks: vec![],
    };

    let mut session = match open(config) {
        Ok(pipe) => Session::new(pipe),
        Err(e) => {
            report.error(&e.to_string());
            report.fail(&format!("could not open '{}'", config.bin));
            return run_report;
        }
    };
    run_report.opened = true;
    report.info(&format!("Using binary '{}'", config.bin));

    if report.is_debug() {
        match get_info(&mut session) {
            Ok(info) => report.debug(&format!(
                "{} {} {}-bit ({})",
                info.core.format, info.bin.arch, info.bin.bits, info.bin.os
            )),
            Err(e) => report.debug(&format!("no target info: {}", e)),
        }
    }

    let root = checks::root_cmd_desc(&mut session, &config.required_cmds, report);
    run_report.checks.push(root);

    let init = checks::plugin_init_cmd(&mut session, &config.init, env, report);
    run_report.checks.push(init);

    session.close();
    run_report
}

/// `run` against a real shell process with the process environment
pub fn run_r2(config: &HarnessConfig, report: &mut Reporter) -> RunReport {
    use crate::r2_api::R2Api;

    run(
        config,
        |c| R2Api::new(&c.exe, &c.bin),
        |var| std::env::var(var).ok(),
        report,
    )
}
