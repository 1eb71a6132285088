use crate::config::{self, CredentialConfig};
use crate::error::Error;
use crate::r2_api::{is_blank, CommandPipe};
use crate::report::Reporter;
use serde::Serialize;
use std::path::PathBuf;

/// Describes the plugin's top-level command group
pub const ROOT_DESCRIBE_CMD: &str = "RE?";
pub const INIT_CMD: &str = "REi";

pub const DEFAULT_REQUIRED_CMDS: [&str; 7] = ["REa", "REm", "REf", "REb", "REc", "REi", "REh"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub failures: Vec<String>,
}

impl CheckResult {
    fn new(name: &str) -> Self {
        CheckResult {
            name: name.to_owned(),
            passed: true,
            failures: vec![],
        }
    }

    fn failed(&mut self, reason: String) {
        self.passed = false;
        self.failures.push(reason);
    }
}

fn has_output(response: &Option<String>) -> bool {
    matches!(response, Some(text) if !is_blank(text))
}

/// Every required command must show up in the root describe output and
/// its `<cmd>?` help must not contain `ERROR`.
pub fn root_cmd_desc<P: CommandPipe + ?Sized>(
    pipe: &mut P,
    required: &[String],
    report: &mut Reporter,
) -> CheckResult {
    let mut result = CheckResult::new("root_cmd_desc");

    let desc = match pipe.cmd(ROOT_DESCRIBE_CMD) {
        Ok(out) => out.unwrap_or_default(),
        Err(e) => {
            report.error(&e.to_string());
            report.fail("could not describe root commands");
            result.failed(e.to_string());
            return result;
        }
    };
    report.debug(&format!("{} -> {} bytes", ROOT_DESCRIBE_CMD, desc.len()));

    let mut failed = 0;
    for cmd in required {
        // only ask for help on commands the group actually lists
        let listed = desc.contains(cmd.as_str());
        let errored = listed && match pipe.cmd(&format!("{}?", cmd)) {
            Ok(out) => out.map_or(false, |text| text.contains("ERROR")),
            Err(e) => {
                report.debug(&e.to_string());
                true
            }
        };

        if !listed || errored {
            failed += 1;
            report.error(&format!("NOT FOUND '{}' or ERRORED OUT", cmd));
            result.failed(format!("'{}' missing or errored", cmd));
        } else {
            report.success(&format!("FOUND '{}'", cmd));
        }
    }

    if failed > 0 {
        report.fail(&format!(
            "{} out of {} required commands not found!",
            failed,
            required.len()
        ));
    } else {
        report.pass("All required commands found");
    }

    result
}

/// Where the init check gets its inputs from
#[derive(Debug, Clone, PartialEq)]
pub struct InitCheckOptions {
    pub api_key_var: String,
    pub api_url_var: Option<String>,
    pub config_path: PathBuf,
    pub rewrite_config: bool,
}

/// Drive `REi` without and with the api key, then confirm the key landed in
/// the credential file, optionally normalizing that file afterwards.
pub fn plugin_init_cmd<P, F>(
    pipe: &mut P,
    options: &InitCheckOptions,
    env: F,
    report: &mut Reporter,
) -> CheckResult
where
    P: CommandPipe + ?Sized,
    F: Fn(&str) -> Option<String>,
{
    let mut result = CheckResult::new("plugin_init_cmd");

    let lookup = |var: &str| env(var).filter(|v| !v.is_empty());

    let api_key = match lookup(&options.api_key_var) {
        Some(key) => key,
        None => {
            let e = Error::MissingEnv(options.api_key_var.clone());
            report.error(&format!("RevEngAI API key not provided in environment. {}.", e));
            result.failed(e.to_string());
            return result;
        }
    };

    let api_url = match &options.api_url_var {
        Some(var) => match lookup(var) {
            Some(url) => Some(url),
            None => {
                let e = Error::MissingEnv(var.clone());
                report.error(&format!("RevEngAI API url not provided in environment. {}.", e));
                result.failed(e.to_string());
                return result;
            }
        },
        None => None,
    };

    // bare REi has to complain about its missing argument
    match pipe.cmd(INIT_CMD) {
        Ok(out) if has_output(&out) => {
            report.debug(&format!("{} printed a diagnostic as expected", INIT_CMD))
        }
        Ok(_) => {
            report.error(&format!("'{}' without arguments printed nothing", INIT_CMD));
            result.failed(format!("bare {} gave no diagnostic", INIT_CMD));
        }
        Err(e) => {
            report.error(&e.to_string());
            result.failed(e.to_string());
        }
    }

    // REi <key> succeeds silently
    let init = format!("{} {}", INIT_CMD, api_key);
    match pipe.cmd(&init) {
        Ok(out) if !has_output(&out) => {}
        Ok(out) => {
            let text = out.unwrap_or_default();
            report.error(&format!("'{} <key>' printed: {}", INIT_CMD, text.trim()));
            result.failed(format!("{} with key was not silent", INIT_CMD));
        }
        Err(e) => {
            report.error(&e.to_string());
            result.failed(e.to_string());
        }
    }

    let path = &options.config_path;
    report.debug(&format!("reading {}", path.display()));
    let content = match config::read_raw(path) {
        Ok(content) => content,
        Err(e @ Error::ConfigNotFound(_)) => {
            report.error("Creait config file not found!");
            result.failed(e.to_string());
            return result;
        }
        Err(e) => {
            report.error(&e.to_string());
            result.failed(e.to_string());
            return result;
        }
    };

    if !content.contains(api_key.as_str()) {
        report.error("API key not found in config file. Plugin not initialized correctly.");
        result.failed("api key missing from config file".to_owned());
        return result;
    }
    report.success("API key found in config file.");

    match CredentialConfig::parse(&content) {
        Ok(parsed) => {
            if parsed.api_key.as_deref() != Some(api_key.as_str()) {
                report.debug("api key found outside the api_key entry");
            }
            match &parsed.host {
                Some(host) => report.debug(&format!("configured host: {}", host)),
                None => report.debug("no host configured"),
            }
        }
        Err(e) => report.debug(&format!("config is not key=value: {}", e)),
    }

    if options.rewrite_config {
        let fresh = CredentialConfig::new(&api_key, api_url.as_deref());
        match fresh.store(path) {
            Ok(()) => report.debug(&format!("rewrote {}", path.display())),
            Err(e) => {
                report.error(&e.to_string());
                result.failed(e.to_string());
            }
        }
    }

    result
}
