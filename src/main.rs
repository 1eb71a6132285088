use clap::{App, Arg};
use reai_smoke::config::default_config_path;
use reai_smoke::harness::{run_r2, HarnessConfig, Preset};
use reai_smoke::report::Reporter;
use std::path::PathBuf;
use std::process;

fn main() {
    let matches = App::new("reai-smoke")
        .version("0.1.0")
        .about("End-to-end smoke tests for the RevEng.AI rizin/r2 plugin")
        .arg(Arg::with_name("bin")
            .required(true)
            .index(1)
            .help("Binary to open the pipe over"))
        .arg(Arg::with_name("preset")
            .long("preset")
            .takes_value(true)
            .possible_values(&["e2e", "test"])
            .default_value("e2e")
            .help("Environment variable scheme to use"))
        .arg(Arg::with_name("exe")
            .long("exe")
            .takes_value(true)
            .default_value("rizin")
            .help("Shell executable hosting the plugin (rizin or radare2)"))
        .arg(Arg::with_name("config")
            .long("config")
            .takes_value(true)
            .help("Path to the plugin credential file [default: ~/.creait]"))
        .arg(Arg::with_name("api_key_var")
            .long("api-key-var")
            .takes_value(true)
            .help("Environment variable holding the API key"))
        .arg(Arg::with_name("api_url_var")
            .long("api-url-var")
            .takes_value(true)
            .help("Environment variable holding the API host"))
        .arg(Arg::with_name("rewrite_config")
            .long("rewrite-config")
            .conflicts_with("no_rewrite_config")
            .help("Rewrite the credential file after verifying it"))
        .arg(Arg::with_name("no_rewrite_config")
            .long("no-rewrite-config")
            .help("Leave the credential file untouched"))
        .arg(Arg::with_name("require")
            .long("require")
            .takes_value(true)
            .multiple(true)
            .help("Required root commands (replaces the default list)"))
        .arg(Arg::with_name("json")
            .long("json")
            .help("Print the run report as JSON"))
        .arg(Arg::with_name("no_color")
            .long("no-color")
            .help("Disable colored output"))
        .arg(Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .help("Show verbose / debugging output"))
        .get_matches();

    if matches.is_present("no_color") {
        colored::control::set_override(false);
    }

    let mut report = Reporter::stdout(matches.is_present("verbose"));

    let config_path = match matches.value_of("config") {
        Some(path) => PathBuf::from(path),
        None => match default_config_path() {
            Ok(path) => path,
            Err(e) => {
                report.error(&e.to_string());
                process::exit(1);
            }
        },
    };

    // possible_values already rejected anything else
    let preset = matches.value_of("preset")
        .and_then(Preset::from_string)
        .unwrap_or(Preset::E2e);

    let bin = matches.value_of("bin").unwrap_or_default();
    let mut config = HarnessConfig::new(bin, preset, config_path);

    if let Some(exe) = matches.value_of("exe") {
        config.exe = exe.to_owned();
    }
    if let Some(var) = matches.value_of("api_key_var") {
        config.init.api_key_var = var.to_owned();
    }
    if let Some(var) = matches.value_of("api_url_var") {
        config.init.api_url_var = Some(var.to_owned());
    }
    if matches.is_present("rewrite_config") {
        config.init.rewrite_config = true;
    } else if matches.is_present("no_rewrite_config") {
        config.init.rewrite_config = false;
    }
    if let Some(cmds) = matches.values_of("require") {
        config.required_cmds = cmds.map(str::to_owned).collect();
    }

    let run_report = run_r2(&config, &mut report);

    if matches.is_present("json") {
        match serde_json::to_string_pretty(&run_report) {
            Ok(json) => println!("{}", json),
            Err(e) => report.error(&e.to_string()),
        }
    }

    process::exit(run_report.exit_code());
}
