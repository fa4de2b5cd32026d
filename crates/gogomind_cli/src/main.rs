//! CLI inspection entry point.
//!
//! # Responsibility
//! - Verify `gogomind_core` linkage with a version probe.
//! - Print the node layout of a saved document, level by level.
//! - Start file logging when `--log-dir <absolute dir>` is given.

use gogomind_core::{core_version, default_log_level, init_logging, MindMap};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: gogomind_cli [--log-dir <absolute dir>] [document]";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    log_dir: Option<PathBuf>,
    document: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--log-dir" {
            let dir = args
                .next()
                .ok_or_else(|| "`--log-dir` needs a directory".to_string())?;
            parsed.log_dir = Some(PathBuf::from(dir));
        } else if parsed.document.is_none() {
            parsed.document = Some(arg);
        } else {
            return Err(format!("unexpected argument `{arg}`"));
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    println!("gogomind_core version={}", core_version());

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = &args.log_dir {
        if let Err(err) = init_logging(default_log_level().as_str(), log_dir) {
            eprintln!("failed to start logging: {err}");
            return ExitCode::FAILURE;
        }
    }

    let Some(path) = args.document else {
        return ExitCode::SUCCESS;
    };

    let mut map = MindMap::new();
    if let Err(err) = map.load(&path) {
        eprintln!("failed to load `{path}`: {err}");
        return ExitCode::FAILURE;
    }

    for (depth, level) in map.current_layout().iter().enumerate() {
        for (id, parent_id) in level {
            if let Some(node) = map.get_node(*id) {
                println!("level={depth} parent={parent_id} {}", node.info());
            }
        }
    }
    ExitCode::SUCCESS
}
