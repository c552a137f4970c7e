use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use gcode_estimate::config::Config;
use gcode_estimate::report::{render, FileReport};
use gcode_estimate::{estimate, Estimate, RunOptions};

fn main() -> ExitCode {
    let config = match Config::from_args_and_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .parse_default_env()
        .init();

    if let Some(path) = &config.config_file {
        log::info!("Using config file {}", path.display());
    }

    let mut failed = false;
    for path in &config.files {
        let result = estimate_file(path, config.run_options)
            .and_then(|estimate| render(&FileReport::new(path, &estimate), config.format));

        match result {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("error: {}: {:#}", path.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Run one file (or stdin for "-") through its own runner
fn estimate_file(path: &Path, options: RunOptions) -> Result<Estimate> {
    if path == Path::new("-") {
        return Ok(estimate(io::stdin().lock(), options)?);
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(estimate(BufReader::new(file), options)?)
}
