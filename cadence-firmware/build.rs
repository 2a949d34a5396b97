//! Build script for cadence-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates stepper.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pins the board routes to the driver inputs, in column order
const BOARD_COIL_PINS: [i64; 5] = [2, 3, 4, 5, 6];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate stepper.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=stepper.toml");

    let config_path = Path::new("stepper.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: stepper.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a stepper.toml configuration file.        ║\n\
            ║  Please create one in the cadence-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read stepper.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in stepper.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_stepper(&config, &mut errors);
    validate_sweep(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: stepper.toml validation failed                           ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&errors.join("\n"))
        );
    }

    println!("cargo:warning=stepper.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find the stepper table: either `[stepper]` or a single `[stepper.<name>]`
fn stepper_table(config: &toml::Value) -> Option<&toml::value::Table> {
    let stepper = config.get("stepper")?.as_table()?;
    if stepper.contains_key("wires") || stepper.contains_key("pins") {
        return Some(stepper);
    }
    let mut named = stepper.values().filter_map(|v| v.as_table());
    let first = named.next()?;
    if named.next().is_some() {
        return None;
    }
    Some(first)
}

fn validate_stepper(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(stepper) = stepper_table(config) else {
        errors.push("Exactly one [stepper.<name>] section is required".to_string());
        return;
    };

    let wires = stepper.get("wires").and_then(|v| v.as_integer()).unwrap_or(4);
    if ![2, 4, 5].contains(&wires) {
        errors.push(format!("wires = {} (must be 2, 4 or 5)", wires));
    }

    match stepper.get("pins").and_then(|v| v.as_array()) {
        Some(pins) => {
            if pins.len() as i64 != wires {
                errors.push(format!("{} pins listed for {} wires", pins.len(), wires));
            }
            for (i, pin) in pins.iter().enumerate() {
                let gpio = pin
                    .as_str()
                    .and_then(|s| s.strip_prefix("gpio"))
                    .and_then(|n| n.parse::<i64>().ok());
                match gpio {
                    Some(n) if BOARD_COIL_PINS.get(i) == Some(&n) => {}
                    Some(n) => errors.push(format!(
                        "pins[{}] = gpio{} (board wires C{} to gpio{})",
                        i,
                        n,
                        i,
                        BOARD_COIL_PINS.get(i).copied().unwrap_or(-1)
                    )),
                    None => errors.push(format!("pins[{}] is not a \"gpioN\" string", i)),
                }
            }
        }
        None => errors.push("Missing pins = [\"gpioN\", ...]".to_string()),
    }

    for key in ["steps_per_revolution", "rpm"] {
        if let Some(value) = stepper.get(key) {
            match value.as_integer() {
                Some(n) if n > 0 => {}
                _ => errors.push(format!("{} must be a positive integer", key)),
            }
        }
    }
}

fn validate_sweep(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(sweep) = config.get("sweep").and_then(|v| v.as_table()) else {
        return;
    };

    for key in ["steps", "pause_ms", "cycles"] {
        if let Some(value) = sweep.get(key) {
            match value.as_integer() {
                Some(n) if key == "steps" || n >= 0 => {}
                _ => errors.push(format!("sweep.{} must be an integer", key)),
            }
        }
    }
}
