//! Build script for outboard-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates vessel.toml at compile time

use std::collections::HashMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const MONITOR_SECTIONS: &[&str] = &["coolant", "battery", "bilge"];

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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate vessel.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=vessel.toml");

    let config_path = Path::new("vessel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: vessel.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a vessel.toml configuration file.         ║\n\
            ║  Please create one in the outboard-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read vessel.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in vessel.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_vessel(&config, &mut errors);
    for section in MONITOR_SECTIONS {
        validate_monitor(&config, section, &mut errors);
    }
    validate_pin_conflicts(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid vessel configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=vessel.toml validated successfully");
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

/// Parse `!^gpioNN` into a pin number
fn parse_pin(value: &str) -> Option<u8> {
    let digits = value.trim_start_matches(['!', '^']).strip_prefix("gpio")?;
    digits.parse::<u8>().ok().filter(|pin| *pin < 30)
}

fn validate_vessel(config: &toml::Value, errors: &mut Vec<String>) {
    let vessel = match config.get("vessel") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[vessel] must be a table".to_string());
            return;
        }
        None => {
            errors.push("Missing [vessel] section".to_string());
            return;
        }
    };

    match vessel.get("name") {
        Some(toml::Value::String(name)) => {
            if name.is_empty() || name.contains('.') {
                errors.push("[vessel] name must be non-empty without dots".to_string());
            }
            if name.len() > 24 {
                errors.push("[vessel] name must be at most 24 characters".to_string());
            }
        }
        Some(_) => errors.push("[vessel] name must be a string".to_string()),
        None => errors.push("[vessel] missing 'name'".to_string()),
    }

    for key in ["sample_interval_ms", "publish_interval_ms"] {
        if let Some(value) = vessel.get(key) {
            match value.as_integer() {
                Some(ms) if ms > 0 && ms <= u32::MAX as i64 => {}
                _ => errors.push(format!("[vessel] {} must be a positive integer", key)),
            }
        }
    }
}

fn validate_monitor(config: &toml::Value, section: &str, errors: &mut Vec<String>) {
    let table = match config.get(section) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            return;
        }
        None => return,
    };

    if let Some(toml::Value::Boolean(false)) = table.get("enabled") {
        return;
    }

    for key in ["alarm_pin", "critical_pin", "switch_pin", "sensor_pin"] {
        match table.get(key) {
            Some(toml::Value::String(pin)) => {
                if parse_pin(pin).is_none() {
                    errors.push(format!("[{}] {} '{}' is not a gpio pin", section, key, pin));
                }
            }
            Some(_) => errors.push(format!("[{}] {} must be a string", section, key)),
            None => {}
        }
    }

    if let Some(toml::Value::String(pin)) = table.get("sensor_pin") {
        if let Some(n) = parse_pin(pin) {
            if !(26..=29).contains(&n) {
                errors.push(format!("[{}] sensor_pin must be gpio26-gpio29", section));
            }
        }
    }

    // GPIO0/1 carry the gateway UART, GPIO26-29 are the ADC bank
    for key in ["alarm_pin", "critical_pin", "switch_pin"] {
        if let Some(toml::Value::String(pin)) = table.get(key) {
            if let Some(n) = parse_pin(pin) {
                if !(2..=25).contains(&n) {
                    errors.push(format!("[{}] {} must be gpio2-gpio25", section, key));
                }
            }
        }
    }

    if let Some(toml::Value::String(kind)) = table.get("smoothing") {
        if !["moving_average", "exponential"].contains(&kind.as_str()) {
            errors.push(format!(
                "[{}] smoothing must be 'moving_average' or 'exponential'",
                section
            ));
        }
    }

    if let Some(value) = table.get("window") {
        match value.as_integer() {
            Some(window) if (1..=64).contains(&window) => {}
            _ => errors.push(format!("[{}] window must be 1-64", section)),
        }
    }

    if let Some(value) = table.get("alpha") {
        match value.as_float() {
            Some(alpha) if alpha > 0.0 && alpha <= 1.0 => {}
            _ => errors.push(format!("[{}] alpha must be in (0, 1]", section)),
        }
    }
}

fn validate_pin_conflicts(config: &toml::Value, errors: &mut Vec<String>) {
    let mut claimed: HashMap<u8, String> = HashMap::new();

    for section in MONITOR_SECTIONS {
        let table = match config.get(*section).and_then(|s| s.as_table()) {
            Some(t) => t,
            None => continue,
        };
        if let Some(toml::Value::Boolean(false)) = table.get("enabled") {
            continue;
        }

        for key in ["alarm_pin", "critical_pin", "switch_pin", "sensor_pin"] {
            let Some(pin) = table.get(key).and_then(|v| v.as_str()).and_then(parse_pin) else {
                continue;
            };
            let role = format!("{}.{}", section, key);
            if let Some(previous) = claimed.insert(pin, role.clone()) {
                errors.push(format!("gpio{} used by both {} and {}", pin, previous, role));
            }
        }
    }
}
