//! Build script for detent-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates keypad.toml at compile time
//! - Generates `keypad_config.rs` with the validated values

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections keypad.toml must define
const REQUIRED_SECTIONS: [&str; 4] = ["host", "encoder", "button", "keypad"];

/// Every setting with its allowed range: (section, key, min, max)
const SETTINGS: [(&str, &str, i64, i64); 9] = [
    ("host", "baud_rate", 1_200, 1_000_000),
    ("host", "command_timeout_ms", 100, 60_000),
    ("encoder", "debounce_us", 0, 100_000),
    ("encoder", "volume_step", 1, 100),
    ("encoder", "hue_step", 1, 359),
    ("button", "debounce_ms", 0, 1_000),
    ("button", "double_click_window_ms", 1, 2_000),
    ("keypad", "default_volume", 0, 100),
    ("keypad", "loop_period_ms", 1, 100),
];

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate keypad.toml and return its parsed content
fn validate_config() -> toml::Value {
    println!("cargo:rerun-if-changed=keypad.toml");

    let config_path = Path::new("keypad.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: keypad.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a keypad.toml configuration file.         ║\n\
            ║  Please create one in the detent-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read keypad.toml                               ║\n\
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
                ║  ERROR: Invalid TOML syntax in keypad.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);
    validate_settings(&config);

    println!("cargo:warning=keypad.toml validated successfully");
    config
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

/// Abort the build with a boxed list of errors
fn report_errors(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn validate_required_sections(config: &toml::Value) {
    let errors: Vec<String> = REQUIRED_SECTIONS
        .iter()
        .filter(|section| !matches!(config.get(**section), Some(toml::Value::Table(_))))
        .map(|section| format!("Missing [{}] section", section))
        .collect();

    report_errors("Missing required sections in keypad.toml", &errors);
}

fn validate_settings(config: &toml::Value) {
    let mut errors = Vec::new();

    for (section, key, min, max) in SETTINGS {
        match config.get(section).and_then(|s| s.get(key)) {
            Some(toml::Value::Integer(value)) => {
                if *value < min || *value > max {
                    errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
                }
            }
            Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
            None => errors.push(format!("[{}] missing '{}'", section, key)),
        }
    }

    report_errors("Invalid keypad configuration", &errors);
}

/// Look up a validated setting
fn setting(config: &toml::Value, section: &str, key: &str) -> i64 {
    config
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(toml::Value::as_integer)
        .unwrap()
}

/// Write `keypad_config.rs` into OUT_DIR for the firmware to include
fn generate_config(config: &toml::Value) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let source = format!(
        "/// Keypad configuration generated from keypad.toml\n\
        pub const KEYPAD_CONFIG: KeypadConfig = KeypadConfig {{\n    \
            encoder_debounce_us: {},\n    \
            button_debounce_ms: {},\n    \
            double_click_window_ms: {},\n    \
            command_timeout_ms: {},\n    \
            volume_step: {},\n    \
            hue_step: {},\n    \
            default_volume: {},\n    \
            loop_period_ms: {},\n\
        }};\n\
        \n\
        /// Host serial baud rate\n\
        pub const HOST_BAUD_RATE: u32 = {};\n",
        setting(config, "encoder", "debounce_us"),
        setting(config, "button", "debounce_ms"),
        setting(config, "button", "double_click_window_ms"),
        setting(config, "host", "command_timeout_ms"),
        setting(config, "encoder", "volume_step"),
        setting(config, "encoder", "hue_step"),
        setting(config, "keypad", "default_volume"),
        setting(config, "keypad", "loop_period_ms"),
        setting(config, "host", "baud_rate"),
    );

    let mut f = File::create(out_dir.join("keypad_config.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}
