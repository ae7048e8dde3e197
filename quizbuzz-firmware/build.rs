//! Build script for quizbuzz-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates game.toml and bakes it into the firmware as a constant

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let settings = validate_config();
    generate_config(&settings);
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

/// Validated game settings
struct Settings {
    win_threshold: u32,
    max_points: u16,
    buzzer_poll_ms: u32,
    display_refresh_ms: u32,
    console_baud: u32,
}

/// Validate game.toml at compile time
fn validate_config() -> Settings {
    println!("cargo:rerun-if-changed=game.toml");

    let config_path = Path::new("game.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: game.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a game.toml file in the                   ║\n\
            ║  quizbuzz-firmware directory.                                    ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read game.toml                                 ║\n\
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
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in game.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();

    let win_threshold = read_integer(&config, "game", "win_threshold", 300, 1, u32::MAX as i64, &mut errors);
    let max_points = read_integer(&config, "game", "max_points", 999, 1, u16::MAX as i64, &mut errors);
    let buzzer_poll_ms = read_integer(&config, "timing", "buzzer_poll_ms", 100, 1, 1000, &mut errors);
    let display_refresh_ms =
        read_integer(&config, "timing", "display_refresh_ms", 500, 50, 10_000, &mut errors);
    let console_baud = read_integer(&config, "console", "baud", 115_200, 1200, 921_600, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid settings in game.toml                            ║\n\
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

    println!("cargo:warning=game.toml validated successfully");

    Settings {
        win_threshold: win_threshold as u32,
        max_points: max_points as u16,
        buzzer_poll_ms: buzzer_poll_ms as u32,
        display_refresh_ms: display_refresh_ms as u32,
        console_baud: console_baud as u32,
    }
}

/// Read an optional integer from `[section] key`, checking its range
///
/// Missing keys fall back to `default`. Problems are collected in `errors`
/// so every bad setting is reported in one go.
fn read_integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: i64,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    let value = match config.get(section) {
        None => return default,
        Some(toml::Value::Table(t)) => t.get(key),
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            return default;
        }
    };

    match value {
        None => default,
        Some(toml::Value::Integer(n)) if (min..=max).contains(n) => *n,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            default
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            default
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            // toml errors quote the offending source, which may be non-ASCII
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the settings as a `GameConfig` constant into OUT_DIR
fn generate_config(settings: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let code = format!(
        "/// Settings from game.toml\n\
         pub const GAME_CONFIG: GameConfig = GameConfig {{\n    \
             win_threshold: {},\n    \
             max_points: {},\n    \
             buzzer_poll_ms: {},\n    \
             display_refresh_ms: {},\n    \
             console_baud: {},\n\
         }};\n",
        settings.win_threshold,
        settings.max_points,
        settings.buzzer_poll_ms,
        settings.display_refresh_ms,
        settings.console_baud,
    );
    fs::write(out_dir.join("game_config.rs"), code).unwrap();
}
