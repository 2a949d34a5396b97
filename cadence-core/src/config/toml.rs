//! Simple TOML parser for stepper configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `stepper.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - `[stepper <name>]`, `[stepper.<name>]` and `[sweep]` headers
//! - Single-line arrays of pin strings: `pins = ["gpio2", "gpio3"]`
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Inline tables
//! - Dotted keys outside section headers

use heapless::String as HString;

use super::types::{PinConfig, StepperConfig, MAX_LABEL_LEN};
use crate::sequence::WireCount;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Invalid value type
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Invalid pin string
    InvalidPin,
    /// No `[stepper]` section
    MissingStepper,
}

/// Back-and-forth motion run by the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepConfig {
    /// Steps per leg; each cycle moves forward then back by this amount
    pub steps: i32,
    /// Pause between legs in milliseconds
    pub pause_ms: u32,
    /// Number of cycles (None = run forever)
    pub cycles: Option<u32>,
    /// Drive coils low while paused
    pub release_between: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            steps: 200,
            pause_ms: 500,
            cycles: None,
            release_between: false,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// The motor
    pub stepper: StepperConfig,
    /// Motion to run
    pub sweep: SweepConfig,
}

/// Current parsing context
#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    Root,
    Stepper,
    Sweep,
}

/// Parse TOML configuration into a `BoardConfig`
pub fn parse_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut section = Section::Root;
    let mut stepper: Option<StepperConfig> = None;
    let mut sweep = SweepConfig::default();

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            let (header, name) = parse_section_header(&line[1..line.len() - 1])?;
            section = header;
            if section == Section::Stepper {
                if stepper.is_some() {
                    return Err(ParseError::TooManyItems);
                }
                stepper = Some(StepperConfig {
                    name,
                    ..StepperConfig::default()
                });
            }
            continue;
        }

        let Some((key, value)) = parse_key_value(line) else {
            return Err(ParseError::InvalidValue);
        };

        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Stepper => {
                if let Some(s) = stepper.as_mut() {
                    apply_stepper_value(s, key, value)?;
                }
            }
            Section::Sweep => apply_sweep_value(&mut sweep, key, value)?,
        }
    }

    let stepper = stepper.ok_or(ParseError::MissingStepper)?;
    Ok(BoardConfig { stepper, sweep })
}

/// Parse section header like "stepper dial", "stepper.dial" or "sweep"
fn parse_section_header(header: &str) -> Result<(Section, HString<MAX_LABEL_LEN>), ParseError> {
    let header = header.trim();
    let (kind, name) = match header.find(|c: char| c == '.' || c == ' ') {
        Some(pos) => (&header[..pos], header[pos + 1..].trim()),
        None => (header, ""),
    };

    let mut label = HString::new();
    label
        .push_str(name)
        .map_err(|_| ParseError::TooManyItems)?;

    match kind {
        "stepper" => Ok((Section::Stepper, label)),
        "sweep" if name.is_empty() => Ok((Section::Sweep, label)),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split `key = value`, dropping trailing comments outside strings
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like "gpio11"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let s = parse_string(value.trim());
    let num = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = num.parse().map_err(|_| ParseError::InvalidPin)?;
    Ok(PinConfig::new(pin))
}

/// Parse a pin array like `["gpio2", "gpio3", "gpio4", "gpio5"]`
fn parse_pins(value: &str, config: &mut StepperConfig) -> Result<(), ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    config.pins.clear();
    for item in inner.split(',') {
        let item = item.trim();
        // Tolerate a trailing comma
        if item.is_empty() {
            continue;
        }
        let pin = parse_pin(item)?;
        config
            .pins
            .push(pin)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(())
}

fn apply_stepper_value(config: &mut StepperConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "name" => {
            config.name.clear();
            config
                .name
                .push_str(parse_string(value))
                .map_err(|_| ParseError::TooManyItems)?;
        }
        "wires" => {
            let wires: u8 = parse_int(value)?;
            config.wiring = WireCount::try_from(wires).map_err(|_| ParseError::InvalidValue)?;
        }
        "pins" => parse_pins(value, config)?,
        "steps_per_revolution" => config.steps_per_revolution = parse_int(value)?,
        "rpm" => config.rpm = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_sweep_value(sweep: &mut SweepConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "steps" => sweep.steps = parse_int(value)?,
        "pause_ms" => sweep.pause_ms = parse_int(value)?,
        "cycles" => {
            let cycles: u32 = parse_int(value)?;
            // 0 = forever
            sweep.cycles = if cycles == 0 { None } else { Some(cycles) };
        }
        "release_between" => sweep.release_between = parse_bool(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Geared 28BYJ-48 style motor on a ULN2003 board
[stepper dial]
wires = 4
pins = ["gpio2", "gpio3", "gpio4", "gpio5"]  # IN1..IN4
steps_per_revolution = 200
rpm = 60

[sweep]
steps = -400
pause_ms = 250
cycles = 3
release_between = true
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        let stepper = &config.stepper;

        assert_eq!(stepper.name.as_str(), "dial");
        assert_eq!(stepper.wiring, WireCount::Four);
        let pins: heapless::Vec<u8, 5> = stepper.pins.iter().map(|p| p.pin).collect();
        assert_eq!(&pins[..], &[2, 3, 4, 5]);
        assert_eq!(stepper.steps_per_revolution, 200);
        assert_eq!(stepper.rpm, 60);
        assert_eq!(stepper.validate(), Ok(()));

        assert_eq!(
            config.sweep,
            SweepConfig {
                steps: -400,
                pause_ms: 250,
                cycles: Some(3),
                release_between: true,
            }
        );
    }

    #[test]
    fn test_defaults_apply() {
        let config = parse_config("[stepper.feeder]\nwires = 2\npins = [\"gpio8\", \"gpio9\",]\n").unwrap();
        assert_eq!(config.stepper.name.as_str(), "feeder");
        assert_eq!(config.stepper.wiring, WireCount::Two);
        assert_eq!(config.stepper.pins.len(), 2);
        assert_eq!(config.stepper.steps_per_revolution, 200);
        assert_eq!(config.stepper.rpm, 90);
        assert_eq!(config.sweep, SweepConfig::default());
    }

    #[test]
    fn test_parse_section_header() {
        let (section, name) = parse_section_header("stepper spin").unwrap();
        assert_eq!(section, Section::Stepper);
        assert_eq!(name.as_str(), "spin");

        let (section, _) = parse_section_header("sweep").unwrap();
        assert_eq!(section, Section::Sweep);

        assert_eq!(
            parse_section_header("heater jar1"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_section_header("stepper a_name_far_too_long_for_labels"),
            Err(ParseError::TooManyItems)
        );
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("gpio11"), Ok(PinConfig::new(11)));
        assert_eq!(parse_pin("\"gpio4\""), Ok(PinConfig::new(4)));
        assert_eq!(parse_pin("pin4"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio"), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config(""), Err(ParseError::MissingStepper));
        assert_eq!(
            parse_config("[stepper]\nwires = 3\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[stepper]\ncolor = \"red\"\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(parse_config("rpm = 60\n"), Err(ParseError::UnknownKey));
        assert_eq!(
            parse_config("[stepper]\npins = [\"gpio1\", \"gpio2\", \"gpio3\", \"gpio4\", \"gpio5\", \"gpio6\"]\n"),
            Err(ParseError::TooManyItems)
        );
        assert_eq!(
            parse_config("[stepper a]\n[stepper b]\n"),
            Err(ParseError::TooManyItems)
        );
        assert_eq!(parse_config("[stepper]\nrpm\n"), Err(ParseError::InvalidValue));
    }
}
