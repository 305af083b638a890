//! # Simulation Configuration
//!
//! The CLI surface: four positional integers, validated before any actor
//! starts. Range violations and malformed input are fatal with exit code 1;
//! the bounds below are part of the protocol contract, not a convenience.

use clap::error::ErrorKind;
use clap::Parser;

use crate::error::{WorkshopError, WorkshopResult};

/// Validated run parameters.
///
/// ```text
/// northpole <elf_count> <reindeer_count> <elf_work_ms> <reindeer_vacation_ms>
/// ```
#[derive(Parser, Debug, Clone)]
#[command(name = "northpole", disable_help_flag = true)]
pub struct SimulationConfig {
    /// Number of elf actors (1..=999).
    #[arg(value_parser = clap::value_parser!(u32).range(1..1000))]
    pub elf_count: u32,

    /// Number of reindeer actors (1..=19).
    #[arg(value_parser = clap::value_parser!(u32).range(1..20))]
    pub reindeer_count: u32,

    /// Upper bound on an elf's labor pause, in milliseconds (0..=1000).
    #[arg(value_parser = clap::value_parser!(u64).range(0..=1000))]
    pub elf_work_ms: u64,

    /// Lower bound on a reindeer's vacation, in milliseconds (0..=1000).
    /// The actual pause falls in `vacation..=2*vacation`.
    #[arg(value_parser = clap::value_parser!(u64).range(0..=1000))]
    pub reindeer_vacation_ms: u64,
}

impl SimulationConfig {
    /// Parses the process arguments, mapping clap failures onto the
    /// workshop error taxonomy so the caller can print one line and exit 1.
    pub fn from_cli() -> WorkshopResult<Self> {
        Self::try_parse().map_err(classify)
    }

    /// Parses an explicit argument vector. Test seam for [`Self::from_cli`].
    pub fn from_args<I, S>(args: I) -> WorkshopResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(classify)
    }
}

/// Splits clap's failure modes into the two argument error kinds.
fn classify(error: clap::Error) -> WorkshopError {
    let message = first_line(&error);
    match error.kind() {
        ErrorKind::ValueValidation | ErrorKind::InvalidValue => {
            WorkshopError::ArgumentOutOfRange(message)
        }
        _ => WorkshopError::InvalidArguments(message),
    }
}

/// Clap renders multi-line reports; the contract is a single line.
fn first_line(error: &clap::Error) -> String {
    error
        .to_string()
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("invalid arguments")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> WorkshopResult<SimulationConfig> {
        SimulationConfig::from_args(std::iter::once("northpole").chain(args.iter().copied()))
    }

    #[test]
    fn test_valid_arguments() {
        let config = parse(&["5", "3", "100", "200"]).expect("valid arguments rejected");
        assert_eq!(config.elf_count, 5);
        assert_eq!(config.reindeer_count, 3);
        assert_eq!(config.elf_work_ms, 100);
        assert_eq!(config.reindeer_vacation_ms, 200);
    }

    #[test]
    fn test_boundary_values_accepted() {
        assert!(parse(&["1", "1", "0", "0"]).is_ok());
        assert!(parse(&["999", "19", "1000", "1000"]).is_ok());
    }

    #[test]
    fn test_missing_arguments_rejected() {
        let error = parse(&["5", "3"]).expect_err("missing arguments accepted");
        assert!(matches!(error, WorkshopError::InvalidArguments(_)));
    }

    #[test]
    fn test_extra_arguments_rejected() {
        let error = parse(&["5", "3", "0", "0", "7"]).expect_err("extra argument accepted");
        assert!(matches!(error, WorkshopError::InvalidArguments(_)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        for args in [
            ["0", "1", "0", "0"],
            ["1000", "1", "0", "0"],
            ["1", "0", "0", "0"],
            ["1", "20", "0", "0"],
            ["1", "1", "1001", "0"],
            ["1", "1", "0", "1001"],
        ] {
            let error = parse(&args).expect_err("out-of-range value accepted");
            assert!(matches!(error, WorkshopError::ArgumentOutOfRange(_)));
        }
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert!(parse(&["many", "1", "0", "0"]).is_err());
    }
}
