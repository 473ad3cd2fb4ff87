//! Command-line frontend for `linelog`.
//!
//! Logs each MESSAGE operand, or each line read from standard input when no
//! operands are given, through a [`Logger`] configured from the flags.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use logging::{Format, LogMessage, Logger, LoggingConfig, Severity};

/// Source name recorded for messages given as operands.
const OPERAND_SOURCE: &str = "linelog";
/// Source name recorded for messages read from standard input.
const STDIN_SOURCE: &str = "stdin";

/// Parsed command line.
#[derive(Debug, Default, Eq, PartialEq)]
struct ParsedArgs {
    config: LoggingConfig,
    severity: Option<Severity>,
    messages: Vec<String>,
}

impl ParsedArgs {
    fn severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::Info)
    }
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("linelog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Append log lines with a timestamped header to stderr or a log file.")
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .value_name("PATH")
                .help("Append to PATH instead of writing to standard error.")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Header layout: default or iso8601.")
                .value_parser(|value: &str| value.parse::<Format>())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("severity")
                .long("severity")
                .short('s')
                .value_name("SEVERITY")
                .help("Severity of the logged lines: error, warning or info (default).")
                .value_parser(|value: &str| value.parse::<Severity>())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("disable")
                .long("disable")
                .value_name("SEVERITY")
                .help("Suppress lines of SEVERITY (may be repeated).")
                .value_parser(|value: &str| value.parse::<Severity>())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase the verbosity level (may be repeated).")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("messages")
                .value_name("MESSAGE")
                .help("Messages to log; standard input is read when omitted.")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

fn parsed_from(matches: &ArgMatches) -> ParsedArgs {
    let mut config = LoggingConfig {
        out_file: matches.get_one::<PathBuf>("file").cloned(),
        format: matches
            .get_one::<Format>("format")
            .copied()
            .unwrap_or_default(),
        verbose: u32::from(matches.get_count("verbose")),
        ..LoggingConfig::default()
    };
    if let Some(disabled) = matches.get_many::<Severity>("disable") {
        for severity in disabled {
            config.set_enabled(*severity, false);
        }
    }

    ParsedArgs {
        config,
        severity: matches.get_one::<Severity>("severity").copied(),
        messages: matches
            .get_many::<String>("messages")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    }
}

fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let matches = clap_command().try_get_matches_from(arguments)?;
    Ok(parsed_from(&matches))
}

fn emit(logger: &Logger, severity: Severity, source: &str, line: u32, text: &str) {
    if logger.is_enabled(severity) {
        let mut message = LogMessage::with_logger(logger, source, line, severity.as_level());
        message.append(text);
    }
}

/// Runs `linelog` with explicit I/O handles and returns its exit status.
///
/// Help and version output go to `stdout`; usage and input errors go to
/// `stderr`. Log lines go wherever the configured logger sends them.
pub fn run_with<I, In, Out, Err>(
    arguments: I,
    stdin: In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    In: BufRead,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => {
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = write!(stdout, "{}", error.render());
                    ExitCode::SUCCESS
                }
                _ => {
                    let _ = write!(stderr, "{}", error.render());
                    ExitCode::from(1)
                }
            };
        }
    };

    let logger = parsed.config.build();
    let severity = parsed.severity();
    let status = if parsed.messages.is_empty() {
        log_lines(&logger, severity, stdin, stderr)
    } else {
        for (index, text) in parsed.messages.iter().enumerate() {
            let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
            emit(&logger, severity, OPERAND_SOURCE, position, text);
        }
        ExitCode::SUCCESS
    };

    logger.flush();
    status
}

fn log_lines<In, Err>(logger: &Logger, severity: Severity, stdin: In, stderr: &mut Err) -> ExitCode
where
    In: BufRead,
    Err: Write,
{
    for (index, line) in stdin.lines().enumerate() {
        match line {
            Ok(text) => {
                let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
                emit(logger, severity, STDIN_SOURCE, position, &text);
            }
            Err(error) => {
                let _ = writeln!(stderr, "linelog: failed to read standard input: {error}");
                return ExitCode::from(1);
            }
        }
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn parse(args: &[&str]) -> ParsedArgs {
        let mut full = vec![OsStr::new("linelog")];
        full.extend(args.iter().map(OsStr::new));
        parse_args(full).expect("arguments parse")
    }

    #[test]
    fn defaults_log_info_to_stderr() {
        let parsed = parse(&["hello"]);
        assert_eq!(parsed.config, LoggingConfig::default());
        assert_eq!(parsed.severity(), Severity::Info);
        assert_eq!(parsed.messages, vec!["hello"]);
    }

    #[test]
    fn flags_populate_config() {
        let parsed = parse(&[
            "--file",
            "/tmp/app.log",
            "--format",
            "iso8601",
            "-s",
            "warn",
            "--disable",
            "info",
            "-vv",
            "a",
            "b",
        ]);

        assert_eq!(parsed.config.out_file, Some(PathBuf::from("/tmp/app.log")));
        assert_eq!(parsed.config.format, Format::Iso8601);
        assert!(!parsed.config.info);
        assert!(parsed.config.warning);
        assert_eq!(parsed.config.verbose, 2);
        assert_eq!(parsed.severity(), Severity::Warning);
        assert_eq!(parsed.messages, vec!["a", "b"]);
    }

    #[test]
    fn unknown_format_is_usage_error() {
        let error = parse_args(["linelog", "--format", "xml"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn help_goes_to_stdout() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = run_with(["linelog", "--help"], &b""[..], &mut stdout, &mut stderr);

        assert_eq!(status, ExitCode::SUCCESS);
        assert!(stderr.is_empty());
        assert!(String::from_utf8(stdout).unwrap().contains("Usage:"));
    }

    #[test]
    fn bad_flag_goes_to_stderr() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = run_with(["linelog", "--bogus"], &b""[..], &mut stdout, &mut stderr);

        assert_eq!(status, ExitCode::from(1));
        assert!(stdout.is_empty());
        assert!(!stderr.is_empty());
    }

    #[test]
    fn disabled_severity_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let path_arg = path.to_str().unwrap();
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let status = run_with(
            ["linelog", "-f", path_arg, "--disable", "info", "muted"],
            &b""[..],
            &mut stdout,
            &mut stderr,
        );

        assert_eq!(status, ExitCode::SUCCESS);
        assert!(!path.exists());
    }

    #[test]
    fn stdin_lines_are_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let path_arg = path.to_str().unwrap();
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let status = run_with(
            ["linelog", "-f", path_arg, "-s", "error"],
            &b"first\nsecond\n"[..],
            &mut stdout,
            &mut stderr,
        );

        assert_eq!(status, ExitCode::SUCCESS);
        let lines = test_support::read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('E'));
        assert!(lines[0].ends_with(" stdin:1] first"));
        assert!(lines[1].ends_with(" stdin:2] second"));
    }
}
