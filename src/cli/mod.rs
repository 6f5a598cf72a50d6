use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufRead, Read, Write};
use tracing::{debug, info, warn};

use crate::application::script::HELP;
use crate::application::{AccountSession, Command, Dispatched, parse_line, parse_script};
use crate::domain::{AccountView, Control, format_amount};
use crate::io::{ExportFormat, Exporter, render_text};

/// Teller - a single bank account with at most one loan
#[derive(Parser)]
#[command(name = "teller")]
#[command(about = "Open, fund, borrow against and close a single bank account")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a script of account commands and print the final account
    Run {
        /// Script file ("-" or omitted reads stdin)
        script: Option<String>,

        /// Output format: text, json, csv
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Print the balance and loan after every command
        #[arg(long)]
        trace: bool,
    },

    /// Start an interactive account shell
    Shell,

    /// List the commands understood by scripts and the shell
    Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run {
                script,
                format,
                output,
                trace,
            } => {
                let format = ExportFormat::from_str(&format).with_context(|| {
                    format!("Invalid format '{}'. Valid formats: text, json, csv", format)
                })?;
                let text = read_script(script.as_deref())?;

                let mut session = AccountSession::new();
                let stdout = std::io::stdout();
                run_script(&mut session, &text, trace, &mut stdout.lock())?;

                let writer: Box<dyn Write> = match output.as_deref() {
                    Some(path) => {
                        let file = File::create(path)
                            .with_context(|| format!("Failed to create output file: {}", path))?;
                        Box::new(file)
                    }
                    None => Box::new(std::io::stdout()),
                };
                Exporter::new(&session).export(format, writer)?;

                if let Some(path) = output {
                    eprintln!("Exported account ({}) to {}", format, path);
                }
            }

            Commands::Shell => {
                let mut session = AccountSession::new();
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                run_shell(&mut session, stdin.lock(), &mut stdout.lock())?;
            }

            Commands::Commands => {
                println!("{}", HELP);
            }
        }

        Ok(())
    }
}

fn read_script(path: Option<&str>) -> Result<String> {
    let mut text = String::new();
    match path {
        None | Some("-") => {
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read script from stdin")?;
        }
        Some(path) => {
            File::open(path)
                .with_context(|| format!("Failed to open script: {}", path))?
                .read_to_string(&mut text)
                .with_context(|| format!("Failed to read script: {}", path))?;
        }
    }
    Ok(text)
}

/// Dispatch every command of a script against the session.
///
/// The whole script is parsed before anything is dispatched, so a typo on
/// the last line leaves the account untouched. `quit` stops the run early.
/// A command whose control is disabled is skipped and the run continues.
pub fn run_script<W: Write>(
    session: &mut AccountSession,
    text: &str,
    trace: bool,
    out: &mut W,
) -> Result<()> {
    let commands = parse_script(text).context("Invalid script")?;
    info!(commands = commands.len(), "running script");

    for (line, command) in commands {
        match command {
            Command::Actions(actions) => match session.press(actions) {
                Ok(outcomes) => {
                    if trace {
                        writeln!(out, "{}", trace_line(line, &outcomes))?;
                    }
                }
                Err(e) => {
                    warn!(line, "command refused: {}", e);
                    if trace {
                        writeln!(out, "{:>4}  refused: {}", line, e)?;
                    }
                }
            },
            Command::Status => write!(out, "{}", render_text(session.state()))?,
            Command::Export(format) => {
                Exporter::new(session).export(format, &mut *out)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {
                debug!(line, "script stopped by quit");
                break;
            }
        }
    }

    Ok(())
}

/// Run the interactive prompt until `quit` or end of input.
///
/// Bad input is reported and the prompt continues; it never reaches the
/// account.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut AccountSession,
    input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Teller account shell. Type 'help' for commands.")?;
    render_screen(session.view(), out)?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(out, "{}", HELP)?,
            Ok(Some(Command::Status)) => render_screen(session.view(), out)?,
            Ok(Some(Command::Export(format))) => {
                Exporter::new(session).export(format, &mut *out)?;
            }
            Ok(Some(Command::Actions(actions))) => match session.press(actions) {
                Ok(outcomes) => {
                    if let Some(reason) = outcomes.last().and_then(Dispatched::noop_reason) {
                        writeln!(out, "Nothing happened ({})", reason)?;
                    }
                    render_screen(session.view(), out)?;
                }
                Err(e) => {
                    debug!(input = %line, "shell command refused: {}", e);
                    writeln!(out, "{}", e)?;
                }
            },
            Err(e) => {
                warn!(input = %line, "rejected shell input: {}", e);
                writeln!(out, "Error: {}", e)?;
            }
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

fn render_screen<W: Write>(view: AccountView, out: &mut W) -> Result<()> {
    writeln!(out, "Balance: {}", format_amount(view.balance))?;
    writeln!(out, "Loan: {}", format_amount(view.loan))?;

    let enabled = view.enabled_controls();
    if enabled.len() == Control::ALL.len() {
        writeln!(out, "Controls: all enabled")?;
    } else {
        let labels: Vec<&str> = enabled.iter().map(|c| c.label()).collect();
        writeln!(out, "Controls: {} (open the account to enable the rest)", labels.join(", "))?;
    }
    Ok(())
}

fn trace_line(line: usize, outcomes: &[Dispatched]) -> String {
    let kinds: Vec<&str> = outcomes.iter().map(|o| o.kind.as_str()).collect();
    let (balance, loan) = outcomes
        .last()
        .map(|o| (o.after.balance, o.after.loan))
        .unwrap_or_default();
    // A command counts as a no-op when its final action changed nothing
    let marker = match outcomes.last().and_then(Dispatched::noop_reason) {
        Some(reason) => format!("  (no change: {})", reason),
        None => String::new(),
    };
    format!(
        "{:>4}  {:<36} balance={:<10} loan={}{}",
        line,
        kinds.join(" + "),
        format_amount(balance),
        format_amount(loan),
        marker
    )
}
