//! Command-line arguments
//!
//! Ansible calls inventory scripts with either `--list` or `--host <name>`.

use clap::error::ErrorKind;
use clap::{ArgAction, ArgGroup, CommandFactory, Parser};

/// Ansible dynamic inventory for Hetzner Cloud
#[derive(Parser, Debug)]
#[command(name = "ansible-hcloud-inventory", version)]
#[command(group(ArgGroup::new("mode").required(true).args(["list", "ini", "host"])))]
pub struct Cli {
    /// Show all groups including variables as JSON structure
    #[arg(long)]
    list: bool,

    /// Show all groups including variables as INI inventory
    #[arg(long)]
    ini: bool,

    /// Show all variables for one host as JSON structure
    #[arg(long, value_name = "HOSTNAME")]
    host: Option<String>,

    /// Log more details to stderr (repeat for debug output)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Full inventory as JSON
    List,
    /// Full inventory as INI
    Ini,
    /// Variables of one host as JSON
    Host(String),
}

impl Cli {
    /// Selected output mode
    #[must_use]
    pub fn mode(&self) -> Mode {
        match (&self.host, self.ini) {
            (Some(host), _) => Mode::Host(host.clone()),
            (None, true) => Mode::Ini,
            (None, false) => Mode::List,
        }
    }
}

/// Parse process arguments
///
/// On invalid arguments the usage text is printed to stdout and the process
/// exits with status 1. `--help` and `--version` exit with status 0.
pub fn parse() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("{}", error_message(&err));
            println!("{}", Cli::command().render_help());
            std::process::exit(1);
        }
    }
}

/// Clap's error text without its usage section, which goes to stdout
fn error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let message = rendered
        .split("\nUsage:")
        .next()
        .unwrap_or_default()
        .trim_end();
    message.to_string()
}
