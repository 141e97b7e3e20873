//! LVL CLI - turn leveling survey files into baseline-relative elevation tables.

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(
    name = "lvl-cli",
    version,
    about = "Leveling survey preprocessing toolkit"
)]
struct Cli {
    /// Verbose output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: lvl_cmd::Command,
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter(cli.verbose)),
    )
    .init();
    lvl_cmd::run(cli.command)
}
