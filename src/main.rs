//! `fieldmanual` - Documentation build preparation for plugin platforms

use clap::Parser;

use fieldmanual::cli::args::Cli;
use fieldmanual::cli::commands;
use fieldmanual::error::ExitCode;
use fieldmanual::observability::{LogFormat, init_logging};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and --version arrive here too and must exit 0
            let _ = e.print();
            let code = if e.exit_code() == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::USAGE_ERROR
            };
            std::process::exit(code);
        }
    };

    if !cli.quiet {
        init_logging(LogFormat::Human, cli.verbose, cli.color);
    }

    let result = commands::dispatch(cli);

    match result {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
