use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    refclip::init();

    let cli = refclip::cli::Cli::parse();
    match refclip::cli::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
