use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    site_core::init();
    let args: Vec<String> = env::args().skip(1).collect();
    match site_core::cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            site_core::cli::output::error(&err);
            ExitCode::FAILURE
        }
    }
}
