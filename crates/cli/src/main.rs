use std::process::ExitCode;

fn main() -> ExitCode {
    nutrisite_cli::run()
}
