use std::process::ExitCode;

fn main() -> ExitCode {
    permit_cli::run()
}
