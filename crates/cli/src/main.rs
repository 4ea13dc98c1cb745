use std::process::ExitCode;

fn main() -> ExitCode {
    fincoach_cli::run()
}
