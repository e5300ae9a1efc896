use std::process::ExitCode;

fn main() -> ExitCode {
    ferrum_tables::cli::run()
}
