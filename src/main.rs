use std::process::ExitCode;

fn main() -> ExitCode {
    pushqueue::app::startup::startup()
}
