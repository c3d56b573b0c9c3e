use std::process::ExitCode;

fn main() -> ExitCode {
    match crossway_register::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("crossway-register: {err:#}");
            ExitCode::FAILURE
        }
    }
}
