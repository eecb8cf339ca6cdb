use std::process::ExitCode;

fn main() -> ExitCode {
    bookly::init();

    match bookly::cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bookly: {err}");
            ExitCode::FAILURE
        }
    }
}
