use std::process;

fn main() {
    if let Err(err) = code_archive::app::run() {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
