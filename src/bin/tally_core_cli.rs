fn main() {
    tally_core::init();
    if let Err(err) = tally_core::cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
