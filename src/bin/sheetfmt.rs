fn main() {
    tktoolbox::logging::init();
    if let Err(err) = tktoolbox::formatter::run(std::env::args_os()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
