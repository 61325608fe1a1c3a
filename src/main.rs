fn main() {
    if let Err(err) = ecgstage::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
