fn main() {
    if let Err(e) = vidhub::run() {
        eprintln!("Failed to start vidhub: {}", e);
        std::process::exit(1);
    }
}
