//! radar-ingest main entrypoint.

use radar_ingest::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
