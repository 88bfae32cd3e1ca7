//! Command-line front end: inspect, transcode and analyze audio files.

mod cli;

fn main() {
    if let Err(err) = cli::run(std::env::args().skip(1).collect()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
