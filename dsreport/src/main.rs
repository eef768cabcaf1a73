use clap::Parser;
use dsreport::{init_logging, run, Cli};
use std::process;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("dsreport: {:#}", err);
            process::exit(1);
        }
    }
}
