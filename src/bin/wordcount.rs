use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::ExitCode;
use wordcount::config::Config;
use wordcount::count::{count_words, write_counts};
use wordcount::{logging, Error};

fn run(cfg: &Config) -> Result<(), Error> {
    let table = match cfg.input_path() {
        Some(path) => count_words(BufReader::new(File::open(path)?), cfg)?,
        None => count_words(io::stdin().lock(), cfg)?,
    };
    let mut out = BufWriter::new(io::stdout().lock());
    write_counts(&table, &mut out)?;
    out.flush()?;
    table.destroy();
    Ok(())
}

fn main() -> ExitCode {
    let cfg = Config::parse();
    logging::init(cfg.verbose);
    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
