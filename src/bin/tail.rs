use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::ExitCode;
use wordcount::config::TailConfig;
use wordcount::{logging, tail, Error};

fn run(cfg: &TailConfig) -> Result<(), Error> {
    let mut out = BufWriter::new(io::stdout().lock());
    match &cfg.input {
        Some(path) => tail::run(BufReader::new(File::open(path)?), cfg.mode, &mut out)?,
        None => tail::run(io::stdin().lock(), cfg.mode, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cfg = TailConfig::from_args(std::env::args_os()).unwrap_or_else(|e| e.exit());
    logging::init(cfg.verbose);
    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
