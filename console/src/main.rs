#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

mod session;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use clap::{Arg, ArgAction, Command};
use log::{debug, info};

use crate::session::{Flow, Session};

fn main() -> io::Result<()> {
    env_logger::init();

    let matches = Command::new("fsa")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Console for building, combining and inspecting finite automata")
        .arg(
            Arg::new("SCRIPT")
                .help("Read commands from this file instead of standard input")
                .index(1),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Do not print a prompt before each command")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let quiet = matches.get_flag("quiet");
    let input: Box<dyn BufRead> = match matches.get_one::<String>("SCRIPT") {
        Some(path) => {
            info!("reading commands from {:?}", path);
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    run(input, quiet)
}

fn run<R: BufRead>(input: R, quiet: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::new();

    if !quiet {
        write!(out, "> ")?;
        out.flush()?;
    }
    for line in input.lines() {
        match session.execute(&line?, &mut out) {
            Ok(Flow::Exit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => {
                debug!("command failed: {:?}", e);
                eprintln!("{}", e);
            }
        }
        if !quiet {
            write!(out, "> ")?;
            out.flush()?;
        }
    }

    Ok(())
}
