use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use minefield_core::{CellCount, Coord, Difficulty, Minefield};
use tracing_subscriber::filter::LevelFilter;

use command::Command;
use session::Session;

mod command;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Clear the minefield without hitting a mine", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Preset to start with: beginner, intermediate or expert
    #[arg(short, long, default_value = "beginner")]
    difficulty: Difficulty,

    /// Custom field width, needs --height and --mines
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    /// Custom field height, needs --width and --mines
    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,

    /// Custom mine count, needs --width and --height
    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,

    /// Force a seed for the first game instead of deriving one from the clock
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn starting_difficulty(&self) -> Difficulty {
        match (self.width, self.height, self.mines) {
            (Some(width), Some(height), Some(mines)) => Difficulty::Custom {
                width,
                height,
                mines,
            },
            _ => self.difficulty,
        }
    }
}

fn init_logging(filter: log::LevelFilter) {
    let level = match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    // also forwards the `log` records of the engine
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());
    tracing::debug!(?args, "starting");

    let difficulty = args.starting_difficulty();
    let mut field = Minefield::new(difficulty)
        .with_context(|| format!("Could not create a {difficulty} minefield"))?;
    if let Some(seed) = args.seed {
        field = field.with_seed(seed);
    }

    let mut session = Session::new(field);
    let mut stdout = io::stdout().lock();
    let mut lines = io::stdin().lock().lines();

    writeln!(stdout, "{}", session.board())?;
    writeln!(stdout, "Type h for help.")?;

    loop {
        let field = session.field();
        // the prompt doubles as the timer tick while a game is running
        if field.needs_tick() {
            write!(stdout, "{}s> ", field.elapsed_secs())?;
        } else {
            write!(stdout, "> ")?;
        }
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read command")?;

        let reply = match Command::parse(&line) {
            Ok(command) => session.update(command),
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };

        if reply.redraw {
            writeln!(stdout, "{}", session.board())?;
        }
        if let Some(message) = reply.message {
            writeln!(stdout, "{message}")?;
        }
        if reply.quit {
            break;
        }
    }

    Ok(())
}
