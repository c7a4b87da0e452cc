use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;

use mail_threader::report::{sort_by_date, write_report};
use mail_threader::sync::read_mbox;
use mail_threader::{ThreaderConfig, ThreaderError, build_threads, init_logger};

#[derive(Parser, Debug)]
#[command(
    name = "mail-threader",
    about = "Reconstruct conversation threads from mbox archives"
)]
struct Args {
    /// Mailbox file to read; repeat to thread several mailboxes together.
    #[arg(long, required = true)]
    mbox: Vec<PathBuf>,

    /// Write the report here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print indented thread outlines instead of JSON.
    #[arg(long)]
    tree: bool,

    /// Order replies by their Date header.
    #[arg(long)]
    sort_by_date: bool,

    /// Emit compact single-line JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<(), ThreaderError> {
    init_logger();

    let args = Args::parse();
    let mut config = ThreaderConfig::from_env();
    config.sort_by_date |= args.sort_by_date;
    if args.compact {
        config.pretty_json = false;
    }

    let mut messages = Vec::new();
    for path in &args.mbox {
        messages.extend(read_mbox(path, &config)?);
    }

    log::info!("threading {} messages", messages.len());
    let mut forest = build_threads(messages);
    if config.sort_by_date {
        sort_by_date(&mut forest);
    }
    log::info!(
        "built {} threads covering {} messages",
        forest.len() + forest.unsubjected().len(),
        forest.message_count()
    );

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write_report(&forest, writer, args.tree, config.pretty_json)?;

    if let Some(path) = &args.output {
        log::info!("report written to {}", path.display());
    }

    Ok(())
}
