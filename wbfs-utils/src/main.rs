mod cat;
mod device;
mod dump;
mod extract;
mod info;

use clap::Parser;

#[derive(Debug, clap::Args)]
struct Dump {
    /// Byte offset into the disc
    #[clap(short, long, default_value_t = 0)]
    offset: u64,
    /// Number of bytes to dump
    #[clap(short, long, default_value_t = 256)]
    length: usize,
}

#[derive(Debug, clap::Args)]
struct Extract {
    /// Specify file to write the disc image to
    output: String,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Show partition geometry and first disc
    Info,
    /// Write first disc to the standard output
    Cat,
    /// Hex dump part of the first disc
    Dump(Dump),
    /// Extract first disc to a file, holes filled with zeros
    Extract(Extract),
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    quiet: bool,
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// block device or image file formatted with WBFS
    #[clap(short, long)]
    device: String,
    /// MBR primary partition holding WBFS, whole device if absent
    #[clap(short, long)]
    partition: Option<usize>,
    #[clap(subcommand)]
    action: Action,
}

fn main() {
    let args = Args::parse();
    let level = match (args.quiet, args.verbosity) {
        (true, _) => log::LevelFilter::Off,
        (_, 0) => log::LevelFilter::Info,
        (_, 1) => log::LevelFilter::Debug,
        (_, _) => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).target(env_logger::Target::Stderr).init();

    let result = device::open(&args.device, args.partition).and_then(|device| match args.action {
        Action::Info => info::info(&device),
        Action::Cat => cat::cat(&device),
        Action::Dump(args) => dump::dump(&device, args.offset, args.length),
        Action::Extract(args) => extract::extract(&device, &args.output),
    });
    if let Some(error) = result.err() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
