use clap::{Parser, Subcommand, ValueEnum};
use langmerge::{
    Codec, Error, convert_auto,
    formats::ui_constants,
    reconcile::reconcile,
    report::ReportWriter,
    script_shift, tagging,
    traits::Parser as _,
    types::Resource,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert snapshot files between formats (by extension: lang, txt, str).
    Convert {
        /// The input file to process
        #[arg(short, long)]
        input: String,
        /// The output file to write the results to
        #[arg(short, long)]
        output: String,
    },

    /// Reconcile a previous translation against old and new source snapshots.
    Reconcile {
        /// The translated snapshot (e.g. kr_cur.lang.txt)
        #[arg(short, long)]
        translated: String,
        /// The previous (live) source snapshot
        #[arg(short, long)]
        live: String,
        /// The current (pts) source snapshot
        #[arg(short, long)]
        pts: String,
        /// Directory for the output streams
        #[arg(short, long, default_value = ".")]
        out: String,
    },

    /// Classify source changes between two snapshots, without a translation.
    Diff {
        /// The previous (live) source snapshot
        #[arg(short, long)]
        live: String,
        /// The current (pts) source snapshot
        #[arg(short, long)]
        pts: String,
        /// Directory for the output streams
        #[arg(short, long, default_value = ".")]
        out: String,
    },

    /// Pair a plain text export with its key list into tagged lines.
    Tag {
        /// File with one text line per entry
        #[arg(short, long)]
        text: String,
        /// File with one key per entry
        #[arg(short, long)]
        keys: String,
        /// The tagged output file
        #[arg(short, long)]
        output: String,
    },

    /// Strip tags from a tagged export, leaving plain text lines.
    Untag {
        /// The tagged input file
        #[arg(short, long)]
        input: String,
        /// The plain text output file
        #[arg(short, long)]
        output: String,
    },

    /// Prefix UI constants with their table position.
    Prefix {
        /// The .str input file
        #[arg(short, long)]
        input: String,
        /// The prefixed output file
        #[arg(short, long)]
        output: String,
        /// Table domain; inferred from the file name when omitted
        #[arg(short, long)]
        domain: Option<DomainArg>,
    },

    /// Remove position prefixes from UI constants.
    Unprefix {
        /// The prefixed .str input file
        #[arg(short, long)]
        input: String,
        /// The clean output file
        #[arg(short, long)]
        output: String,
    },

    /// Shift text between Hangul and the client font's code point window.
    Shift {
        /// The UTF-8 input file
        #[arg(short, long)]
        input: String,
        /// The shifted output file
        #[arg(short, long)]
        output: String,
        /// Shift direction
        #[arg(short, long)]
        direction: ShiftDirection,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShiftDirection {
    /// Hangul into the client window
    ToClient,
    /// Client window back to Hangul
    FromClient,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DomainArg {
    Client,
    Pregame,
}

impl From<DomainArg> for tagging::TagDomain {
    fn from(value: DomainArg) -> Self {
        match value {
            DomainArg::Client => tagging::TagDomain::Client,
            DomainArg::Pregame => tagging::TagDomain::Pregame,
        }
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args.commands) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Convert { input, output } => convert_auto(input, output),
        Commands::Reconcile {
            translated,
            live,
            pts,
            out,
        } => {
            let translated = read_resource(&translated)?;
            let live = read_resource(&live)?;
            let pts = read_resource(&pts)?;
            let report = reconcile(&translated, &live, &pts);
            print_summary(&report.summary);
            ReportWriter::new(&report).write_all(out)
        }
        Commands::Diff { live, pts, out } => {
            let live = read_resource(&live)?;
            let pts = read_resource(&pts)?;
            let report = reconcile(&Resource::new(""), &live, &pts);
            print_summary(&report.summary);
            ReportWriter::new(&report).write_all(out)
        }
        Commands::Tag { text, keys, output } => {
            let texts = read_lines(&text)?;
            let keys = read_lines(&keys)?;
            tagging::tag_export(&keys, &texts)?.write_to(output)
        }
        Commands::Untag { input, output } => {
            let content = std::fs::read_to_string(input).map_err(Error::Io)?;
            let mut lines = tagging::strip_export_tags(&content).join("\n");
            lines.push('\n');
            std::fs::write(output, lines).map_err(Error::Io)
        }
        Commands::Prefix {
            input,
            output,
            domain,
        } => {
            let table = ui_constants::Format::read_from(&input)?;
            let domain = domain
                .map(tagging::TagDomain::from)
                .or_else(|| tagging::TagDomain::from_path(&input))
                .ok_or_else(|| {
                    Error::DataMismatch(format!(
                        "cannot infer table domain from `{}`; pass --domain",
                        input
                    ))
                })?;
            tagging::prefix_constants(&table, domain).write_to(output)
        }
        Commands::Unprefix { input, output } => {
            let table = ui_constants::Format::read_from(&input)?;
            tagging::strip_constant_prefixes(&table).write_to(output)
        }
        Commands::Shift {
            input,
            output,
            direction,
        } => {
            let content = std::fs::read_to_string(input).map_err(Error::Io)?;
            let shifted = match direction {
                ShiftDirection::ToClient => script_shift::to_client_encoding(&content),
                ShiftDirection::FromClient => script_shift::from_client_encoding(&content),
            };
            std::fs::write(output, shifted).map_err(Error::Io)
        }
    }
}

fn read_resource(path: &str) -> Result<Resource, Error> {
    let mut codec = Codec::new();
    codec.read_file_by_extension(path, None)?;
    Ok(codec.resources.remove(0))
}

fn read_lines(path: &str) -> Result<Vec<String>, Error> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    Ok(content.lines().map(str::to_string).collect())
}

fn print_summary(summary: &langmerge::reconcile::ReconcileSummary) {
    println!("{}: new indexes added", summary.added);
    println!("{}: indexes matched", summary.matched);
    println!("{}: indexes were a close match", summary.close_matches);
    println!("{}: indexes changed", summary.changed);
    println!("{}: indexes deleted", summary.deleted);
    println!("{}: translations reused", summary.reused);
    println!("{}: indexes need verification", summary.needs_verification);
}
