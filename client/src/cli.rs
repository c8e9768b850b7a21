use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "SPBTS Analysis Client")]
#[clap(about = "Measures how often pieces block pawns on their start squares", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Analyze(AnalyzeCommand),
    Trace(TraceCommand),
    Compare(CompareCommand),
}

/// Options shared by every command. Flags override the config file.
#[derive(Args)]
pub struct OptionsArgs {
    #[clap(short, long, default_value_t = String::from("spbts.conf"))]
    pub config: String,

    #[clap(long)]
    pub max_plies: Option<usize>,

    /// File letter whose pawns the bucket and fate classifiers follow.
    #[clap(long)]
    pub file: Option<String>,

    #[clap(long)]
    pub min_exposure: Option<usize>,
}

#[derive(Args)]
#[clap(about = "Analyses every game of a PGN file, one JSON line per game", long_about = None)]
pub struct AnalyzeCommand {
    /// PGN file, optionally gzip compressed.
    pub pgn: String,

    #[clap(short, long)]
    pub out: Option<String>,

    #[clap(flatten)]
    pub options: OptionsArgs,
}

#[derive(Args)]
#[clap(about = "Writes the per ply observations of one game, one JSON line per row", long_about = None)]
pub struct TraceCommand {
    pub pgn: String,

    /// One based position of the game in the file.
    #[clap(short, long, default_value_t = 1)]
    pub game: usize,

    #[clap(short, long)]
    pub out: Option<String>,

    #[clap(flatten)]
    pub options: OptionsArgs,
}

#[derive(Args)]
#[clap(about = "Compares the SPBTS rates of two collections of games", long_about = None)]
pub struct CompareCommand {
    pub cohort1: String,

    pub cohort2: String,

    /// Defaults to the file name of the first collection.
    #[clap(long)]
    pub name1: Option<String>,

    #[clap(long)]
    pub name2: Option<String>,

    #[clap(short, long)]
    pub out: Option<String>,

    #[clap(flatten)]
    pub options: OptionsArgs,
}
