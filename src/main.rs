use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use lyricollect::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Collect tracks, lyrics and languages of one album
    Collect(CollectOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CollectOptions {
    /// Artist to search for (default: TARGET_ARTIST)
    #[clap(long)]
    pub artist: Option<String>,

    /// Exact album name (default: TARGET_ALBUM)
    #[clap(long)]
    pub album: Option<String>,

    /// Output file (default: OUTPUT_FILE or <album>.jsonl)
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Number of tracks processed at the same time
    #[clap(long)]
    pub concurrency: Option<usize>,

    /// Maximum number of catalog pages to follow
    #[clap(long)]
    pub max_pages: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Collect(opt) => {
            if let Err(e) = config::load_env().await {
                error!("Cannot load environment. Err: {}", e);
            }

            cli::collect(cli::CollectOverrides {
                artist: opt.artist,
                album: opt.album,
                output: opt.output,
                concurrency: opt.concurrency,
                max_pages: opt.max_pages,
            })
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
