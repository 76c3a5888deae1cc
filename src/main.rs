use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotkit::{cli, config, error, types::SearchKind};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage API credentials and the cached token
    Auth(AuthOptions),

    /// Search the catalog
    Search(SearchOptions),

    /// Show a single artist
    Artist(IdOption),

    /// List an artist's albums
    ArtistAlbums(ArtistAlbumsOptions),

    /// Show an artist's top tracks for a country market
    TopTracks(TopTracksOptions),

    /// Show a single track
    Track(IdOption),

    /// Show details for several albums
    Albums(IdsOption),

    /// Show audio features for several tracks
    Features(IdsOption),

    /// Show the audio analysis summary of a track
    Analysis(IdOption),

    /// Download a track via the external downloader
    Download(DownloadOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthSubcommand {
    /// Refresh the cached token if it is stale
    Refresh(AuthRefreshOpts),

    /// Store the API client credentials
    SetKey(AuthSetKeyOpts),

    /// Show whether the cached token is still valid
    Status,
}

#[derive(Parser, Debug, Clone)]
pub struct AuthRefreshOpts {
    /// Force a new token even if the cached one is still valid
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct AuthSetKeyOpts {
    /// Spotify application client ID
    pub client_id: String,

    /// Spotify application client secret
    pub client_secret: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search query
    pub query: String,

    /// Entity type to search for
    #[clap(long, value_enum, default_value_t = SearchKind::Artist)]
    pub kind: SearchKind,

    /// Maximum number of results; values above 50 are assembled from
    /// multiple pages
    #[clap(long, default_value_t = 10)]
    pub limit: u64,

    /// Result offset to start from
    #[clap(long, default_value_t = 0)]
    pub offset: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct IdOption {
    /// Spotify ID
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct IdsOption {
    /// Spotify IDs
    #[clap(required = true)]
    pub ids: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistAlbumsOptions {
    /// Spotify artist ID
    pub id: String,

    /// Result offset to start from
    #[clap(long, default_value_t = 0)]
    pub offset: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct TopTracksOptions {
    /// Spotify artist ID
    pub id: String,

    /// Country market code
    #[clap(long, default_value = "US")]
    pub country: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadOptions {
    /// Spotify track ID
    pub track_id: String,

    /// Output directory (defaults to SPOTIFY_DOWNLOAD_DIR or the current
    /// directory)
    #[clap(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => match opt.command {
            AuthSubcommand::Refresh(r) => cli::refresh(r.force).await,
            AuthSubcommand::SetKey(k) => cli::set_key(k.client_id, k.client_secret).await,
            AuthSubcommand::Status => cli::status().await,
        },

        Command::Search(opt) => cli::search(opt.query, opt.kind, opt.limit, opt.offset).await,
        Command::Artist(opt) => cli::artist(opt.id).await,
        Command::ArtistAlbums(opt) => cli::artist_albums(opt.id, opt.offset).await,
        Command::TopTracks(opt) => cli::top_tracks(opt.id, opt.country).await,
        Command::Track(opt) => cli::track(opt.id).await,
        Command::Albums(opt) => cli::albums(opt.ids).await,
        Command::Features(opt) => cli::features(opt.ids).await,
        Command::Analysis(opt) => cli::analysis(opt.id).await,
        Command::Download(opt) => cli::download(opt.track_id, opt.output).await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
