use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use sharebook::core::config::{self, CliOverrides, SharebookConfig};
use sharebook::core::{Effect, Game, JsonFileStore};
use sharebook::present::display::{DisplayMirror, DisplayQueue, HttpDisplay};
use sharebook::{plain, tui};

#[derive(Parser)]
#[command(name = "sharebook", about = "Money and share ledger for 18xx games")]
struct Args {
    /// Line-by-line REPL on stdin/stdout instead of the full-screen interface
    #[arg(long)]
    plain: bool,

    /// Open this game instead of the last one played
    #[arg(short, long)]
    game: Option<String>,

    /// Dashboard URL to mirror game state to
    #[arg(long)]
    display_url: Option<String>,

    /// Directory holding games.json and sharebook.log
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (SharebookConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        data_dir: args.data_dir,
        display_url: args.display_url,
    };
    let resolved = config::resolve(&file_config, &cli);
    fs::create_dir_all(&resolved.data_dir)?;

    // Initialize file logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(resolved.data_dir.join("sharebook.log")) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
        eprintln!("Ignoring config file: {e}");
    }
    log::info!("Sharebook starting up with config: {:?}", resolved);

    let store = JsonFileStore::open(&resolved.data_dir).map_err(io::Error::other)?;
    let mut game = Game::new(store, &resolved.default_currency);
    let mut greeting = game.create_or_load().map_err(io::Error::other)?;
    if let Some(name) = args.game {
        let reply = game
            .execute(&format!("open {name}"))
            .map_err(io::Error::other)?;
        if reply.effect == Effect::Refresh {
            greeting = reply.feedback;
        } else {
            greeting.push_str(&reply.feedback);
        }
    }

    let display = resolved.display_url.map(|url| {
        log::info!("Mirroring game state to {}", url);
        DisplayQueue::start(Arc::new(HttpDisplay::new(url)) as Arc<dyn DisplayMirror>)
    });

    let result = if args.plain {
        plain::run(game, display.as_ref(), &greeting)
    } else {
        tui::run(game, display.as_ref(), &greeting)
    };
    if let Some(display) = display {
        display.close().await;
    }
    result
}
