//! Story viewer entry point

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use sv_core::{
    data::FeedSource, PlaybackDriver, PlaybackEngine, PlaybackSettings, PlaybackSubscriber,
    Position, SharedEngine,
};
use sv_data::{load_settings, BaseUrlResolver, JsonFeedSource};

mod gestures;
mod presenter;

use gestures::Gesture;
use presenter::TerminalPresenter;

const USAGE: &str = "usage: storyview <feed.json> [--settings <settings.json>] [--owner <n>] [--item <n>] [--media-base <url>]";

/// Command line options
struct Options {
    feed: PathBuf,
    settings: Option<PathBuf>,
    owner: usize,
    item: usize,
    media_base: String,
}

impl Options {
    fn from_env() -> Result<Self> {
        let mut args = pico_args::Arguments::from_env();
        if args.contains(["-h", "--help"]) {
            println!("{}", USAGE);
            std::process::exit(0);
        }

        let settings = args.opt_value_from_str("--settings")?;
        let owner = args.opt_value_from_str("--owner")?.unwrap_or(0);
        let item = args.opt_value_from_str("--item")?.unwrap_or(0);
        let media_base = args
            .opt_value_from_str("--media-base")?
            .unwrap_or_else(|| "https://media.localhost".to_string());
        let feed = args
            .finish()
            .into_iter()
            .next()
            .map(PathBuf::from)
            .context(USAGE)?;

        Ok(Self {
            feed,
            settings,
            owner,
            item,
            media_base,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let options = Options::from_env()?;

    let settings = match &options.settings {
        Some(path) => load_settings(path)
            .await
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => PlaybackSettings::default(),
    };

    let source = JsonFeedSource::new(&options.feed);
    let feed = Arc::new(
        source
            .load_feed()
            .await
            .with_context(|| format!("loading feed from {}", source.source_name()))?,
    );

    let engine = PlaybackEngine::open(
        feed.clone(),
        Position::new(options.owner, options.item),
        settings,
    );
    if engine.is_closed() {
        info!("No stories to show");
        return Ok(());
    }

    let presenter: Arc<dyn PlaybackSubscriber> = Arc::new(TerminalPresenter::new(
        feed,
        BaseUrlResolver::new(options.media_base),
    ));
    let engine: SharedEngine = Arc::new(Mutex::new(engine));
    engine.lock().add_subscriber(presenter.clone());

    println!("{}", gestures::HELP);
    let driver = PlaybackDriver::spawn(engine.clone());
    run_until_closed(&engine, driver).await?;

    info!("Story viewer finished");
    Ok(())
}

/// Feed stdin gestures to the engine until playback ends
async fn run_until_closed(engine: &SharedEngine, driver: PlaybackDriver) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let finished = driver.join();
    tokio::pin!(finished);

    loop {
        tokio::select! {
            _ = &mut finished => break,
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => match Gesture::parse(&line) {
                    Some(gesture) => gesture.apply(&mut *engine.lock()),
                    None if line.trim().is_empty() => {}
                    None => warn!("Unknown input '{}'. {}", line.trim(), gestures::HELP),
                },
                None => stdin_open = false,
            },
        }
    }

    Ok(())
}
