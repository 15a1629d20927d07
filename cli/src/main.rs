mod app;
mod config;
mod view;
mod widget;

use std::fs::File;
use std::time::Instant;

use anyhow::Context;
use simplelog::{ConfigBuilder, WriteLogger};
use tokio_util::sync::CancellationToken;

use carthing::{ArtworkStore, Controller, IconSet, Poller, WebApi};

use app::App;
use config::{Config, TOKEN_ENV_VAR};

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_logging(&config)?;

    if let Some(icons_dir) = &config.assets.icons_dir {
        IconSet::new(icons_dir)
            .verify()
            .with_context(|| format!("Icon assets incomplete in {}", icons_dir.display()))?;
    }

    if config.api.access_token.is_empty() {
        anyhow::bail!(
            "No access token configured; set api.access_token in config.toml or {}",
            TOKEN_ENV_VAR
        );
    }

    let remote = WebApi::new(&config.api.base_url, &config.api.access_token, config.api.timeout)
        .context("Failed to create HTTP client")?;
    let mut controller = Controller::new(remote, ArtworkStore::new(&config.artwork.path));

    if let Err(e) = controller.sync_transport() {
        log::info!("Initial playback sync skipped: {}", e);
    }

    let token = CancellationToken::new();
    let now = Instant::now();
    let poller = Poller::new(config.poll.interval(), token, now);
    log::info!("Starting panel, polling every {:?}", poller.interval());
    let mut app = App::new(controller, poller, config.artwork.fade, now);

    let mut terminal = ratatui::init();
    let app_result = app.run(&mut terminal);
    ratatui::restore();
    log::info!("Panel closed");

    app_result.context("Terminal error")
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let file = File::create(&config.log.file)
        .with_context(|| format!("Failed to create log file: {}", config.log.file.display()))?;
    let log_config = ConfigBuilder::new().set_target_level(simplelog::LevelFilter::Error).build();

    WriteLogger::init(config.log.level, log_config, file).context("Failed to install logger")
}
