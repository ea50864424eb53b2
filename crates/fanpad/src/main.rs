use clap::Parser;
use fanpad::config::{self, ConfigSources};
use fanpad::gui::FanState;
use fanpad::gui::app::AppModel;
use fanpad::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Touch-anchored fan menu", long_about = None)]
struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Icon bitmap for the next menu slot; repeat to build the menu (replaces the config's icons)
    #[arg(short = 'i', long = "icon")]
    icons: Vec<PathBuf>,

    /// Write the default config file (if missing), print its path and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let sources = ConfigSources::new(cli.config, cli.icons);
    let config_path = sources.config_path()?;

    if cli.write_default_config {
        config::write_default_config(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = sources.load_or_default();
    let state = FanState::from_config(&config);

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx, config_path);

    let app = RelmApp::new("org.fanmenu.fanpad").with_args(Vec::new());

    app.run::<AppModel>((state, sources, rx));
    Ok(())
}
