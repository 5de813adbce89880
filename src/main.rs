use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result, bail};
use log::info;

use surface_spin::{
    config::RenderConfig,
    player::{CrosstermSurface, Player, RenderState},
    shader::ShadingPolicy,
    types::TerminalSize,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "surface-spin [play] [classic|tissue|depth]";
const FRAME_USAGE: &str = "surface-spin frame <cols> <rows> [classic|tissue|depth]";
const CONFIG_USAGE: &str = "surface-spin config";

fn run() -> Result<()> {
    let (mut config, source) = RenderConfig::load();
    info!("config: {source}");
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        None => play(config),
        Some("play") => {
            if let Some(name) = args.next() {
                config.policy = policy(&name)?;
            }
            play(config)
        }
        Some("frame") => {
            let cols = args.next().context(FRAME_USAGE)?;
            let rows = args.next().context(FRAME_USAGE)?;
            let size = TerminalSize::new(dimension(&cols)?, dimension(&rows)?);
            if let Some(name) = args.next() {
                config.policy = policy(&name)?;
            }
            frame(&config, size)
        }
        Some("config") => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Some(name) if ShadingPolicy::from_name(name).is_some() => {
            config.policy = policy(name)?;
            play(config)
        }
        Some(_) => bail!(
            "Surface Spin — rotating height field in the terminal\n\nUsage:\n  {PLAY_USAGE}\n  {FRAME_USAGE}\n  {CONFIG_USAGE}\n\nConfig: {}",
            RenderConfig::config_path().display()
        ),
    }
}

fn policy(name: &str) -> Result<ShadingPolicy> {
    ShadingPolicy::from_name(name).with_context(|| {
        format!(
            "Unknown shading policy '{name}' (expected one of {})",
            ShadingPolicy::NAMES.join(", ")
        )
    })
}

fn dimension(arg: &str) -> Result<u16> {
    match arg.parse::<u16>() {
        Ok(n) if n > 0 => Ok(n),
        _ => bail!("Invalid dimension '{arg}'\n\nUsage:\n  {FRAME_USAGE}"),
    }
}

fn play(config: RenderConfig) -> Result<()> {
    info!(
        "playing with {} shading at {} ms/frame",
        config.policy.name(),
        config.frame_delay_ms
    );
    let surface = CrosstermSurface::open().context("Failed to set up terminal")?;
    let mut player = Player::new(surface, config);
    player.play()
}

fn frame(config: &RenderConfig, size: TerminalSize) -> Result<()> {
    let mut state = RenderState::new();
    let encoded = state.render(config, size)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(encoded.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
