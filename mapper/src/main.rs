use anyhow::Context;
use clap::Parser;
use export::SceneFileExporter;
use gui_bridge::bridge::GuiBridge;
use quakecore::prelude::{EventSource, RenderSurface};
use source::{FileFeedSource, GeneratorConfig, HttpFeedSource, SyntheticFeedSource};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::{MapperConfig, Overrides};
use workflow::runner::Runner;

mod export;
mod gui_bridge;
mod source;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Earthquake feed map driver")]
struct Args {
    /// Load settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// GeoJSON feed to fetch (defaults to the USGS past-day 1.0+ feed)
    #[arg(long, conflicts_with_all = ["offline", "synthetic"])]
    feed_url: Option<String>,
    /// Read the feed from a saved GeoJSON file instead of the network
    #[arg(long, conflicts_with = "synthetic")]
    offline: Option<PathBuf>,
    /// Generate this many seeded synthetic events instead of fetching
    #[arg(long)]
    synthetic: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Tile provider access token
    #[arg(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
    /// Marker radius per unit of magnitude
    #[arg(long)]
    radius_scale: Option<f64>,
    /// Write the composed scene as JSON
    #[arg(long)]
    export_scene: Option<PathBuf>,
    /// Serve the map page and scene until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long)]
    bind: Option<SocketAddr>,
}

fn build_source(args: &Args, config: &MapperConfig) -> anyhow::Result<Box<dyn EventSource>> {
    if let Some(path) = &args.offline {
        return Ok(Box::new(FileFeedSource::new(path)));
    }
    if let Some(count) = args.synthetic {
        let source = SyntheticFeedSource::new(GeneratorConfig {
            count,
            seed: args.seed,
            ..Default::default()
        })
        .context("configuring synthetic feed")?;
        return Ok(Box::new(source));
    }
    let source = HttpFeedSource::new(config.feed.url.clone()).context("configuring HTTP feed")?;
    Ok(Box::new(source))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MapperConfig::load(path)?,
        None => MapperConfig::default(),
    }
    .with_overrides(Overrides {
        feed_url: args.feed_url.clone(),
        access_token: args.access_token.clone(),
        radius_scale: args.radius_scale,
        bind: args.bind,
    });

    let source = build_source(&args, &config)?;
    let runner = Runner::new(config.scene.clone());
    let bridge = args
        .serve
        .then(|| GuiBridge::spawn(config.bridge.bind))
        .transpose()
        .context("starting map bridge")?;

    let outcome = runner.execute(source.as_ref());
    match &outcome {
        Ok(scene) => {
            if let Some(path) = &args.export_scene {
                SceneFileExporter::new(path)
                    .present(scene)
                    .context("exporting scene")?;
            }
            if let Some(bridge) = &bridge {
                bridge.present(scene).context("publishing scene to map bridge")?;
            }
            let metrics = runner.metrics();
            println!(
                "Scene ready -> markers {}, per bucket {:?}",
                scene.marker_count(),
                metrics.markers
            );
        }
        Err(err) => {
            if let Some(bridge) = &bridge {
                bridge.publish_status(&format!("Earthquake feed unavailable: {:#}", err));
            }
        }
    }

    if let Some(addr) = bridge.as_ref().and_then(GuiBridge::local_addr) {
        println!("Map available at http://{} (Ctrl+C to stop)...", addr);
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    outcome.map(|_| ())
}
