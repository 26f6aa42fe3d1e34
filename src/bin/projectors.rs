use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "projectors", version)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the resolution catalog.
    Catalog,
    /// Print the field of view for a throw ratio.
    Fov(FovArgs),
    /// Build one projector and write its node graph as JSON.
    Build(BuildArgs),
}

#[derive(Parser, Debug)]
struct FovArgs {
    /// Distance to image width ratio.
    #[arg(long)]
    throw_ratio: f64,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Settings JSON. Missing fields take their defaults.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Image file to bind as the custom texture.
    #[arg(long)]
    bound_image: Option<PathBuf>,

    /// JSON list of `{"field": ..., "value": ...}` changes replayed after the settings.
    #[arg(long)]
    events: Option<PathBuf>,

    /// Output graph JSON. Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Seed for the initial checker color.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Catalog => cmd_catalog(),
        Command::Fov(args) => cmd_fov(args),
        Command::Build(args) => cmd_build(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_catalog() -> anyhow::Result<()> {
    for r in projectors::Resolution::ALL {
        println!("{:<10} {}", r.key(), r.label());
    }
    Ok(())
}

fn cmd_fov(args: FovArgs) -> anyhow::Result<()> {
    let settings = projectors::ProjectorSettings {
        throw_ratio: args.throw_ratio,
        ..Default::default()
    };
    settings.validate()?;
    let angle = projectors::field_of_view(args.throw_ratio);
    println!("{angle} rad ({:.3} deg)", angle.to_degrees());
    Ok(())
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let mut scene = projectors::Scene::default();
    let id = scene.create_projector(args.seed)?;

    if let Some(path) = &args.settings {
        let settings = projectors::ProjectorSettings::from_json(&read_text(path, "settings")?)
            .with_context(|| format!("parse settings '{}'", path.display()))?;
        scene.apply_snapshot(id, settings)?;
    }

    if let Some(path) = &args.bound_image {
        let image = scene
            .store_mut()
            .load_file(path)
            .with_context(|| format!("load image '{}'", path.display()))?;
        scene.bind_image(id, Some(image))?;
    }

    if let Some(path) = &args.events {
        let events = projectors::SettingChange::list_from_json(&read_text(path, "events")?)
            .with_context(|| format!("parse events '{}'", path.display()))?;
        for change in events {
            scene.apply(id, change)?;
        }
    }

    let graph = &scene.get(id)?.emitter.graph;
    let json = graph.to_json()?;
    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    eprintln!("fingerprint {}", projectors::fingerprint_graph(graph));
    Ok(())
}
