use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinegram_core::KinegramConfig;
use kinegram_diagrams::SceneCatalog;
use kinegram_ir::{validate_plan, LayoutChild, LayoutNode, RenderPlan, Scene, SceneContext, ShapeKind};

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "kinegram.toml";

#[derive(Parser)]
#[command(
    name = "kinegram",
    version,
    about = "Kinegram — deterministic diagram layout and animation timing",
    long_about = "Kinegram builds explanatory diagram animations as pure data.\nEvery scene lowers to a JSON render plan: positioned shapes plus timed events,\nready for an external renderer. Same scene, same seed, same plan."
)]
struct Cli {
    /// Path to a kinegram.toml (default: ./kinegram.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in scenes
    List,

    /// Build a scene and emit its render plan as JSON
    Plan {
        /// Catalog name of the scene (see `kinegram list`)
        #[arg()]
        scene: String,

        /// Override the random seed from the config
        #[arg(long)]
        seed: Option<u64>,

        /// Write the plan here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print a scene's layout tree and timeline
    Inspect {
        /// Catalog name of the scene
        #[arg()]
        scene: String,

        /// Override the random seed from the config
        #[arg(long)]
        seed: Option<u64>,

        /// Also list the animations running at this time, in seconds
        #[arg(long, value_parser = parse_seconds)]
        at: Option<f64>,
    },

    /// Validate a render plan file
    Check {
        /// Path to a plan written by `kinegram plan`
        #[arg()]
        file: PathBuf,
    },

    /// Write a default kinegram.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Project name recorded in the config
        #[arg(long)]
        name: Option<String>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Display version and catalog info
    Info,
}

/// Scene times must be finite and non-negative.
fn parse_seconds(raw: &str) -> std::result::Result<f64, String> {
    let t: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    if !t.is_finite() || t < 0.0 {
        return Err(format!("expected a time in seconds, got {}", raw));
    }
    Ok(t)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so plans written to stdout stay clean JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::List => cmd_list(),
        Commands::Plan {
            scene,
            seed,
            out,
            pretty,
        } => cmd_plan(config, &scene, seed, out, pretty),
        Commands::Inspect { scene, seed, at } => cmd_inspect(config, &scene, seed, at),
        Commands::Check { file } => cmd_check(&file),
        Commands::Init { dir, name, force } => cmd_init(&dir, name, force),
        Commands::Info => cmd_info(config),
    }
}

/// Load the scene context from `--config`, then `./kinegram.toml`, then defaults.
fn load_context(config: Option<&Path>) -> Result<SceneContext> {
    let path = match config {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG)).filter(|p| p.exists()),
    };
    let Some(path) = path else {
        tracing::debug!("no config file, using defaults");
        return Ok(SceneContext::default());
    };
    let loaded = KinegramConfig::load_from_file(&path)
        .with_context(|| format!("failed to load config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    SceneContext::from_config(&loaded)
        .with_context(|| format!("invalid config: {}", path.display()))
}

fn build_scene(config: Option<&Path>, name: &str, seed: Option<u64>) -> Result<(SceneContext, Scene)> {
    let mut ctx = load_context(config)?;
    if let Some(seed) = seed {
        ctx = ctx.with_seed(seed);
    }
    let scene = SceneCatalog::new()
        .build(name, &ctx)
        .with_context(|| format!("failed to build scene '{}'", name))?;
    Ok((ctx, scene))
}

fn cmd_list() -> Result<()> {
    let catalog = SceneCatalog::new();
    let width = catalog.names().map(str::len).max().unwrap_or(0);
    println!("🎞️  Available scenes:");
    println!();
    for info in catalog.entries() {
        println!("   {:<width$}  {}", info.name, info.description, width = width);
    }
    println!();
    println!("   Usage: kinegram plan <scene> [--seed N] [--out plan.json]");
    Ok(())
}

fn cmd_plan(
    config: Option<&Path>,
    name: &str,
    seed: Option<u64>,
    out: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let (ctx, scene) = build_scene(config, name, seed)?;
    let plan = scene.render_plan(&ctx);
    let hash = plan.content_hash().context("failed to hash render plan")?;
    let json = plan.to_json(pretty).context("failed to serialize render plan")?;

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write plan: {}", path.display()))?;
            tracing::info!(
                scene = name,
                shapes = plan.shapes.len(),
                events = plan.events.len(),
                duration = %plan.duration,
                hash = %hash.short(),
                "wrote {}",
                path.display()
            );
        }
        None => {
            println!("{}", json);
            tracing::info!(scene = name, hash = %hash.short(), "plan written to stdout");
        }
    }
    Ok(())
}

fn cmd_inspect(config: Option<&Path>, name: &str, seed: Option<u64>, at: Option<f64>) -> Result<()> {
    let (ctx, scene) = build_scene(config, name, seed)?;
    let hash = scene
        .render_plan(&ctx)
        .content_hash()
        .context("failed to hash render plan")?;

    println!("🔎 Scene: {}", scene.id);
    println!("   Seed:       {}", ctx.seed);
    println!("   Background: {}", scene.background);
    println!(
        "   Duration:   {} ({} frames @ {}fps)",
        scene.duration(),
        scene.frame_count(ctx.fps as f64),
        ctx.fps
    );
    println!("   Shapes:     {}", scene.root.shapes().len());
    println!(
        "   Events:     {} in {} play steps",
        scene.timeline.len(),
        scene.timeline.step_count()
    );
    println!("   Hash:       {}", hash.short());
    println!();
    println!("   Layout tree:");
    let children = scene.root.children();
    for (i, child) in children.iter().enumerate() {
        print_child(child, "   ", i + 1 == children.len());
    }

    if let Some(t) = at {
        println!();
        println!("   Active at {:.2}s:", t);
        let active = scene.timeline.active_at(t);
        if active.is_empty() {
            println!("   (nothing animating)");
        }
        for event in active {
            let progress = event.progress_at(t).unwrap_or(0.0);
            println!(
                "   • {:<10} {:<24} step {:>2}  {:>5.1}%",
                event.kind.name(),
                event.target,
                event.group,
                progress * 100.0
            );
        }
    }
    Ok(())
}

fn print_child(child: &LayoutChild, prefix: &str, is_last: bool) {
    let branch = if is_last { "└──" } else { "├──" };
    let b = child.bounds();
    match child {
        LayoutChild::Shape(shape) => {
            let detail = match shape.kind() {
                ShapeKind::Text { content, .. } => format!("text \"{}\"", content),
                other => other.element_kind().to_string(),
            };
            println!(
                "{}{} {} [{}] @ ({:.2}, {:.2})",
                prefix,
                branch,
                shape.id(),
                detail,
                b.center().x,
                b.center().y
            );
        }
        LayoutChild::Node(node) => {
            println!(
                "{}{} {} [group, {}] {:.2}×{:.2} @ ({:.2}, {:.2})",
                prefix,
                branch,
                node.id(),
                node.len(),
                b.width(),
                b.height(),
                b.center().x,
                b.center().y
            );
            print_node(node, prefix, is_last);
        }
    }
}

fn print_node(node: &LayoutNode, prefix: &str, is_last: bool) {
    let nested = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        print_child(child, &nested, i + 1 == children.len());
    }
}

fn cmd_check(file: &Path) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read file: {}", file.display()))?;

    println!("🔍 Checking {}", file.display());

    let plan = RenderPlan::from_json(&source)
        .with_context(|| format!("failed to parse render plan: {}", file.display()))?;
    println!("   ✓ Parse OK");

    validate_plan(&plan).map_err(|errors| {
        let msgs: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
        anyhow::anyhow!("Validation errors:\n  {}", msgs.join("\n  "))
    })?;
    println!("   ✓ Validate OK");

    let hash = plan.content_hash().context("failed to hash render plan")?;
    println!();
    println!(
        "   ✅ {}: {} shapes, {} events, {} ({})",
        plan.scene,
        plan.shapes.len(),
        plan.events.len(),
        plan.duration,
        hash.short()
    );
    Ok(())
}

fn cmd_init(dir: &Path, name: Option<String>, force: bool) -> Result<()> {
    let path = dir.join(DEFAULT_CONFIG);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let mut config = KinegramConfig::default();
    if let Some(name) = name {
        config.project.name = name;
    }
    config
        .save_to_file(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("✅ Wrote {}", path.display());
    println!();
    println!("Next steps:");
    println!("  kinegram list");
    println!("  kinegram plan yellow-circle --out plan.json");
    Ok(())
}

fn cmd_info(config: Option<&Path>) -> Result<()> {
    let ctx = load_context(config)?;
    println!("🎬 Kinegram");
    println!("   Version:   {}", env!("CARGO_PKG_VERSION"));
    println!(
        "   Frame:     {:.3} × {:.3} units @ {}fps",
        ctx.frame.width, ctx.frame.height, ctx.fps
    );
    println!("   Buffers:   next-to {}, edge {}", ctx.default_buff, ctx.edge_buff);
    println!(
        "   Timing:    {}s per animation, {:?} easing",
        ctx.default_run_time, ctx.default_easing
    );
    println!("   Seed:      {}", ctx.seed);
    println!("   Scenes:    {}", SceneCatalog::new().entries().len());
    Ok(())
}
