use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollstage::{JsonCatalog, SectionId, Stage, StageConfig};

#[derive(Parser, Debug)]
#[command(name = "scrollstage", version)]
struct Cli {
    /// Log level written to stderr (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a navigation script and print a JSON frame report after each step.
    Simulate(SimulateArgs),
    /// Print the resolved content of one section as JSON.
    Content(ContentArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Stage config JSON. The built-in layout is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Localization catalog JSON.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Catalog language tag.
    #[arg(long, default_value = "en")]
    lang: String,

    /// Ticks per simulated second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Commit transitions after this many seconds (overrides the config).
    #[arg(long)]
    transition_secs: Option<f64>,

    /// Print a report for every tick instead of once per step.
    #[arg(long, default_value_t = false)]
    every_frame: bool,

    /// Script steps: `goto:N`, `jump:N`, `next`, `prev`, `finish`, `wait:SECS`.
    #[arg(value_parser = parse_step, required = true)]
    steps: Vec<Step>,
}

#[derive(Parser, Debug)]
struct ContentArgs {
    /// Stage config JSON, used for the section count.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Localization catalog JSON.
    #[arg(long)]
    catalog: PathBuf,

    /// Catalog language tag.
    #[arg(long, default_value = "en")]
    lang: String,

    /// Section index (0-based).
    #[arg(long, default_value_t = 0)]
    section: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    Goto(usize),
    Jump(usize),
    Next,
    Prev,
    Finish,
    Wait(f64),
}

fn parse_step(s: &str) -> Result<Step, String> {
    let (name, arg) = match s.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (s, None),
    };
    let index = |arg: Option<&str>| -> Result<usize, String> {
        arg.ok_or_else(|| format!("step '{name}' needs a section index"))?
            .parse()
            .map_err(|e| format!("step '{s}': {e}"))
    };
    match name {
        "goto" => index(arg).map(Step::Goto),
        "jump" => index(arg).map(Step::Jump),
        "next" => Ok(Step::Next),
        "prev" => Ok(Step::Prev),
        "finish" => Ok(Step::Finish),
        "wait" => {
            let secs: f64 = arg
                .ok_or("step 'wait' needs a duration in seconds")?
                .parse()
                .map_err(|e| format!("step '{s}': {e}"))?;
            if !secs.is_finite() || secs < 0.0 {
                return Err(format!("step '{s}': duration must be finite and >= 0"));
            }
            Ok(Step::Wait(secs))
        }
        other => Err(format!("unknown step '{other}'")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Content(args) => cmd_content(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<StageConfig> {
    match path {
        Some(p) => StageConfig::from_path(p)
            .with_context(|| format!("load stage config '{}'", p.display())),
        None => Ok(StageConfig::default()),
    }
}

fn load_catalog(path: Option<&PathBuf>, lang: &str) -> anyhow::Result<JsonCatalog> {
    match path {
        Some(p) => JsonCatalog::from_path(lang, p)
            .with_context(|| format!("load catalog '{}'", p.display())),
        None => Ok(JsonCatalog::new(
            lang,
            serde_json::Value::Object(serde_json::Map::new()),
        )?),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }
    let mut config = load_config(args.config.as_ref())?;
    if args.transition_secs.is_some() {
        config.transition_secs = args.transition_secs;
    }
    let catalog = load_catalog(args.catalog.as_ref(), &args.lang)?;
    let mut stage = Stage::new(&config, catalog).context("assemble stage")?;

    let delta = 1.0 / f64::from(args.fps);
    let mut out = std::io::stdout().lock();
    let mut emit = |report: &scrollstage::FrameReport| -> anyhow::Result<()> {
        serde_json::to_writer(&mut out, report).context("write frame report")?;
        std::io::Write::write_all(&mut out, b"\n").context("write frame report")?;
        Ok(())
    };

    for step in &args.steps {
        tracing::info!(?step, "running step");
        match *step {
            Step::Goto(n) => {
                stage.navigate(n);
            }
            Step::Jump(n) => {
                stage.jump(n);
            }
            Step::Next => {
                stage.next();
            }
            Step::Prev => {
                stage.prev();
            }
            Step::Finish => {
                stage.finish_transition();
            }
            Step::Wait(secs) => {
                let ticks = (secs * f64::from(args.fps)).round() as u64;
                for _ in 0..ticks {
                    let report = stage.tick(delta);
                    if args.every_frame {
                        emit(&report)?;
                    }
                }
                if args.every_frame {
                    continue;
                }
            }
        }
        emit(&stage.report())?;
    }
    Ok(())
}

fn cmd_content(args: ContentArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let catalog = load_catalog(Some(&args.catalog), &args.lang)?;
    let stage = Stage::new(&config, catalog).context("assemble stage")?;
    let bundle = stage.content_for(SectionId(args.section));
    let json = serde_json::to_string_pretty(&bundle).context("serialize content")?;
    println!("{json}");
    Ok(())
}
