//! The `generate` command: runs every selected pattern as its own task.

pub mod output;

use crate::config::to_duration;
use anyhow::Context;
use clap::Args;
use output::{Destination, Outputs};
use rlog_core::{CompiledPattern, Config, FieldSpec};
use rlog_engine::Generator;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Arguments for the `generate` command.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path to the patterns YAML file
    #[arg(long, short = 'c', env = "RLOG_CONFIG")]
    pub config: PathBuf,

    /// Only run these patterns (repeatable; default: every enabled pattern)
    #[arg(long = "pattern", short = 'p', value_name = "NAME")]
    pub patterns: Vec<String>,

    /// Emit exactly this many lines per pattern, without throttling
    #[arg(long)]
    pub count: Option<u64>,

    /// Override the locale from the configuration file (e.g. it_IT)
    #[arg(long)]
    pub locale: Option<String>,
}

/// How many lines a pattern emits, and how fast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Schedule {
    /// Emit this many lines as fast as possible
    Count(u64),
    /// Emit `eps` lines per second, until `duration` elapses when set
    Throttled {
        eps: f64,
        duration: Option<Duration>,
    },
}

impl Schedule {
    /// Schedule for `pattern`, with `count` taking precedence over its rate.
    pub fn for_pattern(pattern: &CompiledPattern, count: Option<u64>) -> anyhow::Result<Self> {
        if let Some(count) = count {
            return Ok(Schedule::Count(count));
        }
        let duration = pattern
            .time
            .as_ref()
            .map(to_duration)
            .transpose()
            .with_context(|| format!("Invalid time for pattern '{}'", pattern.name))?;
        Ok(Schedule::Throttled {
            eps: pattern.eps,
            duration,
        })
    }
}

/// Spreads a fractional rate over one-second ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle {
    eps: f64,
    credit: f64,
}

impl Throttle {
    pub fn new(eps: f64) -> Self {
        Self { eps, credit: 0.0 }
    }

    /// Lines to emit on the next tick.
    pub fn next_batch(&mut self) -> u64 {
        self.credit += self.eps;
        let batch = self.credit.floor();
        self.credit -= batch;
        batch as u64
    }
}

/// Run the `generate` command until every pattern finishes or Ctrl-C.
pub async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    let compiled = config
        .compile()
        .with_context(|| format!("Invalid config {:?}", args.config))?;

    let mut generator =
        Generator::with_default_providers().context("Failed to load provider modules")?;
    generator
        .apply_config(&config)
        .context("Invalid locale in config")?;
    if let Some(locale) = &args.locale {
        generator
            .set_locale(locale)
            .with_context(|| format!("Invalid --locale '{locale}'"))?;
    }
    info!(locale = %generator.faker().locale(), "generator ready");

    let patterns = select_patterns(compiled, &args.patterns)?;
    if patterns.is_empty() {
        warn!("no enabled patterns to run");
        return Ok(());
    }
    for pattern in &patterns {
        check_functions(&generator, pattern)?;
    }

    let mut outputs = Outputs::new();
    let mut tasks = JoinSet::new();
    for pattern in patterns {
        let schedule = Schedule::for_pattern(&pattern, args.count)?;
        let destination = Destination::from_path(pattern.path.as_ref());
        let sink = outputs.open(&destination).await?;
        let generator = generator.clone();

        info!(pattern = %pattern.name, %destination, ?schedule, "starting pattern");
        tasks.spawn(async move {
            let emitted = emit_pattern(&generator, &pattern, schedule, &*sink)
                .await
                .with_context(|| format!("Pattern '{}' failed", pattern.name))?;
            info!(pattern = %pattern.name, emitted, "pattern finished");
            anyhow::Ok(())
        });
    }

    let result = wait_for_patterns(&mut tasks).await;
    outputs.flush_all().await?;
    result
}

async fn wait_for_patterns(tasks: &mut JoinSet<anyhow::Result<()>>) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            joined = tasks.join_next() => match joined {
                None => return Ok(()),
                Some(joined) => {
                    if let Err(e) = joined.context("Pattern task panicked").and_then(|r| r) {
                        tasks.abort_all();
                        return Err(e);
                    }
                }
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("interrupted, stopping patterns");
                tasks.abort_all();
                return Ok(());
            }
        }
    }
}

/// Pick the patterns to run.
///
/// With no names, every enabled pattern runs. Named patterns run even when
/// disabled; an unknown name is an error.
pub fn select_patterns(
    patterns: Vec<CompiledPattern>,
    names: &[String],
) -> anyhow::Result<Vec<CompiledPattern>> {
    if names.is_empty() {
        return Ok(patterns.into_iter().filter(|p| p.enabled).collect());
    }

    if let Some(unknown) = names
        .iter()
        .find(|name| !patterns.iter().any(|p| &p.name == *name))
    {
        anyhow::bail!("Unknown pattern '{unknown}'");
    }
    Ok(patterns
        .into_iter()
        .filter(|p| names.contains(&p.name))
        .collect())
}

/// Fail before emitting anything if a pattern calls an unknown function.
pub fn check_functions(generator: &Generator, pattern: &CompiledPattern) -> anyhow::Result<()> {
    for (field, spec) in &pattern.fields {
        if let FieldSpec::FunctionCall(call) = spec {
            generator.resolve(&call.name).with_context(|| {
                format!("Field '{field}' in pattern '{}'", pattern.name)
            })?;
        }
    }
    Ok(())
}

/// Render and write lines for one pattern according to `schedule`.
///
/// Returns the number of lines written.
pub async fn emit_pattern<W>(
    generator: &Generator,
    pattern: &CompiledPattern,
    schedule: Schedule,
    out: &Mutex<W>,
) -> anyhow::Result<u64>
where
    W: AsyncWrite + Unpin + Send,
{
    match schedule {
        Schedule::Count(count) => write_batch(generator, pattern, count, out).await,
        Schedule::Throttled { eps, duration } => {
            let deadline = duration.map(|d| Instant::now() + d);
            let mut throttle = Throttle::new(eps);
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut emitted = 0;
            loop {
                tokio::select! {
                    biased;
                    _ = sleep_until(deadline) => break,
                    _ = ticker.tick() => {}
                }
                let batch = throttle.next_batch();
                emitted += write_batch(generator, pattern, batch, out).await?;
                debug!(pattern = %pattern.name, batch, emitted, "tick");
            }
            Ok(emitted)
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn write_batch<W>(
    generator: &Generator,
    pattern: &CompiledPattern,
    lines: u64,
    out: &Mutex<W>,
) -> anyhow::Result<u64>
where
    W: AsyncWrite + Unpin + Send,
{
    if lines == 0 {
        return Ok(0);
    }

    let mut out = out.lock().await;
    for _ in 0..lines {
        let mut line = generator.render_pattern(pattern)?;
        line.push('\n');
        out.write_all(line.as_bytes()).await?;
    }
    out.flush().await?;
    Ok(lines)
}
