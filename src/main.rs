//! Headless front end: reads a task list, anneals it and writes one JSON
//! event per line to stdout.

mod cli;
mod logging;

use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use cli::Cli;
use task_anneal::sa::{AnnealingEngine, Event, EventSink, JsonLinesSink, Phase};
use task_anneal::{schedule, validate_tasks, SaError, Task};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level)?;

    let stdout = std::io::stdout();
    run(&cli, stdout.lock())
}

fn run<W: Write>(cli: &Cli, out: W) -> Result<()> {
    let mut sink = JsonLinesSink::new(out);

    let prepared = load_tasks(&cli.tasks_file).and_then(|tasks| {
        let config = cli.anneal_config();
        config.validate()?;
        Ok((tasks, config))
    });
    let (tasks, config) = match prepared {
        Ok(prepared) => prepared,
        Err(err) => {
            sink.receive(Event::Error {
                message: format!("{err:#}"),
            });
            return Err(err);
        }
    };

    info!(
        tasks = tasks.len(),
        file = %cli.tasks_file.display(),
        "optimizing task order"
    );

    let pause = Duration::from_millis(cli.pause_ms);
    let mut engine = AnnealingEngine::new(tasks, config, sink);
    drive(&mut engine, pause);

    let failures = engine.sink().failures();
    if failures > 0 {
        bail!("{failures} events could not be written to stdout");
    }

    match engine.phase() {
        Phase::Finished(state) => {
            info!(
                iterations = state.global_iteration,
                best_cost = state.best.cost(),
                "optimization finished"
            );
            if cli.report {
                report(engine.tasks(), state.best.order(), state.best.cost());
            }
            Ok(())
        }
        Phase::Rejected => Err(SaError::EmptyInput.into()),
        other => bail!("engine stopped unexpectedly: {other:?}"),
    }
}

/// Steps the engine to completion, sleeping `pause` between batches.
fn drive<S: EventSink>(engine: &mut AnnealingEngine<S>, pause: Duration) {
    let batch_size = engine.config().batch_size;
    engine.start();
    while engine.step(batch_size) {
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }
}

/// Reads and validates a JSON array of tasks.
fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read task file {}", path.display()))?;
    let tasks: Vec<Task> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse task file {}", path.display()))?;
    validate_tasks(&tasks).with_context(|| format!("invalid task in {}", path.display()))?;
    Ok(tasks)
}

fn report(tasks: &[Task], order: &[usize], best_cost: f64) {
    info!("best schedule:");
    for row in schedule(order, tasks) {
        info!(
            "{}. {} | start={:.2} | end={:.2} | deadline={:.2} | lateness={:.2} | diff={}",
            row.position, row.name, row.start, row.end, row.deadline, row.lateness, row.difficulty
        );
    }
    info!("best total cost = {best_cost:.4}");
}
