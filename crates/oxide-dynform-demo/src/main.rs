//! dynform-demo
//!
//! Renders a dynamic form and drives it from line commands on stdin:
//! `name=value` edits a field, `:submit` submits, `:render` prints the
//! markup, `:quit` stops.

mod commands;
mod pricing;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_dynform::driver::{drive, DriverNotice, FormCommand};
use oxide_dynform::{
    DerivedSchema, DynamicForm, FormCallbacks, FormConfig, FormProps, PropagationPolicy, Schema,
    SubmitOutcome, ValueStore, Values,
};

use commands::{parse_line, Line};

/// Schema-driven dynamic form demo.
#[derive(Parser)]
#[command(name = "dynform-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema JSON file (the built-in pricing form if not specified).
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Initial values JSON file.
    #[arg(long)]
    values: Option<PathBuf>,

    /// Debounce window of the change pipeline, in milliseconds.
    #[arg(long, env = "DYNFORM_DEBOUNCE_MS", default_value_t = 300)]
    debounce_ms: u64,

    /// Only propagate changes whose field passes validation.
    #[arg(long)]
    strict: bool,

    /// Label of the submit button.
    #[arg(long, default_value = "Submit")]
    submit_text: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (mut derived, initial) = load_form(&cli)?;
    let store = Rc::new(RefCell::new(ValueStore::new(initial.clone())));
    let schema = derived.current(&store.borrow());

    let callbacks = {
        let store = Rc::clone(&store);
        FormCallbacks::new()
            .set_values(move |values| store.borrow_mut().replace(values))
            .on_change(|values| info!("values changed: {}", to_json(values)))
            .on_finish(|values| println!("{}", to_json(values)))
    };
    let config = FormConfig::new()
        .debounce(Duration::from_millis(cli.debounce_ms))
        .policy(if cli.strict {
            PropagationPolicy::ValidOnly
        } else {
            PropagationPolicy::Permissive
        });
    let props = FormProps::new(schema, initial).submit_text(cli.submit_text);
    let mut form = DynamicForm::new(props, callbacks, config);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let reader = tokio::spawn(read_commands(tx));

    drive(&mut form, &mut rx, |form, notice| match notice {
        DriverNotice::Changed(outcome) => {
            if !outcome.errors.is_empty() {
                warn!(field = ?outcome.field, "{}", outcome.errors.join("; "));
            }
            let schema = derived.current(&store.borrow());
            if form.set_form_data(schema) {
                info!(
                    visible = form.form_data().visible_fields().count(),
                    "schema recomputed"
                );
            }
        }
        DriverNotice::Submitted(SubmitOutcome::Finished(_)) => info!("submitted"),
        DriverNotice::Submitted(SubmitOutcome::Rejected(errors)) => {
            warn!("submit rejected:\n{errors}");
        }
        DriverNotice::RenderRequested => println!("{}", form.render()),
        DriverNotice::InputRejected(err) => warn!("{err}"),
    })
    .await;

    reader.await??;
    println!("{}", form.render());
    Ok(())
}

fn load_form(cli: &Cli) -> anyhow::Result<(DerivedSchema, Values)> {
    let values = match &cli.values {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Values::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None if cli.schema.is_none() => pricing::initial_values(),
        None => Values::new(),
    };

    let derived = match &cli.schema {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let schema = Schema::from_json(&json)
                .with_context(|| format!("loading schema {}", path.display()))?;
            info!(fields = schema.len(), "schema loaded");
            DerivedSchema::new(move |_| schema.clone())
        }
        None => DerivedSchema::new(pricing::schema),
    };

    Ok((derived, values))
}

async fn read_commands(tx: mpsc::UnboundedSender<FormCommand>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Line::Command(command)) => {
                if tx.send(command).is_err() {
                    break;
                }
            }
            Ok(Line::Quit) => break,
            Ok(Line::Skip) => {}
            Err(message) => warn!("{message}"),
        }
    }
    Ok(())
}

fn to_json(values: &Values) -> String {
    serde_json::to_string(values).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}
