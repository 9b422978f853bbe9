//! erender - ER diagram rendering as a serverless function.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod envelope;
mod error;
mod logging;
mod model;
mod output;
mod params;
mod ports;
mod script;
mod translator;

use std::path::Path;
use std::process;
use std::sync::Arc;

use clap::Parser;
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;

use crate::cli::{read_input, Cli, Command};
use crate::config::Config;
use crate::context::{RecordingSession, ServiceContext};
use crate::envelope::parse_request;
use crate::error::RenderError;
use crate::model::ErModel;
use crate::output::{resolve_output_path, save_image};
use crate::params::validate_format;
use crate::script::generate_script;
use crate::translator::Translator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), RenderError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(RenderError::Config)?;

    let level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    logging::init_tracing(level);
    tracing::debug!(config = %config_path.display(), "loaded configuration");

    match cli.command {
        Command::Serve => serve(&config).await,
        Command::Invoke { event } => invoke(&config, event.as_deref()).await,
        Command::Render { model, output, format } => {
            render(&config, &model, output.as_deref(), format.as_deref()).await
        }
        Command::Script { model } => {
            let model = load_model(&model)?;
            print!("{}", generate_script(&model));
            Ok(())
        }
    }
}

/// Run the Lambda runtime loop. Recording is not available here since the
/// loop never returns control to finish a cassette.
async fn serve(config: &Config) -> Result<(), RenderError> {
    let format = config.output_format().map_err(RenderError::InvalidArgument)?;
    let (ctx, _) = build_context(config, false)?;
    let translator = Arc::new(Translator::new(ctx.renderer, format, config.output.filename.clone()));

    tracing::info!(%format, "starting Lambda runtime");
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let translator = Arc::clone(&translator);
        async move { Ok::<_, lambda_runtime::Error>(translator.handle(&event.payload).await) }
    }))
    .await
    .map_err(|e| RenderError::Runtime(e.to_string()))
}

/// Handle a single event from a file or stdin and print the response envelope.
async fn invoke(config: &Config, event_path: Option<&str>) -> Result<(), RenderError> {
    let format = config.output_format().map_err(RenderError::InvalidArgument)?;
    let raw = read_input(event_path)?;
    let event: Value = serde_json::from_str(&raw)
        .map_err(|e| RenderError::InvalidArgument(format!("event is not valid JSON: {e}")))?;

    let (ctx, session) = build_context(config, true)?;
    let translator = Translator::new(ctx.renderer, format, config.output.filename.clone());
    let response = translator.handle(&event).await;
    drop(translator);
    finish_recording(session);

    let json = serde_json::to_string_pretty(&response).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

/// Render a model file straight to an image file.
async fn render(
    config: &Config,
    model_path: &str,
    output: Option<&str>,
    format: Option<&str>,
) -> Result<(), RenderError> {
    let format = match format {
        Some(f) => validate_format(f),
        None => config.output_format(),
    }
    .map_err(RenderError::InvalidArgument)?;
    let model = load_model(model_path)?;

    let (ctx, session) = build_context(config, true)?;
    let translator = Translator::new(ctx.renderer, format, config.output.filename.clone());
    let result = translator.render_model(&model).await;
    drop(translator);
    finish_recording(session);

    let data = result?;
    let output_path = resolve_output_path(output, Path::new(model_path), format);
    save_image(&data, &output_path)?;
    eprintln!("Saved: {}", output_path.display());
    Ok(())
}

/// Read a model file with the same validation a request body gets.
fn load_model(path: &str) -> Result<ErModel, RenderError> {
    let raw = read_input(Some(path))?;
    parse_request(&serde_json::json!({ "body": raw }))
}

/// Pick the renderer adapter: `ERENDER_REPLAY` replays a cassette,
/// `ERENDER_REC` records one, otherwise the live program runs.
fn build_context(
    config: &Config,
    allow_recording: bool,
) -> Result<(ServiceContext, Option<RecordingSession>), RenderError> {
    let replay_path = std::env::var("ERENDER_REPLAY").ok();
    let is_recording = std::env::var("ERENDER_REC").is_ok_and(|v| v == "true" || v == "1");

    if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying renderer interactions");
        Ok((ServiceContext::replaying(Path::new(cassette_path))?, None))
    } else if is_recording && allow_recording {
        tracing::info!("recording renderer interactions");
        let (ctx, session) = ServiceContext::recording(config);
        Ok((ctx, Some(session)))
    } else {
        if is_recording {
            tracing::warn!("ERENDER_REC is ignored in serve mode");
        }
        Ok((ServiceContext::live(config), None))
    }
}

fn finish_recording(session: Option<RecordingSession>) {
    if let Some(session) = session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }
}
