use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, Controllers, FormController, FormKind, FormModel, SubmitOutcome,
};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "flames-cli", about = "FLAMES and zodiac compatibility from the terminal")]
struct Args {
    /// Scoring server base url; overrides flames.toml and environment.
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// Skip the suspense pause before showing the result.
    #[arg(long, global = true, default_value_t = false)]
    no_delay: bool,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Name compatibility via the FLAMES game.
    Flames {
        #[arg(long)]
        name1: String,
        #[arg(long)]
        name2: String,
    },
    /// Zodiac sign compatibility.
    Zodiac {
        #[arg(long)]
        sign1: String,
        #[arg(long)]
        sign2: String,
        /// Exchange the two signs before submitting.
        #[arg(long, default_value_t = false)]
        swap: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if args.no_delay {
        settings.flames.reveal_delay = Duration::ZERO;
        settings.zodiac.reveal_delay = Duration::ZERO;
    }
    let controllers = Controllers::connect(&settings)?;

    let model = match args.command {
        Command::Flames { name1, name2 } => {
            run(&controllers.flames, &[name1, name2], false).await?
        }
        Command::Zodiac { sign1, sign2, swap } => {
            run(&controllers.zodiac, &[sign1, sign2], swap).await?
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&render::to_json(&model))?);
    } else {
        print!("{}", render::to_text(&model));
    }
    Ok(())
}

async fn run<K: FormKind>(
    controller: &FormController<K>,
    values: &[String],
    swap: bool,
) -> Result<FormModel> {
    for (index, value) in values.iter().enumerate() {
        controller.set_field(index, value.as_str());
    }
    if swap && !controller.swap() {
        bail!("the {} form has no swap action", controller.form_id());
    }

    let outcome = controller.submit().await;
    tracing::debug!(form = %controller.form_id(), ?outcome, "submission settled");
    match outcome {
        SubmitOutcome::Shown => Ok(controller.snapshot()),
        SubmitOutcome::Failed => {
            let model = controller.snapshot();
            bail!(
                "{}",
                model
                    .alert
                    .unwrap_or_else(|| client_core::model::GENERIC_FAILURE_ALERT.to_string())
            )
        }
        SubmitOutcome::Blocked { field } => {
            let label = K::FIELDS.get(field).map_or("field", |spec| spec.label);
            bail!("{label} is required")
        }
        outcome => bail!("submission did not complete: {outcome:?}"),
    }
}
