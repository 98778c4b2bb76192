//! `storypilot` 바이너리 진입점.

use storypilot::interface::cli::runner::{run_demo, run_generate, run_serve};
use storypilot::interface::cli::{Cli, CliAction};
use storypilot::interface::composition::AppComposition;

#[tokio::main]
async fn main() {
    let action = Cli::parse_action();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| action.default_log_filter().into()),
        )
        .init();

    if let Err(err) = run(action).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(action: CliAction) -> anyhow::Result<()> {
    match action {
        CliAction::Demo => println!("{}", run_demo()?),
        CliAction::Serve { bind } => run_serve(AppComposition::load()?, bind).await?,
        CliAction::Generate(options) => {
            let composition = AppComposition::load()?;
            println!("{}", run_generate(&composition, options).await?);
        }
        CliAction::InspectConfig => {
            let composition = AppComposition::load()?;
            println!("{}", composition.inspect_config_usecase().execute()?);
        }
    }
    Ok(())
}
