//! gh-advanced-security - manage GitHub Advanced Security features from the command line

use clap::Parser;

mod cli;
mod client;
mod config;
mod enforce;
mod error;
mod models;
mod output;
mod report;

use cli::{
    CommandContext, Cli, Commands, DependencyCommands, GlobalOptions, ListCommands, ShowCommands,
};
use enforce::Toggle;
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}

/// `warn` by default, this crate at `debug` with `--debug`; `RUST_LOG` wins.
fn init_logging(debug: bool) {
    let default_filter = if debug {
        "warn,gh_advanced_security=debug"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    if let Commands::Completion { shell } = cli.command {
        cli::completions::run(shell);
        return Ok(());
    }

    let ctx = CommandContext::new(&opts)?;

    match cli.command {
        Commands::List(list_cmd) => match list_cmd {
            ListCommands::Orgs => cli::org::list(&ctx).await,
            ListCommands::Repos { owner, user } => cli::repo::list(&ctx, owner.owner, user).await,
            ListCommands::Alerts { kind, repo } => cli::alert::list(&ctx, kind, repo.repo).await,
            ListCommands::Bypasses { repo } => cli::alert::bypasses(&ctx, repo.repo).await,
        },
        Commands::Show(show_cmd) => match show_cmd {
            ShowCommands::Repo { repo } => cli::repo::show(&ctx, repo.repo).await,
            ShowCommands::Org { owner } => cli::org::show(&ctx, owner.owner).await,
        },
        Commands::Enable(args) => {
            cli::enforce::run(
                &ctx,
                Toggle::Enable,
                args.feature,
                args.target.target,
                args.per_repo,
            )
            .await
        }
        Commands::Disable(args) => {
            cli::enforce::run(
                &ctx,
                Toggle::Disable,
                args.feature,
                args.target.target,
                args.per_repo,
            )
            .await
        }
        Commands::Report(args) => {
            cli::report::run(&ctx, args.kind, args.owner.owner, args.output).await
        }
        Commands::DependencyGraph(dep_cmd) => match dep_cmd {
            DependencyCommands::Sbom { repo } => cli::dependency::sbom(&ctx, repo.repo).await,
            DependencyCommands::Alerts { repo } => cli::dependency::alerts(&ctx, repo.repo).await,
        },
        Commands::UploadSarif(args) => cli::sarif::upload(&ctx, args).await,
        Commands::Completion { .. } => Ok(()),
    }
}
