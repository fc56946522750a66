//! mcpforge CLI - scaffold MCP server projects.

mod prompt;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mcpforge_core::{parse_args, parse_env_pairs, ServerSpec};
use mcpforge_project::{scaffold, ScaffoldOptions, ScaffoldReport, Stage};
use mcpforge_tools::installer_for;
use tokio::io::BufReader;
use tracing::info;

use prompt::PromptSession;

type StdioSession = PromptSession<BufReader<tokio::io::Stdin>, tokio::io::Stdout>;

#[derive(Parser)]
#[command(name = "mcpforge")]
#[command(about = "Scaffold MCP server projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new MCP server project
    New {
        /// Base directory to create the project under
        #[arg(default_value = ".")]
        directory: PathBuf,
        /// Server name (prompted if omitted)
        #[arg(long)]
        name: Option<String>,
        /// Launch command (prompted if omitted)
        #[arg(long)]
        command: Option<String>,
        /// Comma-separated launch arguments (prompted if omitted)
        #[arg(long)]
        args: Option<String>,
        /// Comma-separated KEY=VALUE environment variables (prompted if omitted)
        #[arg(long)]
        env: Option<String>,
        /// Package manager for the install stage
        #[arg(long, default_value = "npm")]
        package_manager: String,
        /// Skip dependency installation
        #[arg(long)]
        no_install: bool,
        /// Install timeout in seconds
        #[arg(long)]
        install_timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New {
            directory,
            name,
            command,
            args,
            env,
            package_manager,
            no_install,
            install_timeout,
        } => {
            let spec = collect_spec(name, command, args, env).await?;

            let installer = if no_install {
                None
            } else {
                Some(installer_for(&package_manager).ok_or_else(|| {
                    anyhow::anyhow!("unsupported package manager: {package_manager}")
                })?)
            };

            let options = ScaffoldOptions {
                installer: installer.as_deref(),
                install_timeout: install_timeout.map(Duration::from_secs),
            };

            info!(name = %spec.name, dir = %directory.display(), "scaffolding server");
            let report = scaffold(&directory, &spec, options).await;
            print_report(&spec, &report);

            if !report.success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Build the spec from flags, prompting only for what is missing.
///
/// The prompt session is opened lazily and closed before scaffolding
/// starts; validation errors drop it on the way out.
async fn collect_spec(
    name: Option<String>,
    command: Option<String>,
    args: Option<String>,
    env: Option<String>,
) -> Result<ServerSpec> {
    let mut session: Option<StdioSession> = None;

    let name = answer(&mut session, name, "MCP server name: ").await?;
    let command = answer(&mut session, command, "Launch command (e.g. node): ").await?;
    let args = answer(
        &mut session,
        args,
        "Arguments (comma separated, e.g. --version, -y): ",
    )
    .await?;
    let env = answer(
        &mut session,
        env,
        "Environment variables (key=value, comma separated): ",
    )
    .await?;

    if let Some(session) = session {
        session.close().await?;
    }

    Ok(ServerSpec::new(
        name,
        command,
        parse_args(&args),
        parse_env_pairs(&env),
    )?)
}

/// Use the flag value if given, otherwise prompt for it.
async fn answer(
    session: &mut Option<StdioSession>,
    flag: Option<String>,
    prompt: &str,
) -> Result<String> {
    match flag {
        Some(value) => Ok(value),
        None => {
            let session = session.get_or_insert_with(PromptSession::open);
            session.ask(prompt).await
        }
    }
}

fn print_report(spec: &ServerSpec, report: &ScaffoldReport) {
    println!();
    for stage in &report.stages {
        let status = if stage.skipped {
            "skipped"
        } else if stage.success {
            "ok"
        } else {
            "FAILED"
        };
        println!("  {:<15} {}", stage.stage.as_str(), status);
        if let Some(error) = &stage.error {
            println!("                  {error}");
        }
    }
    println!();

    if report.files_written() {
        println!("Project created at {}", report.project_dir.display());

        let install = report.stage(Stage::Install);
        if install.is_some_and(|r| !r.success && !r.skipped) {
            println!("Project files were written, but dependency installation failed.");
            if let Some(output) = install.and_then(|r| r.output.as_ref()) {
                let stderr = output.stderr.trim();
                if !stderr.is_empty() {
                    println!("{stderr}");
                }
            }
            println!("Fix the issue above and re-run the install inside the project.");
        }

        println!();
        println!("Next steps:");
        println!("  cd {}", report.project_dir.display());
        println!("  npm run build");
        println!("  npm start");
        println!();
        println!("Paste mcp.json into your MCP client configuration to register '{}'.", spec.name);
    } else {
        let failed = report
            .stages
            .iter()
            .find(|r| !r.success && !r.skipped)
            .map(|r| r.stage.as_str())
            .unwrap_or("unknown");
        println!("Scaffolding failed at the {failed} stage; no usable project was created.");
    }
}
