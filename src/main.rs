//! onedevx CLI entrypoint.
//!
//! This is the main entrypoint for the onedevx command-line tool.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use onedevx::backend::{ClusterBackend, RenderBackend};
use onedevx::cli::{Cli, Commands, OutputFormatter};
use onedevx::error::Result;
use onedevx::installer::Installer;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Validate { root } => cmd_validate(&root, &formatter).await,
        Commands::Render {
            root,
            stack,
            output_dir,
        } => cmd_render(&root, &stack, output_dir.as_deref()).await,
        Commands::Apply { root, stack, yes } => cmd_apply(&root, &stack, yes, &formatter).await,
    }
}

/// Initialize a sample specification tree.
fn cmd_init(path: &Path, force: bool) -> Result<()> {
    info!("Initializing sample specification tree in: {}", path.display());

    let workspec_path = path.join("sample/workspec.yaml");
    let component_path = path.join("sample-components/ping/component.yaml");
    let env_path = path.join(".env.example");

    if !force && workspec_path.exists() {
        eprintln!("Workspec already exists: {}", workspec_path.display());
        eprintln!("Use --force to overwrite.");
        return Ok(());
    }

    for parent in [
        workspec_path.parent(),
        component_path.parent(),
        env_path.parent(),
    ]
    .into_iter()
    .flatten()
    {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&workspec_path, include_str!("../templates/workspec.yaml"))?;
    eprintln!("Created: {}", workspec_path.display());

    std::fs::write(&component_path, include_str!("../templates/component.yaml"))?;
    eprintln!("Created: {}", component_path.display());

    std::fs::write(&env_path, include_str!("../templates/.env.example"))?;
    eprintln!("Created: {}", env_path.display());

    eprintln!("\nSpecification tree initialized!");
    eprintln!("Next steps:");
    eprintln!("  1. Copy .env.example to .env and fill in your cluster credentials");
    eprintln!("  2. Adjust the sample workspec and component to your stack");
    eprintln!("  3. Run 'onedevx validate' to check the tree");
    eprintln!("  4. Run 'onedevx render' to inspect the resources");
    eprintln!("  5. Run 'onedevx apply' to install them");

    Ok(())
}

/// Load and resolve the whole tree without touching a cluster.
async fn cmd_validate(root: &Path, formatter: &OutputFormatter) -> Result<()> {
    info!("Validating specification tree: {}", root.display());

    let backend = RenderBackend::new();
    let installer = Installer::new(&backend);
    let summary = installer.run("validate", root).await?;

    eprintln!("Specification tree is valid!");
    eprintln!("{}", formatter.format_summary(&summary));

    Ok(())
}

/// Render the resources an installation would create.
async fn cmd_render(root: &Path, stack: &str, output_dir: Option<&Path>) -> Result<()> {
    let backend = RenderBackend::new();
    let installer = Installer::new(&backend);
    installer.run(stack, root).await?;

    let manifests = backend.into_manifests()?;

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
        for (index, rendered) in manifests.iter().enumerate() {
            let file = dir.join(format!(
                "{index:03}-{}-{}.yaml",
                rendered.kind.to_lowercase(),
                rendered.name
            ));
            let yaml = serde_yaml::to_string(&rendered.manifest)
                .map_err(|e| onedevx::OnedevxError::internal(format!("Render failed: {e}")))?;
            std::fs::write(&file, yaml)?;
            eprintln!("Wrote: {}", file.display());
        }
    } else {
        for rendered in &manifests {
            let yaml = serde_yaml::to_string(&rendered.manifest)
                .map_err(|e| onedevx::OnedevxError::internal(format!("Render failed: {e}")))?;
            println!("---\n{yaml}");
        }
    }

    Ok(())
}

/// Install the specification tree into the target cluster.
async fn cmd_apply(
    root: &Path,
    stack: &str,
    auto_approve: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    // Pick up cluster credentials from .env when present.
    dotenvy::dotenv().ok();

    let backend = ClusterBackend::from_env()?;

    if !auto_approve {
        eprint!(
            "This will install the tree at '{}' into namespace 'onedevx-{stack}'. Continue? [y/N]: ",
            root.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Apply cancelled.");
            return Ok(());
        }
    }

    let installer = Installer::new(&backend);
    let summary = installer.run(stack, root).await?;

    eprintln!("{}", formatter.format_summary(&summary));

    Ok(())
}
