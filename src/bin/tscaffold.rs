use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tscaffold::{
    args::Args,
    config::Settings,
    error, info,
    pipeline::{Failure, Pipeline, VcsStatus},
    progress::Progress,
    prompt::{self, InquirePrompter},
    runner::SystemRunner,
    templates::TemplateSet,
    trace, warn,
};

fn app(args: &Args) -> Result<()> {
    if args.no_color {
        owo_colors::set_override(false);
    }

    let settings = Settings::from_env()?;
    let templates = TemplateSet::new(settings.templates_dir());
    let package_manager = settings.package_manager;

    trace!("Templates: {}", templates.root().display());
    trace!("Package manager: {package_manager}");

    let Some(choices) = prompt::collect(&InquirePrompter)? else {
        info!("Cancelled, nothing was created");
        return Ok(());
    };

    let pipeline = Pipeline::builder()
        .templates(templates)
        .working_dir(std::env::current_dir().context("Failed to get current dir")?)
        .installer(package_manager)
        .build()?;

    let progress = Progress::spinner();
    let outcome = pipeline.run(&choices, &SystemRunner, &progress)?;
    drop(progress);

    info!(
        "Created {} in {}",
        choices.project_name(),
        outcome.target.display()
    );

    match &outcome.vcs {
        VcsStatus::Failed {
            step,
            repository_created: true,
            ..
        } => warn!(
            "`{}` did not finish; the git repository in the project has no commit yet",
            step
        ),
        VcsStatus::Failed { .. } => {
            warn!("No git repository was created; run `git init` inside the project to add one");
        }
        VcsStatus::Skipped | VcsStatus::Initialized => {}
    }

    println!();
    println!("Next steps:");
    println!("    cd {}", choices.project_name());
    println!("    {}", package_manager.run_script("dev"));

    Ok(())
}

fn report(e: &anyhow::Error) {
    error!("{}", e);

    if let Some(dir) = e
        .downcast_ref::<Failure>()
        .and_then(|f| f.left_behind.as_ref())
    {
        info!(
            "{} was left in place for inspection; remove it before retrying",
            dir.display()
        );
    }
}

/// Cancellation and git warnings end in `Ok`; any error exits with 1.
fn exit_code(result: &Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let result = app(&args);

    if let Err(e) = &result {
        report(e);
    }

    exit_code(&result)
}
