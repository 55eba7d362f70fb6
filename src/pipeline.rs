use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use derive_builder::Builder;
use thiserror::Error;

use crate::{
    choices::{ProjectName, UserChoices},
    error::ScaffoldError,
    install::Installer,
    materialize,
    progress::Progress,
    runner::CommandRunner,
    templates::TemplateSet,
    trace,
    vcs::Vcs,
};

/// Stages that abort the run when they fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Materializing,
    Installing,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validating => write!(f, "preparing the project directory"),
            Self::Materializing => write!(f, "writing project files"),
            Self::Installing => write!(f, "installing dependencies"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsStatus {
    /// The user declined a repository.
    Skipped,
    Initialized,
    /// Setup stopped at `step`; the message was shown as a warning.
    Failed {
        step: String,
        /// `.git` exists but holds no commit.
        repository_created: bool,
        message: String,
    },
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub target: PathBuf,
    pub files: Vec<PathBuf>,
    pub lock_file: PathBuf,
    pub vcs: VcsStatus,
}

/// A fatal error and the stage it happened in.
///
/// `left_behind` names the project directory when it was already created;
/// it is not removed.
#[derive(Debug, Error)]
#[error("failed while {stage}: {source}")]
pub struct Failure {
    pub stage: Stage,
    pub left_behind: Option<PathBuf>,
    #[source]
    pub source: ScaffoldError,
}

/// Creates one project: check the target, write files, install, then
/// optionally commit.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Pipeline {
    templates: TemplateSet,
    working_dir: PathBuf,
    #[builder(default)]
    installer: Installer,
    #[builder(default)]
    vcs: Vcs,
}

impl Pipeline {
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    #[must_use]
    pub fn target_for(&self, name: &ProjectName) -> PathBuf {
        self.working_dir.join(name.as_str())
    }

    /// Runs every stage in order.
    ///
    /// Git setup runs only when `choices` asks for it and never fails the
    /// run: its error becomes [`VcsStatus::Failed`] and a progress warning.
    ///
    /// # Errors
    ///
    /// Returns a [`Failure`] from the first of validation, materialization or
    /// install that fails. Later stages are not attempted.
    pub fn run(
        &self,
        choices: &UserChoices,
        runner: &dyn CommandRunner,
        progress: &Progress,
    ) -> Result<Outcome, Failure> {
        let name = choices.project_name();
        let target = self.target_for(name);

        trace!("Templates: {}", self.templates.root().display());
        trace!("Target: {}", target.display());

        progress.start(format!("Creating {}", target.display()));
        materialize::ensure_target_absent(&target)
            .and_then(|()| materialize::create_target(&target))
            .map_err(|e| abort(progress, Stage::Validating, None, e))?;
        progress.succeed(format!("Created {}", target.display()));

        let missing = self.templates.missing();
        if !missing.is_empty() {
            trace!("Missing templates: {missing:?}");
        }

        progress.start("Writing project files");
        let files =
            materialize::copy_templates(&self.templates, &target, name, choices.strictness())
                .map_err(|e| abort(progress, Stage::Materializing, Some(target.as_path()), e))?;
        progress.succeed(format!(
            "Wrote project files ({} tsconfig)",
            choices.strictness()
        ));

        progress.start(format!("Running `{}`", self.installer.command));
        let lock_file = self
            .installer
            .install(runner, &target)
            .map_err(|e| abort(progress, Stage::Installing, Some(target.as_path()), e))?;
        progress.succeed("Installed dependencies");

        let vcs = if choices.initialize_vcs() {
            progress.start("Initializing git repository");
            self.initialize_vcs(runner, &target, progress)
        } else {
            VcsStatus::Skipped
        };

        Ok(Outcome {
            target,
            files,
            lock_file,
            vcs,
        })
    }

    fn initialize_vcs(
        &self,
        runner: &dyn CommandRunner,
        target: &Path,
        progress: &Progress,
    ) -> VcsStatus {
        match self.vcs.initialize(runner, target) {
            Ok(()) => {
                progress.succeed("Created initial commit");
                VcsStatus::Initialized
            }
            Err(e) => {
                if e.repository_created() {
                    progress.warn(format!("Created git repository without a commit: {e}"));
                } else {
                    progress.warn(format!("Skipped git setup: {e}"));
                }

                VcsStatus::Failed {
                    step: e.step.to_string(),
                    repository_created: e.repository_created(),
                    message: e.to_string(),
                }
            }
        }
    }
}

fn abort(
    progress: &Progress,
    stage: Stage,
    left_behind: Option<&Path>,
    source: ScaffoldError,
) -> Failure {
    progress.fail(format!("Failed while {stage}"));

    Failure {
        stage,
        left_behind: left_behind.map(Path::to_path_buf),
        source,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{
        choices::Strictness,
        progress::Status,
        runner::{
            recording::{RecordingRunner, Reply},
            Invocation,
        },
        templates::{CONFIG_FILE, MANIFEST_FILE},
        vcs::COMMIT_MESSAGE,
    };

    const LOCK: &str = "package-lock.json";

    fn bundled() -> TemplateSet {
        TemplateSet::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates"))
    }

    fn pipeline(working_dir: &Path) -> Pipeline {
        Pipeline::builder()
            .templates(bundled())
            .working_dir(working_dir)
            .installer(Installer::new(Invocation::new("npm", ["install"]), [LOCK]))
            .build()
            .unwrap()
    }

    fn choices(name: &str, strictness: Strictness, vcs: bool) -> UserChoices {
        UserChoices::new(ProjectName::new(name).unwrap(), strictness, vcs)
    }

    fn installing() -> RecordingRunner {
        RecordingRunner::new().on("npm", Reply::ExitWriting(0, LOCK))
    }

    #[test]
    fn creates_demo_app_with_commit() {
        let dir = tempfile::tempdir().unwrap();
        let runner = installing();
        let progress = Progress::hidden();

        let outcome = pipeline(dir.path())
            .run(&choices("demo-app", Strictness::Strict, true), &runner, &progress)
            .unwrap();

        let target = dir.path().join("demo-app");
        assert_eq!(outcome.target, target);
        assert_eq!(outcome.lock_file, target.join(LOCK));
        assert_eq!(outcome.vcs, VcsStatus::Initialized);

        let manifest = fs::read_to_string(target.join(MANIFEST_FILE)).unwrap();
        assert!(manifest.contains(r#""name": "demo-app""#));
        assert_eq!(
            fs::read(target.join(CONFIG_FILE)).unwrap(),
            fs::read(bundled().config(Strictness::Strict)).unwrap()
        );

        let calls = runner.calls();
        let programs: Vec<_> = calls.iter().map(|c| c.program.as_str()).collect();
        assert_eq!(programs, ["npm", "git", "git", "git"]);
        assert!(calls.iter().all(|c| c.cwd == target));
        assert_eq!(calls[3].args, ["commit", "-m", COMMIT_MESSAGE]);
    }

    #[test]
    fn existing_directory_aborts_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("demo-app");
        fs::create_dir(&target).unwrap();
        let runner = installing();

        let failure = pipeline(dir.path())
            .run(
                &choices("demo-app", Strictness::Moderate, true),
                &runner,
                &Progress::hidden(),
            )
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Validating);
        assert!(matches!(failure.source, ScaffoldError::TargetExists(_)));
        assert_eq!(failure.left_behind, None);
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn existing_file_aborts_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("demo-app");
        fs::write(&target, "keep me").unwrap();
        let runner = installing();

        let failure = pipeline(dir.path())
            .run(
                &choices("demo-app", Strictness::Relaxed, false),
                &runner,
                &Progress::hidden(),
            )
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Validating);
        assert_eq!(fs::read_to_string(&target).unwrap(), "keep me");
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn failed_install_skips_git_and_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new().on("npm", Reply::Exit(1));
        let progress = Progress::hidden();

        let failure = pipeline(dir.path())
            .run(&choices("demo-app", Strictness::Strict, true), &runner, &progress)
            .unwrap_err();

        let target = dir.path().join("demo-app");
        assert_eq!(failure.stage, Stage::Installing);
        assert!(matches!(failure.source, ScaffoldError::CommandFailed { .. }));
        assert_eq!(failure.left_behind.as_deref(), Some(target.as_path()));
        assert!(target.join(MANIFEST_FILE).is_file());
        assert!(!runner.invoked("git"));
        assert_eq!(progress.events().last().unwrap().0, Status::Failed);
    }

    #[test]
    fn missing_lock_file_skips_git() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new().on("npm", Reply::Exit(0));

        let failure = pipeline(dir.path())
            .run(
                &choices("demo-app", Strictness::Strict, true),
                &runner,
                &Progress::hidden(),
            )
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Installing);
        assert!(matches!(
            failure.source,
            ScaffoldError::InstallVerification { .. }
        ));
        assert!(!runner.invoked("git"));
    }

    #[test]
    fn declined_vcs_never_runs_git() {
        for reply in [Reply::ExitWriting(0, LOCK), Reply::Exit(1), Reply::Exit(0)] {
            let dir = tempfile::tempdir().unwrap();
            let runner = RecordingRunner::new().on("npm", reply);

            let result = pipeline(dir.path()).run(
                &choices("app", Strictness::Moderate, false),
                &runner,
                &Progress::hidden(),
            );

            if let Ok(outcome) = result {
                assert_eq!(outcome.vcs, VcsStatus::Skipped);
            }
            assert!(!runner.invoked("git"), "{reply:?}");
        }
    }

    #[test]
    fn git_failure_is_only_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let runner = installing().on("git", Reply::Missing);
        let progress = Progress::hidden();

        let outcome = pipeline(dir.path())
            .run(&choices("demo-app", Strictness::Strict, true), &runner, &progress)
            .unwrap();

        assert!(matches!(
            outcome.vcs,
            VcsStatus::Failed { repository_created: false, ref step, .. } if step == "git init"
        ));
        let (status, message) = progress.events().pop().unwrap();
        assert_eq!(status, Status::Warned);
        assert!(message.starts_with("Skipped git setup"));
    }

    #[test]
    fn failed_commit_keeps_the_repository() {
        let dir = tempfile::tempdir().unwrap();
        let runner = installing().on_subcommand("git", "commit", Reply::Exit(1));
        let progress = Progress::hidden();

        let outcome = pipeline(dir.path())
            .run(&choices("demo-app", Strictness::Strict, true), &runner, &progress)
            .unwrap();

        assert!(matches!(
            outcome.vcs,
            VcsStatus::Failed { repository_created: true, ref step, .. } if step.starts_with("git commit")
        ));
        let (status, message) = progress.events().pop().unwrap();
        assert_eq!(status, Status::Warned);
        assert!(message.starts_with("Created git repository without a commit"));
    }

    #[test]
    fn missing_templates_fail_materialization() {
        let dir = tempfile::tempdir().unwrap();
        let runner = installing();

        let failure = Pipeline::builder()
            .templates(TemplateSet::new(dir.path().join("no-templates")))
            .working_dir(dir.path())
            .build()
            .unwrap()
            .run(
                &choices("demo-app", Strictness::Strict, true),
                &runner,
                &Progress::hidden(),
            )
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Materializing);
        assert!(matches!(failure.source, ScaffoldError::Template { .. }));
        assert_eq!(failure.left_behind, Some(dir.path().join("demo-app")));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn builder_requires_templates_and_working_dir() {
        assert!(Pipeline::builder().working_dir("/tmp").build().is_err());
        assert!(Pipeline::builder().templates(bundled()).build().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn real_git_repository_gets_one_commit() {
        use crate::runner::SystemRunner;

        if SystemRunner
            .run("git", &["--version".to_string()], Path::new("."))
            .map_or(true, |o| !o.success())
        {
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let identity = [
            "-c",
            "user.name=tscaffold",
            "-c",
            "user.email=tscaffold@example.com",
        ];
        let vcs = Vcs::new(vec![
            Invocation::new("git", ["init"]),
            Invocation::new("git", ["add", "-A"]),
            Invocation::new(
                "git",
                identity
                    .iter()
                    .copied()
                    .chain(["-c", "commit.gpgsign=false", "commit", "-m", COMMIT_MESSAGE]),
            ),
        ]);
        let pipeline = Pipeline::builder()
            .templates(bundled())
            .working_dir(dir.path())
            .installer(Installer::new(
                Invocation::new("sh", ["-c", "echo '{}' > package-lock.json"]),
                [LOCK],
            ))
            .vcs(vcs)
            .build()
            .unwrap();

        let outcome = pipeline
            .run(
                &choices("demo-app", Strictness::Strict, true),
                &SystemRunner,
                &Progress::hidden(),
            )
            .unwrap();
        assert_eq!(outcome.vcs, VcsStatus::Initialized);

        let count = std::process::Command::new("git")
            .args(["rev-list", "--count", "HEAD"])
            .current_dir(&outcome.target)
            .output()
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&count.stdout).trim(), "1");
    }
}
