use inquire::{validator::Validation, Confirm, CustomUserError, InquireError, Select, Text};

use crate::{
    choices::{ProjectName, Strictness, UserChoices},
    error::{Result, ScaffoldError},
};

/// Source of the three answers. Each method returns `Ok(None)` when the user
/// cancels.
pub trait Prompter {
    fn project_name(&self) -> Result<Option<ProjectName>>;
    fn strictness(&self) -> Result<Option<Strictness>>;
    fn initialize_vcs(&self) -> Result<Option<bool>>;
}

/// Asks every question in order. `Ok(None)` if any of them was cancelled.
///
/// # Errors
///
/// Propagates [`ScaffoldError::Prompt`] from the prompter.
pub fn collect(prompter: &dyn Prompter) -> Result<Option<UserChoices>> {
    let Some(name) = prompter.project_name()? else {
        return Ok(None);
    };
    let Some(strictness) = prompter.strictness()? else {
        return Ok(None);
    };
    let Some(initialize_vcs) = prompter.initialize_vcs()? else {
        return Ok(None);
    };

    Ok(Some(UserChoices::new(name, strictness, initialize_vcs)))
}

/// Terminal prompts rendered with `inquire`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn project_name(&self) -> Result<Option<ProjectName>> {
        let answer = Text::new("Project name:")
            .with_default("my-app")
            .with_help_message("letters, digits, '-' and '_'")
            .with_validator(|input: &str| -> std::result::Result<Validation, CustomUserError> {
                Ok(if ProjectName::is_valid(input) {
                    Validation::Valid
                } else {
                    Validation::Invalid("Use only letters, digits, '-' and '_'".into())
                })
            })
            .prompt();

        match cancellable(answer)? {
            Some(name) => ProjectName::new(&name).map(Some),
            None => Ok(None),
        }
    }

    fn strictness(&self) -> Result<Option<Strictness>> {
        let options: Vec<_> = Strictness::ALL
            .into_iter()
            .map(StrictnessOption)
            .collect();
        let default = Strictness::ALL
            .iter()
            .position(|s| *s == Strictness::default())
            .unwrap_or(0);

        let answer = Select::new("TypeScript strictness:", options)
            .with_starting_cursor(default)
            .prompt();

        cancellable(answer).map(|choice| choice.map(|StrictnessOption(level)| level))
    }

    fn initialize_vcs(&self) -> Result<Option<bool>> {
        let answer = Confirm::new("Initialize a git repository?")
            .with_default(true)
            .prompt();

        cancellable(answer)
    }
}

struct StrictnessOption(Strictness);

impl std::fmt::Display for StrictnessOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<9} {}", self.0.as_str(), self.0.summary())
    }
}

fn cancellable<T>(answer: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(ScaffoldError::Prompt(e.to_string())),
    }
}
