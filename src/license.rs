use std::{path::Path, process::Command};

use crate::error::{Result, ScaffoldError};

/// Command run when nothing else is configured: the Yeoman license generator.
pub const DEFAULT_LICENSE_COMMAND: &str = "yo license";

/// Whom the license is issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Author<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Writes a license file into the destination. What gets written is up to the
/// implementation and is never read back.
pub trait LicenseDelegator {
    /// # Errors
    ///
    /// Any [`Err`] aborts the run.
    fn generate(&mut self, destination: &Path, author: &Author<'_>) -> Result<()>;
}

impl<F> LicenseDelegator for F
where
    F: FnMut(&Path, &Author<'_>) -> Result<()>,
{
    fn generate(&mut self, destination: &Path, author: &Author<'_>) -> Result<()> {
        self(destination, author)
    }
}

/// Runs an external program inside the destination, passing
/// `--name=<name> --email=<email>` after the configured arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLicense {
    program: String,
    args: Vec<String>,
}

impl ExternalLicense {
    /// Splits `command` on whitespace into a program and its leading arguments.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if `command` is blank.
    pub fn from_command(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace().map(str::to_owned);

        let program = words
            .next()
            .ok_or_else(|| ScaffoldError::Delegator("no license command configured".into()))?;

        Ok(ExternalLicense {
            program,
            args: words.collect(),
        })
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ExternalLicense {
    fn default() -> Self {
        ExternalLicense {
            program: "yo".into(),
            args: vec!["license".into()],
        }
    }
}

impl LicenseDelegator for ExternalLicense {
    fn generate(&mut self, destination: &Path, author: &Author<'_>) -> Result<()> {
        crate::trace!(
            "Running `{}` in {}",
            self.command_line(),
            destination.display()
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(format!("--name={}", author.name))
            .arg(format!("--email={}", author.email))
            .current_dir(destination)
            .status()
            .map_err(|e| {
                ScaffoldError::Delegator(format!("failed to run `{}`: {e}", self.command_line()))
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::Delegator(format!(
                "`{}` exited with {status}",
                self.command_line()
            )))
        }
    }
}
