use std::path::PathBuf;

pub use clap::Parser;

use crate::license::DEFAULT_LICENSE_COMMAND;

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Args {
    /// Where to create the package
    #[clap(default_value = ".")]
    pub destination: PathBuf,

    #[clap(flatten)]
    pub overrides: Overrides,

    /// Do not greet before asking questions
    #[clap(long, alias = "skip-welcome")]
    pub skip_welcome_message: bool,

    /// Program (and leading arguments) that writes the license file
    #[clap(long, default_value = DEFAULT_LICENSE_COMMAND)]
    pub license_command: String,

    /// Do not print the error message on failure
    #[clap(long, short = 'q')]
    pub no_errors: bool,
}

impl Args {
    #[must_use]
    pub fn no_errors(&self) -> bool {
        self.no_errors
    }
}

/// Answers given up front on the command line. Each one replaces the
/// remembered default of its prompt.
#[derive(clap::Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    /// Name of your project
    #[clap(long, alias = "packageName", value_parser = non_empty)]
    pub package_name: Option<String>,

    /// Description of your project
    #[clap(long, alias = "packageDesc", value_parser = non_empty)]
    pub package_desc: Option<String>,

    /// Your full name
    #[clap(long, alias = "fullName", value_parser = non_empty)]
    pub full_name: Option<String>,

    /// Your GitHub username
    #[clap(long, alias = "githubUserName", value_parser = non_empty)]
    pub github_user_name: Option<String>,

    /// Your PyPI username
    #[clap(long, alias = "pypiUserName", value_parser = non_empty)]
    pub pypi_user_name: Option<String>,

    /// Your e-mail address
    #[clap(long, value_parser = non_empty)]
    pub email: Option<String>,

    /// Create a .travis.yml file
    #[clap(
        long,
        alias = "useTravisCI",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        overrides_with = "no_use_travis_ci"
    )]
    pub use_travis_ci: Option<bool>,

    /// Do not create a .travis.yml file
    #[clap(long, alias = "no-useTravisCI", overrides_with = "use_travis_ci")]
    pub no_use_travis_ci: bool,
}

impl Overrides {
    /// The CI answer given on the command line, if any. The later of
    /// `--use-travis-ci` and `--no-use-travis-ci` wins.
    #[must_use]
    pub fn travis_ci(&self) -> Option<bool> {
        if self.no_use_travis_ci {
            Some(false)
        } else {
            self.use_travis_ci
        }
    }
}

fn non_empty(value: &str) -> Result<String, String> {
    if crate::prompt::validate::non_empty(value) {
        Ok(value.to_owned())
    } else {
        Err("value must not be empty".to_owned())
    }
}
