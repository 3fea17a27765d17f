use serde::{Deserialize, Serialize};
use tera::{Context, Value};

/// The names under which answers are prompted, stored and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    PackageName,
    PackageDesc,
    FullName,
    PypiUserName,
    GithubUserName,
    Email,
    UseTravisCI,
}

impl Field {
    /// Every field in prompt order.
    pub const ALL: [Field; 7] = [
        Field::PackageName,
        Field::PackageDesc,
        Field::FullName,
        Field::PypiUserName,
        Field::GithubUserName,
        Field::Email,
        Field::UseTravisCI,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Field::PackageName => "packageName",
            Field::PackageDesc => "packageDesc",
            Field::FullName => "fullName",
            Field::PypiUserName => "pypiUserName",
            Field::GithubUserName => "githubUserName",
            Field::Email => "email",
            Field::UseTravisCI => "useTravisCI",
        }
    }

    #[must_use]
    pub fn is_bool(self) -> bool {
        matches!(self, Field::UseTravisCI)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Everything the operator answered, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Answers {
    #[serde(rename = "packageName")]
    pub package_name: String,
    #[serde(rename = "packageDesc")]
    pub package_desc: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "pypiUserName")]
    pub pypi_user_name: String,
    #[serde(rename = "githubUserName")]
    pub github_user_name: String,
    pub email: String,
    #[serde(rename = "useTravisCI")]
    pub use_travis_ci: bool,
}

impl Answers {
    #[must_use]
    pub fn get(&self, field: Field) -> Value {
        match field {
            Field::PackageName => Value::from(self.package_name.as_str()),
            Field::PackageDesc => Value::from(self.package_desc.as_str()),
            Field::FullName => Value::from(self.full_name.as_str()),
            Field::PypiUserName => Value::from(self.pypi_user_name.as_str()),
            Field::GithubUserName => Value::from(self.github_user_name.as_str()),
            Field::Email => Value::from(self.email.as_str()),
            Field::UseTravisCI => Value::Bool(self.use_travis_ci),
        }
    }

    pub fn set_text(&mut self, field: Field, value: String) {
        match field {
            Field::PackageName => self.package_name = value,
            Field::PackageDesc => self.package_desc = value,
            Field::FullName => self.full_name = value,
            Field::PypiUserName => self.pypi_user_name = value,
            Field::GithubUserName => self.github_user_name = value,
            Field::Email => self.email = value,
            Field::UseTravisCI => {
                crate::trace!("Ignoring text answer for boolean field {field}");
            }
        }
    }

    /// Builds a template context holding only `fields`, so a template that
    /// reaches for anything else fails to render.
    #[must_use]
    pub fn context(&self, fields: &[Field]) -> Context {
        let mut context = Context::new();

        for &field in fields {
            context.insert(field.key(), &self.get(field));
        }

        context
    }
}
