//! Files embedded in the binary and turned into the generated package.
//!
//! Parametric templates use Tera syntax (`{{ packageName }}`,
//! `{% if useTravisCI %}`). Static ones are written out byte for byte.

use tera::{Context, Tera};

use crate::{
    answers::Field,
    error::{Result, ScaffoldError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    SetupPy,
    Readme,
    TravisYml,
    Flake8,
    Makefile,
    EditorConfig,
    GitIgnore,
    Requirements,
}

pub enum Source {
    Static(&'static [u8]),
    Parametric(&'static str),
}

impl TemplateId {
    /// The templates copied verbatim, in the order they are written.
    pub const STATIC: [TemplateId; 5] = [
        TemplateId::Flake8,
        TemplateId::Makefile,
        TemplateId::EditorConfig,
        TemplateId::GitIgnore,
        TemplateId::Requirements,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::SetupPy => "setup.py.tera",
            TemplateId::Readme => "README.md.tera",
            TemplateId::TravisYml => "travis.yml.tera",
            TemplateId::Flake8 => "flake8",
            TemplateId::Makefile => "Makefile",
            TemplateId::EditorConfig => "editorconfig",
            TemplateId::GitIgnore => "gitignore",
            TemplateId::Requirements => "requirements.txt",
        }
    }

    /// Path of the generated file, relative to the destination.
    #[must_use]
    pub fn target(self) -> &'static str {
        match self {
            TemplateId::SetupPy => "setup.py",
            TemplateId::Readme => "README.md",
            TemplateId::TravisYml => ".travis.yml",
            TemplateId::Flake8 => ".flake8",
            TemplateId::Makefile => "Makefile",
            TemplateId::EditorConfig => ".editorconfig",
            TemplateId::GitIgnore => ".gitignore",
            TemplateId::Requirements => "requirements.txt",
        }
    }

    /// The answers a parametric template reads. Static templates read none.
    #[must_use]
    pub fn fields(self) -> &'static [Field] {
        match self {
            TemplateId::SetupPy => &[
                Field::Email,
                Field::FullName,
                Field::PackageName,
                Field::PackageDesc,
            ],
            TemplateId::Readme => &[
                Field::UseTravisCI,
                Field::FullName,
                Field::PackageName,
                Field::GithubUserName,
            ],
            TemplateId::TravisYml => &[Field::PypiUserName],
            TemplateId::Flake8
            | TemplateId::Makefile
            | TemplateId::EditorConfig
            | TemplateId::GitIgnore
            | TemplateId::Requirements => &[],
        }
    }

    #[must_use]
    pub fn source(self) -> Source {
        match self {
            TemplateId::SetupPy => {
                Source::Parametric(include_str!("../templates/setup.py.tera"))
            }
            TemplateId::Readme => Source::Parametric(include_str!("../templates/README.md.tera")),
            TemplateId::TravisYml => {
                Source::Parametric(include_str!("../templates/travis.yml.tera"))
            }
            TemplateId::Flake8 => Source::Static(include_bytes!("../templates/static/flake8")),
            TemplateId::Makefile => Source::Static(include_bytes!("../templates/static/Makefile")),
            TemplateId::EditorConfig => {
                Source::Static(include_bytes!("../templates/static/editorconfig"))
            }
            TemplateId::GitIgnore => {
                Source::Static(include_bytes!("../templates/static/gitignore"))
            }
            TemplateId::Requirements => {
                Source::Static(include_bytes!("../templates/static/requirements.txt"))
            }
        }
    }
}

/// Raw contents of `template`, untouched.
#[must_use]
pub fn render_static(template: TemplateId) -> &'static [u8] {
    match template.source() {
        Source::Static(bytes) => bytes,
        Source::Parametric(text) => text.as_bytes(),
    }
}

/// Renders `template` with `vars`.
///
/// # Errors
///
/// Returns [`ScaffoldError::MissingVariable`] when a name the template reads
/// is absent from `vars`, even one only tested by a condition, and [`ScaffoldError::Render`] for anything else the
/// engine rejects, including asking to render a static template.
pub fn render_parametric(template: TemplateId, vars: &Context) -> Result<String> {
    let Source::Parametric(source) = template.source() else {
        return Err(ScaffoldError::Render {
            template: template.name(),
            message: "template is static and takes no variables".into(),
        });
    };

    if let Some(field) = template.fields().iter().find(|f| !vars.contains_key(f.key())) {
        return Err(ScaffoldError::MissingVariable {
            template: template.name(),
            name: field.key().to_owned(),
        });
    }

    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());

    tera.add_raw_template(template.name(), source)
        .map_err(|e| render_error(template, &e))?;

    tera.render(template.name(), vars)
        .map_err(|e| render_error(template, &e))
}

fn render_error(template: TemplateId, err: &tera::Error) -> ScaffoldError {
    let mut messages = Vec::new();
    let mut current: Option<&dyn std::error::Error> = Some(err);

    while let Some(e) = current {
        let message = e.to_string();

        if let Some(name) = missing_variable(&message) {
            return ScaffoldError::MissingVariable {
                template: template.name(),
                name: name.to_owned(),
            };
        }

        messages.push(message);
        current = e.source();
    }

    ScaffoldError::Render {
        template: template.name(),
        message: messages.join(": "),
    }
}

/// Picks the name out of Tera's "Variable `name` not found in context" message.
fn missing_variable(message: &str) -> Option<&str> {
    if !message.contains("not found in context") {
        return None;
    }

    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;

    Some(&message[start..start + len])
}
