use std::path::{Path, PathBuf};

use derive_builder::Builder;

use crate::{
    answers::Answers,
    args::Overrides,
    error::Result,
    license::{Author, LicenseDelegator},
    prompt::{PromptSequence, Prompter},
    store::{AnswerStore, VERSION_KEY},
    template::{render_parametric, render_static, TemplateId},
    update::{self, Package},
    writer::FileWriter,
};

const WELCOME: &str = "Welcome to the python 3.6+ package generator!";

/// One scaffolding run: check for updates, ask, then write the package.
#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct Generator<P, L> {
    #[builder(setter(into))]
    destination: PathBuf,
    #[builder(default)]
    overrides: Overrides,
    #[builder(default)]
    skip_welcome_message: bool,
    #[builder(default = "true")]
    update_check: bool,
    #[builder(default = "Package::current()")]
    package: Package,
    prompter: P,
    license: L,
}

impl<P, L> Generator<P, L>
where
    P: Prompter,
    L: LicenseDelegator,
{
    /// Create a new [`Generator`] builder
    #[must_use]
    pub fn builder() -> GeneratorBuilder<P, L> {
        GeneratorBuilder::create_empty()
    }

    #[must_use]
    pub fn destination(&self) -> &Path {
        self.destination.as_path()
    }

    /// Runs every phase in order and returns the collected answers.
    ///
    /// Files written before a failure stay on disk.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the answer store can not be read or saved, the
    /// prompter fails, a template fails to render, a file can not be written
    /// or the license delegator fails.
    pub fn run(mut self) -> Result<Answers> {
        if self.update_check {
            update::notify(&self.package);
        }

        let mut store = AnswerStore::open(&self.destination)?;

        if let Some(version) = store.version() {
            crate::trace!(
                "{} was last generated by {} {version}",
                self.destination.display(),
                self.package.name
            );
        }

        if !self.skip_welcome_message {
            welcome();
        }

        let answers = PromptSequence::new(&self.overrides, &store).run(&mut self.prompter)?;

        store.record(&answers);
        store.save()?;

        self.write(&answers)?;

        store.set(VERSION_KEY, self.package.version);
        store.save()?;

        crate::info!(
            "Created package {} in {}",
            answers.package_name,
            self.destination.display()
        );

        Ok(answers)
    }

    fn write(&mut self, answers: &Answers) -> Result<()> {
        let writer = FileWriter::new(&self.destination);

        self.license.generate(
            &self.destination,
            &Author {
                name: &answers.full_name,
                email: &answers.email,
            },
        )?;

        render(&writer, TemplateId::SetupPy, answers)?;

        if answers.use_travis_ci {
            render(&writer, TemplateId::TravisYml, answers)?;
        }

        let package = Path::new(&answers.package_name);
        writer.write(package.join("__init__.py"), "")?;
        writer.write(package.join("tests").join("__init__.py"), "")?;

        render(&writer, TemplateId::Readme, answers)?;

        for template in TemplateId::STATIC {
            writer.write(template.target(), render_static(template))?;
        }

        Ok(())
    }
}

/// Renders `template` with only the answers it names.
fn render(writer: &FileWriter, template: TemplateId, answers: &Answers) -> Result<()> {
    let contents = render_parametric(template, &answers.context(template.fields()))?;
    writer.write(template.target(), contents)?;

    Ok(())
}

fn welcome() {
    use owo_colors::OwoColorize;

    let rule = "─".repeat(WELCOME.chars().count() + 2);

    println!("╭{rule}╮");
    println!(
        "│ {} │",
        WELCOME.if_supports_color(owo_colors::Stream::Stdout, |s| s
            .style(owo_colors::Style::new().bold().yellow()))
    );
    println!("╰{rule}╯");
}
