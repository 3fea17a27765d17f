use std::collections::VecDeque;

use crate::{
    answers::{Answers, Field},
    args::Overrides,
    error::{Result, ScaffoldError},
    store::AnswerStore,
};

pub mod validate {
    use crate::answers::Field;

    /// Only the length is checked, so `"  "` passes.
    #[must_use]
    pub fn non_empty(value: &str) -> bool {
        !value.is_empty()
    }

    /// The check applied to a text answer for `field`. The CI toggle has none.
    #[must_use]
    pub fn for_field(field: Field) -> Option<fn(&str) -> bool> {
        match field {
            Field::UseTravisCI => None,
            Field::PackageName
            | Field::PackageDesc
            | Field::FullName
            | Field::PypiUserName
            | Field::GithubUserName
            | Field::Email => Some(non_empty),
        }
    }
}

/// A value either offered as a default or given back by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Flag(bool),
}

impl Reply {
    fn kind(&self) -> &'static str {
        match self {
            Reply::Text(_) => "a text",
            Reply::Flag(_) => "a yes/no",
        }
    }

    fn same_kind(&self, other: &Reply) -> bool {
        matches!(
            (self, other),
            (Reply::Text(_), Reply::Text(_)) | (Reply::Flag(_), Reply::Flag(_))
        )
    }
}

#[derive(Clone)]
pub struct Question {
    pub field: Field,
    pub message: &'static str,
    pub default: Reply,
    pub validate: Option<fn(&str) -> bool>,
}

impl Question {
    fn text(field: Field, message: &'static str, default: Option<&str>) -> Self {
        Question {
            field,
            message,
            default: Reply::Text(default.unwrap_or_default().to_owned()),
            validate: validate::for_field(field),
        }
    }

    fn confirm(field: Field, message: &'static str, default: bool) -> Self {
        Question {
            field,
            message,
            default: Reply::Flag(default),
            validate: None,
        }
    }

    /// A reply must be of the same kind as the default and pass the
    /// validator, if any.
    #[must_use]
    pub fn accepts(&self, reply: &Reply) -> bool {
        match (reply, self.validate) {
            _ if !reply.same_kind(&self.default) => false,
            (Reply::Text(text), Some(check)) => check(text),
            _ => true,
        }
    }
}

impl std::fmt::Debug for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Question")
            .field("field", &self.field)
            .field("message", &self.message)
            .field("default", &self.default)
            .field("validated", &self.validate.is_some())
            .finish()
    }
}

/// Source of answers for the questions of a [`PromptSequence`].
pub trait Prompter {
    /// Asks a single question. An empty reply to a text question that has a
    /// default gives back the default.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if no answer can be obtained at all.
    fn ask(&mut self, question: &Question) -> Result<Reply>;

    /// Called when a reply failed validation, right before asking again.
    fn rejected(&mut self, question: &Question) {
        crate::warn!(ScaffoldError::Validation(question.field));
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, question: &Question) -> Result<Reply> {
        (**self).ask(question)
    }

    fn rejected(&mut self, question: &Question) {
        (**self).rejected(question);
    }
}

/// The fixed list of questions asked on every run.
#[derive(Debug, Clone)]
pub struct PromptSequence {
    questions: Vec<Question>,
}

impl PromptSequence {
    /// Builds the questions, preferring a command line override over the
    /// stored answer for each default.
    ///
    /// The description is offered the package name's default, never a
    /// remembered description.
    #[must_use]
    pub fn new(overrides: &Overrides, store: &AnswerStore) -> Self {
        let text = |over: &Option<String>, field: Field| -> Option<String> {
            over.clone()
                .or_else(|| store.text(field).map(str::to_owned))
        };

        let package_name = text(&overrides.package_name, Field::PackageName);

        PromptSequence {
            questions: vec![
                Question::text(
                    Field::PackageName,
                    "Name of your project",
                    package_name.as_deref(),
                ),
                Question::text(
                    Field::PackageDesc,
                    "Description of your project",
                    package_name.as_deref(),
                ),
                Question::text(
                    Field::FullName,
                    "Your full name",
                    text(&overrides.full_name, Field::FullName).as_deref(),
                ),
                Question::text(
                    Field::PypiUserName,
                    "Your PyPi username",
                    text(&overrides.pypi_user_name, Field::PypiUserName).as_deref(),
                ),
                Question::text(
                    Field::GithubUserName,
                    "The github account name",
                    text(&overrides.github_user_name, Field::GithubUserName).as_deref(),
                ),
                Question::text(
                    Field::Email,
                    "Your e-mail address",
                    text(&overrides.email, Field::Email).as_deref(),
                ),
                Question::confirm(
                    Field::UseTravisCI,
                    "Use TravisCI or not",
                    overrides
                        .travis_ci()
                        .or_else(|| store.flag(Field::UseTravisCI))
                        .unwrap_or(false),
                ),
            ],
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, field: Field) -> Option<&Question> {
        self.questions.iter().find(|q| q.field == field)
    }

    /// Asks every question in order and collects the answers. A rejected
    /// reply only repeats its own question.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the prompter fails or replies with a flag to a
    /// text question (or text to a yes/no one).
    pub fn run(&self, prompter: &mut impl Prompter) -> Result<Answers> {
        let mut answers = Answers::default();

        for question in &self.questions {
            let reply = loop {
                let reply = prompter.ask(question)?;

                if !reply.same_kind(&question.default) {
                    return Err(ScaffoldError::Prompt(format!(
                        "expected {} answer for {}, got {reply:?}",
                        question.default.kind(),
                        question.field,
                    )));
                }

                if question.accepts(&reply) {
                    break reply;
                }

                prompter.rejected(question);
            };

            crate::trace!("{} = {reply:?}", question.field);

            match reply {
                Reply::Text(text) => answers.set_text(question.field, text),
                Reply::Flag(flag) => answers.use_travis_ci = flag,
            }
        }

        Ok(answers)
    }
}

/// Asks on the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &Question) -> Result<Reply> {
        match &question.default {
            Reply::Text(default) => {
                let mut text = inquire::Text::new(question.message);

                if !default.is_empty() {
                    text = text.with_default(default);
                }

                Ok(Reply::Text(text.prompt()?))
            }
            Reply::Flag(default) => Ok(Reply::Flag(
                inquire::Confirm::new(question.message)
                    .with_default(*default)
                    .prompt()?,
            )),
        }
    }
}

/// Replays canned replies. `None` stands for pressing enter on the default.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<Option<Reply>>,
    asked: Vec<Field>,
    rejected: Vec<Field>,
}

impl ScriptedPrompter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies to the seven questions in order.
    #[must_use]
    pub fn answering(answers: &Answers) -> Self {
        Field::ALL
            .iter()
            .fold(Self::new(), |prompter, &field| match answers.get(field) {
                tera::Value::Bool(flag) => prompter.flag(flag),
                value => prompter.input(value.as_str().unwrap_or_default()),
            })
    }

    #[must_use]
    pub fn input(mut self, text: &str) -> Self {
        self.replies.push_back(Some(Reply::Text(text.to_owned())));
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: bool) -> Self {
        self.replies.push_back(Some(Reply::Flag(flag)));
        self
    }

    #[must_use]
    pub fn accept_default(mut self) -> Self {
        self.replies.push_back(None);
        self
    }

    /// Fields in the order they were asked, repeats included.
    #[must_use]
    pub fn asked(&self) -> &[Field] {
        &self.asked
    }

    #[must_use]
    pub fn rejected_fields(&self) -> &[Field] {
        &self.rejected
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &Question) -> Result<Reply> {
        self.asked.push(question.field);

        let reply = self
            .replies
            .pop_front()
            .ok_or_else(|| ScaffoldError::Prompt(format!("no reply left for {}", question.field)))?;

        Ok(match (reply, &question.default) {
            (None, default) => default.clone(),
            (Some(Reply::Text(text)), Reply::Text(default)) if text.is_empty() => {
                Reply::Text(default.clone())
            }
            (Some(reply), _) => reply,
        })
    }

    fn rejected(&mut self, question: &Question) {
        self.rejected.push(question.field);
    }
}
