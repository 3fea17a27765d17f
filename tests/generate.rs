use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use pyskel::{
    args::Overrides,
    license::Author,
    prompt::ScriptedPrompter,
    store::{AnswerStore, STORE_FILE},
    Answers, Field, Generator, ScaffoldError,
};
use walkdir::WalkDir;

fn answers(use_travis_ci: bool) -> Answers {
    Answers {
        package_name: "foo".into(),
        package_desc: "bar".into(),
        full_name: "A B".into(),
        pypi_user_name: "pypi-user".into(),
        github_user_name: "gh-user".into(),
        email: "a@b.com".into(),
        use_travis_ci,
    }
}

fn write_license(destination: &Path, author: &Author) -> pyskel::error::Result<()> {
    std::fs::write(
        destination.join("LICENSE"),
        format!("MIT License\n\nCopyright (c) {} <{}>\n", author.name, author.email),
    )
    .map_err(|e| ScaffoldError::io("failed to write", destination.join("LICENSE"), e))
}

fn generate(
    destination: &Path,
    prompter: &mut ScriptedPrompter,
    overrides: Overrides,
) -> pyskel::error::Result<Answers> {
    Generator::builder()
        .destination(destination)
        .overrides(overrides)
        .skip_welcome_message(true)
        .update_check(false)
        .prompter(prompter)
        .license(write_license)
        .build()
        .expect("all required fields set")
        .run()
}

/// Every file below `root`, keyed by its relative path.
fn tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            (
                e.path().strip_prefix(root).unwrap().to_owned(),
                std::fs::read(e.path()).unwrap(),
            )
        })
        .collect()
}

fn read(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn writes_the_full_layout() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::answering(&answers(true));

    generate(dir.path(), &mut prompter, Overrides::default()).unwrap();

    let files: BTreeSet<PathBuf> = tree(dir.path()).into_keys().collect();
    let expected: BTreeSet<PathBuf> = [
        ".editorconfig",
        ".flake8",
        ".gitignore",
        STORE_FILE,
        ".travis.yml",
        "LICENSE",
        "Makefile",
        "README.md",
        "foo/__init__.py",
        "foo/tests/__init__.py",
        "requirements.txt",
        "setup.py",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();

    assert_eq!(files, expected);
}

#[test]
fn answers_reach_store_and_files() {
    let dir = tempfile::tempdir().unwrap();
    let given = answers(true);
    let mut prompter = ScriptedPrompter::answering(&given);

    let collected = generate(dir.path(), &mut prompter, Overrides::default()).unwrap();
    assert_eq!(collected, given);

    let store = AnswerStore::open(dir.path()).unwrap();
    for field in Field::ALL {
        assert_eq!(store.get(field.key()), Some(&given.get(field)), "{field}");
    }
    assert_eq!(store.version(), Some(env!("CARGO_PKG_VERSION")));

    let setup = read(dir.path(), "setup.py");
    assert!(setup.contains("name='foo'"));
    assert!(setup.contains("description='bar'"));
    assert!(setup.contains("author='A B'"));
    assert!(setup.contains("author_email='a@b.com'"));
    assert!(!setup.contains("{{"));

    let readme = read(dir.path(), "README.md");
    assert!(readme.contains("gh-user/foo"));
    assert!(readme.contains("A B"));

    assert!(read(dir.path(), ".travis.yml").contains("pypi-user"));
    assert!(read(dir.path(), "LICENSE").contains("A B <a@b.com>"));
}

#[test]
fn package_initializers_are_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::answering(&answers(false));

    generate(dir.path(), &mut prompter, Overrides::default()).unwrap();

    for path in ["foo/__init__.py", "foo/tests/__init__.py"] {
        let metadata = std::fs::metadata(dir.path().join(path)).unwrap();
        assert!(metadata.is_file());
        assert_eq!(metadata.len(), 0, "{path}");
    }
}

#[test]
fn travis_config_follows_ci_answer() {
    let without = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::answering(&answers(false));
    generate(without.path(), &mut prompter, Overrides::default()).unwrap();

    assert!(!without.path().join(".travis.yml").exists());
    assert!(!read(without.path(), "README.md").contains("travis-ci.org"));

    let with = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::answering(&answers(true));
    generate(with.path(), &mut prompter, Overrides::default()).unwrap();

    assert!(read(with.path(), ".travis.yml").contains("user: pypi-user"));
    assert!(read(with.path(), "README.md").contains("travis-ci.org/gh-user/foo"));
}

#[test]
fn static_files_are_copied_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::answering(&answers(false));
    generate(dir.path(), &mut prompter, Overrides::default()).unwrap();

    assert_eq!(
        std::fs::read(dir.path().join("requirements.txt")).unwrap(),
        include_bytes!("../templates/static/requirements.txt")
    );
    assert_eq!(
        std::fs::read(dir.path().join("Makefile")).unwrap(),
        include_bytes!("../templates/static/Makefile")
    );
}

#[test]
fn rerun_offers_previous_answers() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::answering(&answers(true));
    generate(dir.path(), &mut prompter, Overrides::default()).unwrap();

    let mut prompter = ScriptedPrompter::new()
        .accept_default()
        .accept_default()
        .accept_default()
        .accept_default()
        .accept_default()
        .accept_default()
        .accept_default();
    let second = generate(dir.path(), &mut prompter, Overrides::default()).unwrap();

    assert_eq!(
        second,
        Answers {
            package_desc: "foo".into(),
            ..answers(true)
        }
    );
}

#[test]
fn overrides_replace_stored_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::answering(&answers(true));
    generate(dir.path(), &mut prompter, Overrides::default()).unwrap();

    let overrides = Overrides {
        email: Some("c@d.com".into()),
        use_travis_ci: Some(false),
        ..Overrides::default()
    };
    let mut prompter = ScriptedPrompter::new()
        .accept_default()
        .input("bar")
        .accept_default()
        .accept_default()
        .accept_default()
        .accept_default()
        .accept_default();
    let second = generate(dir.path(), &mut prompter, overrides).unwrap();

    assert_eq!(second.email, "c@d.com");
    assert!(!second.use_travis_ci);
    assert_eq!(
        AnswerStore::open(dir.path()).unwrap().text(Field::Email),
        Some("c@d.com")
    );
}

#[test]
fn identical_reruns_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();

    let mut prompter = ScriptedPrompter::answering(&answers(true));
    generate(dir.path(), &mut prompter, Overrides::default()).unwrap();
    let first = tree(dir.path());

    let mut prompter = ScriptedPrompter::answering(&answers(true));
    generate(dir.path(), &mut prompter, Overrides::default()).unwrap();
    let second = tree(dir.path());

    assert_eq!(first, second);

    let store = read(dir.path(), STORE_FILE);
    assert_eq!(store.matches("\"packageName\"").count(), 1);
    assert_eq!(store.matches("\"version\"").count(), 1);
}

#[test]
fn empty_answer_is_asked_again_alone() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::new()
        .input("foo")
        .input("bar")
        .input("A B")
        .input("pypi-user")
        .input("gh-user")
        .input("")
        .input("a@b.com")
        .flag(false);

    let collected = generate(dir.path(), &mut prompter, Overrides::default()).unwrap();

    assert_eq!(collected.email, "a@b.com");
    assert_eq!(prompter.rejected_fields(), [Field::Email]);
    assert_eq!(prompter.asked().len(), Field::ALL.len() + 1);
    assert_eq!(
        prompter.asked().iter().filter(|&&f| f == Field::Email).count(),
        2
    );
}

#[test]
fn license_failure_stops_before_writing_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::answering(&answers(true));

    let err = Generator::builder()
        .destination(dir.path())
        .skip_welcome_message(true)
        .update_check(false)
        .prompter(&mut prompter)
        .license(|_: &Path, _: &Author| -> pyskel::error::Result<()> {
            Err(ScaffoldError::Delegator("license generator exited with 1".into()))
        })
        .build()
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::Delegator(_)));
    assert!(!dir.path().join("setup.py").exists());

    let store = AnswerStore::open(dir.path()).unwrap();
    assert_eq!(store.text(Field::PackageName), Some("foo"));
    assert_eq!(store.version(), None);
}

#[test]
fn unanswered_prompt_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::new().input("foo");

    let err = generate(dir.path(), &mut prompter, Overrides::default()).unwrap_err();

    assert!(matches!(err, ScaffoldError::Prompt(_)));
    assert!(tree(dir.path()).is_empty());
}

#[test]
fn flag_for_package_name_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter::new()
        .flag(true)
        .input("bar")
        .input("A B")
        .input("pypi-user")
        .input("gh-user")
        .input("a@b.com")
        .flag(false);

    let err = generate(dir.path(), &mut prompter, Overrides::default()).unwrap_err();

    assert!(matches!(err, ScaffoldError::Prompt(_)));
    assert!(!dir.path().join("__init__.py").exists());
    assert!(tree(dir.path()).is_empty());
}

#[test]
fn missing_required_builder_field_is_reported() {
    type License = fn(&Path, &Author) -> pyskel::error::Result<()>;

    let built = Generator::<ScriptedPrompter, License>::builder()
        .prompter(ScriptedPrompter::new())
        .license(write_license)
        .build();

    assert!(built.is_err());
}
