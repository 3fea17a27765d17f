use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pyskel::{
    template::{render_parametric, TemplateId},
    Answers,
};

pub fn render_templates(c: &mut Criterion) {
    let answers = Answers {
        package_name: "foo".into(),
        package_desc: "bar".into(),
        full_name: "A B".into(),
        pypi_user_name: "pypi".into(),
        github_user_name: "gh".into(),
        email: "a@b.com".into(),
        use_travis_ci: true,
    };

    c.bench_function("Render setup.py from answers", |b| {
        let vars = answers.context(TemplateId::SetupPy.fields());

        b.iter(|| render_parametric(black_box(TemplateId::SetupPy), black_box(&vars)))
    });

    c.bench_function("Render README.md with CI badge", |b| {
        let vars = answers.context(TemplateId::Readme.fields());

        b.iter(|| render_parametric(black_box(TemplateId::Readme), black_box(&vars)))
    });
}

criterion_group!(benches, render_templates);
criterion_main!(benches);
