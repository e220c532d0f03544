use criterion::{criterion_group, criterion_main, Criterion};

use camino::Utf8Path;
use personname_check::tokenize::tokenize;
use personname_check::{
    check_source, BaselineFormatter, CheckOptions, CollectReporter, FieldAssignment,
    FormattingParameters, LocaleTag, NameFormatter, PersonName,
};

const EN: &str = include_str!("../../tests/data/en.txt");

fn benchmarks(c: &mut Criterion) {
    macro_rules! bench {
        ($name:literal: $($tts:tt)*) => {
            c.bench_function($name, |b| b.iter(|| $($tts)*));
        };
    }

    let locale: LocaleTag = "en".parse().unwrap();
    let options = CheckOptions::default();
    let params = FormattingParameters::parse("n/a", "long", "referring", "formal").unwrap();
    let name = PersonName::builder(locale.clone())
        .add_field(FieldAssignment::parse("given", "Irene").unwrap())
        .add_field(FieldAssignment::parse("surname-core", "Adler").unwrap())
        .build();

    bench!("tokenize-en": EN.lines().map(|line| tokenize(line).len()).sum::<usize>());
    bench!("format-baseline": BaselineFormatter.format(&locale, &name, &params));
    bench!("check-en": check_source(
        Utf8Path::new("en.txt"),
        locale.clone(),
        EN,
        &BaselineFormatter,
        CollectReporter::new(),
        &options,
    ));
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
