//! Check a directory of person name fixtures.
//!
//! Runs every `<locale>.txt` fixture through the baseline formatter and prints
//! one `Error …` line per reported failure. Exits with status 1 if anything
//! was reported and with status 2 if the directory could not be listed.

use std::io;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use personname_check::{
    check_dir, BaselineFormatter, CheckOptions, ErrorPolicy, LocaleTag, WriteReporter,
};

/// Replay person name formatting fixtures.
#[derive(Parser, Debug)]
#[command(name = "check-person-names")]
#[command(version, about)]
struct Cli {
    /// Directory holding one `<locale>.txt` fixture file per locale.
    #[arg(env = "PERSON_NAME_TEST_DIR", default_value = "personNameTest")]
    dir: Utf8PathBuf,

    /// Only check the fixture files of these locales.
    #[arg(short, long = "locale", value_name = "TAG")]
    locales: Vec<LocaleTag>,

    /// Report every mismatch instead of the first per expected result.
    #[arg(long)]
    report_all: bool,

    /// Continue after a malformed line instead of abandoning the file.
    #[arg(long)]
    skip_bad_lines: bool,
}

impl Cli {
    fn options(&self) -> CheckOptions {
        CheckOptions {
            suppress_duplicates: !self.report_all,
            error_policy: if self.skip_bad_lines {
                ErrorPolicy::SkipLine
            } else {
                ErrorPolicy::AbortFile
            },
            locales: (!self.locales.is_empty()).then(|| self.locales.clone()),
            ..CheckOptions::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut reporter = WriteReporter::new(io::stdout().lock());

    match check_dir(&cli.dir, &BaselineFormatter, &mut reporter, &cli.options()) {
        Ok(summary) if summary.has_failures() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
