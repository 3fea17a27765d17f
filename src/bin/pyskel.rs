use anyhow::{Context, Result};
use clap::Parser;
use pyskel::{
    args::Args, error, license::ExternalLicense, prompt::TerminalPrompter, trace, Generator,
};
use std::process::ExitCode;

fn app(args: &Args) -> Result<()> {
    let license = ExternalLicense::from_command(&args.license_command)?;

    let generator = Generator::builder()
        .destination(args.destination.clone())
        .overrides(args.overrides.clone())
        .skip_welcome_message(args.skip_welcome_message)
        .prompter(TerminalPrompter)
        .license(license)
        .build()
        .context("Failed to configure the generator")?;

    trace!("Destination: {}", generator.destination().display());

    generator.run()?;

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !args.no_errors() {
                error!("{e:#}",);
            }
            ExitCode::FAILURE
        }
    }
}
