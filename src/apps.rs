use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, error::ErrorKind};
use tracing_subscriber::EnvFilter;

use crate::config::AnalysisConfig;
use crate::constants::loader::DEFAULT_INPUT_FILE;
use crate::pipeline::{
    run_all, run_funnel_analysis, run_statistical_validation, run_supplementary_analysis,
    run_thesis_report,
};
use crate::source::CsvFileSource;

/// Flags shared by every binary.
#[derive(Debug, Clone, Args)]
struct CommonArgs {
    #[arg(
        long,
        value_name = "PATH",
        default_value = DEFAULT_INPUT_FILE,
        help = "Survey CSV export to analyze"
    )]
    input: PathBuf,
    #[arg(
        long = "output-root",
        value_name = "DIR",
        default_value = ".",
        help = "Directory receiving reports and chart directories"
    )]
    output_root: PathBuf,
    #[arg(
        long,
        help = "Stage, commit and push validation and supplementary outputs with git"
    )]
    sync: bool,
    #[arg(
        long = "summary-json",
        value_name = "PATH",
        help = "Write the computed statistics as JSON to this path"
    )]
    summary_json: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Raise log verbosity (-v debug, -vv trace)")]
    verbose: u8,
}

impl CommonArgs {
    fn config(&self) -> AnalysisConfig {
        let config = AnalysisConfig::default()
            .with_input(&self.input)
            .with_output_root(&self.output_root)
            .with_sync(self.sync);
        match &self.summary_json {
            Some(path) => config.with_summary_json(path),
            None => config,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "sicas",
    disable_help_subcommand = true,
    about = "SICAS survey funnel analysis",
    long_about = "Analyze a survey export through the Sense-Interest-Communication-Action-Share funnel and write Markdown reports with SVG charts."
)]
struct SicasCli {
    #[command(subcommand)]
    command: PipelineCommand,
}

#[derive(Debug, Subcommand)]
enum PipelineCommand {
    /// Per-stage frequency tables, demographics and funnel chart.
    Analysis(CommonArgs),
    /// Cronbach's alpha, dimension correlations and factor analysis.
    Validate(CommonArgs),
    /// Thesis-ready report with key findings and figure gallery.
    Thesis(CommonArgs),
    /// Channels, impressions, understanding and cross-tabs outside the funnel.
    Supplementary(CommonArgs),
    /// Every pipeline in order.
    All(CommonArgs),
}

#[derive(Debug, Parser)]
#[command(
    name = "sicas-analysis",
    about = "SICAS funnel frequency analysis",
    long_about = "Write sicas_analysis_report.md and plots/ from the survey export."
)]
struct FunnelCli {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Parser)]
#[command(
    name = "statistical-validation",
    about = "Statistical validation of the SICAS model",
    long_about = "Write statistical_validation_report.md and validation_plots/ from the survey export."
)]
struct ValidationCli {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Parser)]
#[command(
    name = "thesis-report",
    about = "Thesis-ready SICAS report",
    long_about = "Write thesis_report.md and thesis_plots/ from the survey export."
)]
struct ThesisCli {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Parser)]
#[command(
    name = "supplementary-analysis",
    about = "Supplementary analysis of non-funnel questions",
    long_about = "Write additional_analysis_report.md and additional_plots/ from the survey export."
)]
struct SupplementaryCli {
    #[command(flatten)]
    common: CommonArgs,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[derive(Debug, Clone, Copy)]
enum Pipeline {
    Funnel,
    Validation,
    Thesis,
    Supplementary,
    All,
}

fn execute(pipeline: Pipeline, args: &CommonArgs) -> Result<(), Box<dyn Error>> {
    init_tracing(args.verbose);
    let config = args.config();
    let source = CsvFileSource::new(&config.input);
    let report = match pipeline {
        Pipeline::Funnel => run_funnel_analysis(&source, &config)?.artifacts.report,
        Pipeline::Validation => run_statistical_validation(&source, &config)?.artifacts.report,
        Pipeline::Thesis => run_thesis_report(&source, &config)?.artifacts.report,
        Pipeline::Supplementary => run_supplementary_analysis(&source, &config)?.artifacts.report,
        Pipeline::All => {
            let outcomes = run_all(&source, &config)?;
            for report in [
                &outcomes.funnel.artifacts.report,
                &outcomes.validation.artifacts.report,
                &outcomes.thesis.artifacts.report,
            ] {
                println!("Report written to {}", report.display());
            }
            outcomes.supplementary.artifacts.report
        }
    };
    println!("Report written to {}", report.display());
    Ok(())
}

/// Run the `sicas` multiplexer with arguments after the program name.
pub fn run_sicas<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<SicasCli, _>(std::iter::once("sicas".to_string()).chain(args_iter))? else {
        return Ok(());
    };
    match &cli.command {
        PipelineCommand::Analysis(args) => execute(Pipeline::Funnel, args),
        PipelineCommand::Validate(args) => execute(Pipeline::Validation, args),
        PipelineCommand::Thesis(args) => execute(Pipeline::Thesis, args),
        PipelineCommand::Supplementary(args) => execute(Pipeline::Supplementary, args),
        PipelineCommand::All(args) => execute(Pipeline::All, args),
    }
}

/// Run the funnel analysis binary.
pub fn run_funnel<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) =
        parse_cli::<FunnelCli, _>(std::iter::once("sicas-analysis".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };
    execute(Pipeline::Funnel, &cli.common)
}

/// Run the statistical validation binary.
pub fn run_validation<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<ValidationCli, _>(
        std::iter::once("statistical-validation".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };
    execute(Pipeline::Validation, &cli.common)
}

/// Run the thesis report binary.
pub fn run_thesis<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) =
        parse_cli::<ThesisCli, _>(std::iter::once("thesis-report".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };
    execute(Pipeline::Thesis, &cli.common)
}

/// Run the supplementary analysis binary.
pub fn run_supplementary<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<SupplementaryCli, _>(
        std::iter::once("supplementary-analysis".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };
    execute(Pipeline::Supplementary, &cli.common)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_need_no_arguments() {
        let cli = parse_cli::<FunnelCli, _>(["sicas-analysis"]).unwrap().unwrap();
        let config = cli.common.config();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn multiplexer_parses_shared_flags() {
        let cli = parse_cli::<SicasCli, _>([
            "sicas",
            "validate",
            "--input",
            "survey.csv",
            "--output-root",
            "out",
            "--sync",
            "--summary-json",
            "out/summary.json",
            "-vv",
        ])
        .unwrap()
        .unwrap();
        let PipelineCommand::Validate(args) = cli.command else {
            panic!("expected validate subcommand");
        };
        assert_eq!(args.verbose, 2);
        let config = args.config();
        assert_eq!(config.input, PathBuf::from("survey.csv"));
        assert_eq!(config.output_root, PathBuf::from("out"));
        assert!(config.sync);
        assert_eq!(config.summary_json, Some(PathBuf::from("out/summary.json")));
    }

    #[test]
    fn help_is_not_an_error() {
        assert!(parse_cli::<ThesisCli, _>(["thesis-report", "--help"]).unwrap().is_none());
    }

    #[test]
    fn unknown_flags_are_errors() {
        assert!(parse_cli::<SupplementaryCli, _>(["supplementary-analysis", "--bogus"]).is_err());
    }

    #[test]
    fn missing_input_fails_with_unreadable_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let result = run_funnel(
            [
                "--input".to_string(),
                missing.display().to_string(),
                "--output-root".to_string(),
                dir.path().display().to_string(),
            ]
            .into_iter(),
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unreadable"));
    }
}
