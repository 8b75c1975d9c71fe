use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `qaqc` binary.
#[derive(Debug, Parser)]
#[command(name = "qaqc", version, about = "QA/QC tracker for site-assessment projects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Page of a list result (one-based)
    #[arg(long, global = true)]
    pub page: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Color table output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Database file (overrides `[database] path`)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            page: self.page,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{ProcessCommands, ProjectCommands, QuestionCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "qaqc",
            "--format",
            "table",
            "--limit",
            "10",
            "--verbose",
            "project",
            "years",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Project {
                action: ProjectCommands::Years
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "qaqc", "process", "get", "prc-1", "--format", "raw", "--quiet",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Process {
                action: ProcessCommands::Get { .. }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["qaqc", "--format", "xml", "project", "years"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn question_add_accepts_fixed_value_operand() {
        let cli = Cli::try_parse_from([
            "qaqc",
            "question",
            "add",
            "--questionnaire",
            "qnr-1",
            "--document-1",
            "dty-1",
            "--property-1",
            "Depth",
            "--relation",
            ">",
            "--value",
            "10",
        ])
        .expect("cli should parse");

        let Commands::Question {
            action: QuestionCommands::Add(args),
        } = cli.command
        else {
            panic!("expected question add");
        };
        assert_eq!(args.operand.value.as_deref(), Some("10"));
        assert_eq!(args.operand.document_2, None);
    }

    #[test]
    fn question_add_rejects_both_operand_forms() {
        let parsed = Cli::try_parse_from([
            "qaqc",
            "question",
            "add",
            "--questionnaire",
            "qnr-1",
            "--document-1",
            "dty-1",
            "--property-1",
            "Depth",
            "--relation",
            "Equals",
            "--value",
            "10",
            "--document-2",
            "dty-2",
            "--property-2",
            "Depth",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from([
            "qaqc", "--db", ":memory:", "--page", "2", "project", "years",
        ])
        .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some(":memory:"));
        assert_eq!(flags.page, Some(2));
    }
}
