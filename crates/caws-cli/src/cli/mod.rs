use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `caws` binary.
#[derive(Debug, Parser)]
#[command(name = "caws", version, about = "Connect to remote development workspaces")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["caws", "--format", "raw", "--verbose", "status"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["caws", "status", "--quiet"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["caws", "--format", "table", "status"]).is_err());
    }

    #[test]
    fn open_takes_workspace_and_names() {
        let cli = Cli::try_parse_from([
            "caws",
            "open",
            "ws-1",
            "--org",
            "acme",
            "--project",
            "rockets",
            "--target-path",
            "/projects/engine",
        ])
        .expect("cli should parse");

        let Commands::Open(args) = cli.command else {
            panic!("expected open");
        };
        assert_eq!(args.workspace.id, "ws-1");
        assert_eq!(args.workspace.org, "acme");
        assert_eq!(args.workspace.project, "rockets");
        assert_eq!(args.target_path.as_deref(), Some("/projects/engine"));
    }

    #[test]
    fn open_requires_org_and_project() {
        assert!(Cli::try_parse_from(["caws", "open", "ws-1"]).is_err());
    }

    #[test]
    fn clone_url_takes_three_positionals() {
        let cli = Cli::try_parse_from(["caws", "clone-url", "acme", "rockets", "engine"])
            .expect("cli should parse");
        let Commands::CloneUrl(args) = cli.command else {
            panic!("expected clone-url");
        };
        assert_eq!(args.repository, "engine");
    }

    #[test]
    fn create_takes_org_project_and_alias() {
        let cli = Cli::try_parse_from([
            "caws", "create", "--org", "acme", "--project", "rockets", "--alias", "scratch",
        ])
        .expect("cli should parse");
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.org, "acme");
        assert_eq!(args.project, "rockets");
        assert_eq!(args.alias.as_deref(), Some("scratch"));
        assert!(Cli::try_parse_from(["caws", "create", "--org", "acme"]).is_err());
    }
}
