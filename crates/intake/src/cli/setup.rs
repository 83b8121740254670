use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "intake",
    bin_name = "intake",
    version,
    about = "Guided assessment intake: fill in the steps, submit, export",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this directory for the draft, ledger, config and exports
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current step, its fields and any validation messages
    #[command(alias = "st", display_order = 1)]
    Status,

    /// Set one answer, e.g. `intake set contact.email me@example.com`
    #[command(display_order = 2)]
    Set {
        /// Field path, e.g. basics.education or work.0.title
        path: String,

        /// New value; quote it if it has spaces, omit to clear
        value: Option<String>,
    },

    /// Validate the current step and move to the next
    #[command(alias = "n", display_order = 3)]
    Next,

    /// Move to the previous step
    #[command(alias = "b", display_order = 4)]
    Back,

    /// Submit from the Review step
    #[command(display_order = 5)]
    Submit {
        /// Identifier recorded as the submitter
        #[arg(long, short)]
        user: Option<String>,
    },

    /// List every field path with its value and allowed choices
    #[command(display_order = 6)]
    Fields,

    /// Export the whole ledger as a spreadsheet
    #[command(display_order = 10)]
    Export,

    /// Inspect or clear submitted records
    #[command(display_order = 11)]
    Ledger {
        #[command(subcommand)]
        action: LedgerCommands,
    },

    /// Show the effective configuration
    #[command(display_order = 20)]
    Config,
}

#[derive(Subcommand, Debug)]
pub enum LedgerCommands {
    /// List submitted records in submission order
    #[command(alias = "ls")]
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove every submitted record
    Clear {
        /// Required: confirms the removal
        #[arg(long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_set_takes_one_value() {
        let cli = Cli::parse_from(["intake", "set", "interest.notes", "likes the coast"]);
        match cli.command {
            Some(Commands::Set { path, value }) => {
                assert_eq!(path, "interest.notes");
                assert_eq!(value.as_deref(), Some("likes the coast"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(Cli::try_parse_from(["intake", "set", "interest.notes", "likes", "coast"]).is_err());
    }

    #[test]
    fn test_set_without_value_clears() {
        let cli = Cli::parse_from(["intake", "set", "contact.phone"]);
        match cli.command {
            Some(Commands::Set { value, .. }) => assert_eq!(value, None),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_set_value() {
        let cli = Cli::parse_from([
            "intake",
            "set",
            "contact.firstName",
            "Ada",
            "--data-dir",
            "/tmp/x",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::Set { path, value }) => {
                assert_eq!(path, "contact.firstName");
                assert_eq!(value.as_deref(), Some("Ada"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["intake", "next", "--data-dir", "/tmp/x", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_naked_invocation_has_no_command() {
        let cli = Cli::parse_from(["intake"]);
        assert!(cli.command.is_none());
    }
}
