use anyhow::Result;
use buddyweek::commands::{
    assign_command, groups_command, validate_degenerate_policy, verify_command, AssignOptions,
};
use buddyweek_core::config::DegeneratePolicy;
use clap::{Parser, Subcommand};

/// Random partner assignment within groups.
///
/// This CLI is a thin wrapper around `buddyweek-core` (exposed in code as
/// `buddyweek_core`). All substantive logic lives in the library so it can be
/// tested thoroughly.
#[derive(Parser, Debug)]
#[command(
    name = "buddyweek",
    version,
    about = "Assign every group member a random partner from the same group",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw one random cycle per group and write the pair files.
    ///
    /// The input table needs the columns `class`, `name` and `email`, in that
    /// order. This will:
    /// - Recreate `<output>/buddyweek_output` (previous contents are removed).
    /// - Write `names/<class> assigned_names.txt` and
    ///   `addresses/<class> assigned_addresses.txt` per group.
    /// - Write `run.json` describing the run.
    Assign {
        /// Path to the input CSV. `.csv` is appended when missing.
        #[arg(short = 'i', long, alias = "filepath")]
        input: String,

        /// Directory in which the output folder is created.
        #[arg(short = 'o', long, alias = "outputfolder")]
        output: String,

        /// Optional run config (YAML or JSON).
        #[arg(long)]
        config: Option<String>,

        /// Seed the random generator for a reproducible draw.
        #[arg(long)]
        seed: Option<u64>,

        /// What to do with single-member groups: skip or abort.
        #[arg(long, value_parser = validate_degenerate_policy)]
        on_degenerate: Option<DegeneratePolicy>,

        /// Emit the run manifest as JSON instead of a human-readable summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show how the input table splits into groups.
    Groups {
        /// Path to the input CSV. `.csv` is appended when missing.
        #[arg(short = 'i', long, alias = "filepath")]
        input: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Check that previously written pair files each form a single cycle.
    Verify {
        /// Directory the output folder was created in.
        #[arg(short = 'o', long, alias = "outputfolder")]
        output: String,

        /// Run config used for the assignment, if any (for custom folder names).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    buddyweek::logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Assign { input, output, config, seed, on_degenerate, json } => {
            let options = AssignOptions { config, seed, on_degenerate, json };
            assign_command(&input, &output, &options)?;
        }
        Command::Groups { input, json } => {
            groups_command(&input, json)?;
        }
        Command::Verify { output, config, json } => {
            verify_command(&output, config.as_deref(), json)?;
        }
    }

    Ok(())
}
