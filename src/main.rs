//! keytag - write musical keys into audio file tags.
//!
//! This tool reads and writes the tag metadata of audio files (title, artist,
//! album, comment, grouping, and the key field itself) and applies a
//! configurable strategy for where and how a musical key lands in those
//! fields: overwrite, or prepend/append with a delimiter, per field. The
//! container formats themselves are handled by lofty; keytag owns the policy
//! on top.

use clap::{CommandFactory, Parser, Subcommand, builder::PossibleValuesParser};
use clap_complete::{Generator, Shell, generate};
use std::error::Error;
use std::io;

use keytag::cli;
use keytag::cli::set::SetValues;
use keytag::key::Key;
use keytag::tagging::MergeMode;

#[derive(Parser)]
#[command(name = "keytag")]
#[command(about = "Read and write musical key metadata in audio file tags")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize keytag configuration
    Init,
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show tag fields of audio files (directories are scanned recursively)
    Read {
        /// Files or directories to read
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Write a musical key into the configured tag fields
    Write {
        /// The key to write (e.g. "Am", "F#", "Ebm")
        #[arg(short, long)]
        key: Key,
        /// Files or directories to tag
        #[arg(required = true)]
        paths: Vec<String>,
        /// Show what would be written without touching any file
        #[arg(long)]
        dry_run: bool,
        /// Don't ask for confirmation when tagging multiple files
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Write explicit field values into one file
    Set {
        /// The file to update
        file: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New artist
        #[arg(long)]
        artist: Option<String>,
        /// New album
        #[arg(long)]
        album: Option<String>,
        /// New comment
        #[arg(long)]
        comment: Option<String>,
        /// New grouping
        #[arg(long)]
        grouping: Option<String>,
        /// New key value (always replaces the old one)
        #[arg(long)]
        key: Option<String>,
        /// How new values combine with existing ones
        #[arg(long, default_value = "overwrite")]
        mode: MergeMode,
        /// Replace the comment outright even when --mode concatenates
        #[arg(long)]
        overwrite_comment: bool,
        /// Replace the grouping outright even when --mode concatenates
        #[arg(long)]
        overwrite_grouping: bool,
        /// Text inserted between old and new content when concatenating
        #[arg(long, default_value = " - ")]
        delimiter: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// View current configuration
    View,
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new([
            "what_to_write",
            "field_delimiter",
            "skip_tagged_files",
            "custom_code_silence",
            "write.title",
            "write.artist",
            "write.album",
            "write.comment",
            "write.grouping",
            "write.key",
        ]))]
        key: String,
        /// Configuration value
        value: String,
    },
    /// Edit configuration file in your editor
    Edit,
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

fn init_logging(verbose: bool) -> Result<(), Box<dyn Error>> {
    use simplelog::*;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Init => {
            cli::init::handle_init()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::View => {
                cli::config::handle_config_view()?;
            }
            ConfigAction::Set { key, value } => {
                cli::config::handle_config_set(&key, &value)?;
            }
            ConfigAction::Edit => {
                cli::config::handle_config_edit()?;
            }
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
        Commands::Read { paths } => {
            cli::read::handle_read(&paths)?;
        }
        Commands::Write {
            key,
            paths,
            dry_run,
            yes,
        } => {
            cli::write::handle_write(key, &paths, dry_run, yes)?;
        }
        Commands::Set {
            file,
            title,
            artist,
            album,
            comment,
            grouping,
            key,
            mode,
            overwrite_comment,
            overwrite_grouping,
            delimiter,
        } => {
            let values = SetValues {
                title,
                artist,
                album,
                comment,
                grouping,
                key,
            };
            cli::set::handle_set(
                &file,
                values,
                mode,
                overwrite_comment,
                overwrite_grouping,
                &delimiter,
            )?;
        }
    }

    Ok(())
}
