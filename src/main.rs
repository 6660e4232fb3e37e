//! Roteiro - A terminal editor for narration scripts.
//!
//! # Usage
//!
//! ```bash
//! roteiro
//! roteiro --title "Capítulo 1"
//! roteiro --dump-on-exit > roteiro.json
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use roteiro::app::App;
use roteiro::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};

/// A terminal editor for narration scripts built from reorderable blocks
#[derive(Parser, Debug)]
#[command(name = "roteiro", version, about, long_about = None)]
struct Cli {
    /// Title shown above the blocks
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Write debug events and block structure dumps to a file
    /// (otherwise only warnings are logged, and dumps only show on screen)
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Print the final block structure as JSON on exit
    #[arg(long)]
    dump_on_exit: bool,

    /// Do not capture the mouse (keyboard reordering only)
    #[arg(long)]
    no_mouse: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    /// The persistable subset of the command line.
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            title: self.title.clone(),
            debug_log: self.debug_log.clone(),
            dump_on_exit: self.dump_on_exit,
            no_mouse: self.no_mouse,
        }
    }
}

fn init_logging(debug_log: Option<&Path>) -> Result<()> {
    // The terminal belongs to the UI, so stderr only sees warnings unless
    // RUST_LOG says otherwise. A debug log gets everything at DEBUG.
    if let Some(path) = debug_log {
        let file = File::create(path)
            .with_context(|| format!("Failed to create debug log {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.debug_log.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let app = App::new()
        .with_title(effective.title_or_default())
        .with_mouse(!effective.no_mouse);

    let blocks = app.run().context("Application error")?;

    if effective.dump_on_exit {
        let json = serde_json::to_string_pretty(&*blocks).context("Failed to serialize blocks")?;
        println!("{json}");
    }
    Ok(())
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
    fn test_help_says_where_structure_dumps_go() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("--debug-log"));
        assert!(help.contains("block structure dumps"));
    }

    #[test]
    fn test_cli_flags_keep_persistable_options() {
        let cli = Cli::parse_from(["roteiro", "--title", "Capítulo 2", "--no-mouse", "--save"]);
        let flags = cli.flags();
        assert_eq!(flags.title.as_deref(), Some("Capítulo 2"));
        assert!(flags.no_mouse);
        assert!(!flags.dump_on_exit);
        assert!(cli.save);
    }
}
