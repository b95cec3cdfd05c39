//! Git Branch Border - colors your editor window per git branch
//!
//! Every branch gets its own accent color, remembered across restarts. The
//! tool polls the workspace's checked-out branch and writes the matching
//! border colors into VS Code's workspace settings whenever it changes.

mod app;
mod apply;
mod assign;
mod color;
mod config;
mod git;
mod machine;
mod palette;
mod settings;
mod store;
mod stylesheet;
mod thick_border;
mod ui;
mod watcher;
mod workspace;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::machine::Trigger;
use crate::settings::{PRIMARY_COLORS, SettingsSink, VsCodeSettings};
use crate::watcher::Watcher;

/// Git Branch Border - per-branch window border colors for VS Code
#[derive(Parser, Debug)]
#[command(name = "gbb")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the workspace folder (defaults to current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Enable debug logging (writes to gbb-debug.log in TUI mode)
    #[arg(short, long)]
    debug: bool,

    /// Keep the border in sync without the TUI
    #[arg(short, long)]
    watch: bool,

    /// Assign a new random color to the current branch and exit
    #[arg(short, long)]
    randomize: bool,

    /// Print the current branch, its color and all remembered colors
    #[arg(long)]
    show: bool,

    /// Register the thick border stylesheet with the Custom CSS and JS Loader
    #[arg(long)]
    enable_thick_border: bool,

    /// Set the palette for this workspace (comma-separated hex colors)
    #[arg(long, value_delimiter = ',')]
    set_colors: Option<Vec<String>>,

    /// Set the poll interval in seconds
    #[arg(long)]
    set_poll_interval: Option<u64>,

    /// Print the current configuration
    #[arg(long)]
    show_config: bool,
}

impl Args {
    fn is_tui_mode(&self) -> bool {
        !self.watch
            && !self.randomize
            && !self.show
            && !self.enable_thick_border
            && self.set_colors.is_none()
            && self.set_poll_interval.is_none()
            && !self.show_config
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize color_eyre for better error reporting
    color_eyre::install()?;

    // Determine workspace path
    let workspace_path = match args.path.clone() {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let is_tui_mode = args.is_tui_mode();

    // Initialize tracing/logging
    // In TUI mode, only log to file if debug is enabled
    // Otherwise log to console
    if is_tui_mode {
        if args.debug {
            let log_file = std::fs::File::create(workspace_path.join("gbb-debug.log"))?;
            tracing_subscriber::registry()
                .with(EnvFilter::new("debug"))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(log_file),
                )
                .init();
        }
    } else {
        let filter = if args.debug {
            EnvFilter::new("debug")
        } else if args.watch {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        };
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }

    let config_dir = config::Config::dir()?;
    let config = config::Config::load(&config_dir)?;

    if args.show_config {
        return show_config(&config_dir, &config);
    }

    if args.set_poll_interval.is_some() {
        return update_config(&config_dir, config, &args);
    }

    if let Some(colors) = &args.set_colors {
        return set_colors(&workspace_path, &config, colors);
    }

    let mut watcher = Watcher::new(&workspace_path, config)?;

    if args.show {
        return show(&watcher);
    }

    if args.randomize {
        return randomize(&mut watcher);
    }

    if args.enable_thick_border {
        let notice = watcher.enable_thick_border();
        println!("{}", notice.message);
        if let Some(action) = notice.action {
            println!("Next: {}", action);
        }
        return Ok(());
    }

    if args.watch {
        return watcher.run_headless();
    }

    // Run the TUI application
    let terminal = ratatui::init();
    let result = app::App::new(watcher).run(terminal);
    ratatui::restore();
    result
}

/// Print the branch, its color and everything remembered
fn show(watcher: &Watcher) -> Result<()> {
    let branch = watcher.current_branch();
    let colors = watcher.branch_colors();
    let color = branch.as_ref().and_then(|b| colors.get(b));

    println!("Git Branch Border");
    println!("=================");
    println!();
    println!("Workspace: {}", watcher.root().display());
    println!("Branch: {}", branch.as_deref().unwrap_or("unknown"));
    println!("Color: {}", color.map(String::as_str).unwrap_or("unset"));
    println!();
    println!("State file: {}", watcher.state_path().display());
    println!("Stylesheet: {}", watcher.stylesheet_path().display());
    println!();
    println!("Palette:");
    for color in watcher.palette() {
        println!("  {}", color);
    }
    println!();
    println!("Remembered branches ({}):", colors.len());
    for (branch, color) in &colors {
        println!("  {} -> {}", branch, color);
    }

    Ok(())
}

/// Force a new color for the current branch
fn randomize(watcher: &mut Watcher) -> Result<()> {
    watcher.activate();
    let outcome = watcher.fire(Trigger::Randomize);

    if let Some(notice) = outcome.notice {
        return Err(eyre!(notice.message));
    }

    let state = watcher.state();
    println!(
        "{} -> {}",
        state.branch.as_deref().unwrap_or("unknown"),
        state.color.as_deref().unwrap_or("unset")
    );
    Ok(())
}

/// Write the palette override into the workspace settings
fn set_colors(workspace_path: &Path, config: &config::Config, colors: &[String]) -> Result<()> {
    let colors: Vec<String> = colors
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if let Some(invalid) = colors.iter().find(|c| !color::is_valid_hex(c)) {
        return Err(eyre!("'{}' is not a hex color like #1E88E5 or #abc", invalid));
    }

    let mut settings = VsCodeSettings::new(&config.settings_file, None);
    let value = Value::from(colors.clone());
    settings.update(workspace_path, PRIMARY_COLORS, value)?;

    println!("Palette set to: {}", colors.join(", "));
    Ok(())
}

/// Show the current configuration
fn show_config(config_dir: &Path, config: &config::Config) -> Result<()> {
    println!("Git Branch Border Configuration");
    println!("===============================");
    println!();
    println!("Config file: {}", config_dir.join(config::CONFIG_FILE_NAME).display());
    println!("Poll interval: {}s", config.poll_interval().as_secs());
    println!("Workspace settings file: {}", config.settings_file);
    println!("Manage .gitignore: {}", config.manage_gitignore);
    println!("State file: {}", config.state_path()?.display());
    println!("Stylesheet: {}", config.stylesheet_path()?.display());
    println!(
        "User settings: {}",
        config
            .user_settings_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unknown)".to_string())
    );
    println!(
        "Extensions: {}",
        config
            .extensions_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unknown)".to_string())
    );

    Ok(())
}

/// Update configuration from command line
fn update_config(config_dir: &Path, mut config: config::Config, args: &Args) -> Result<()> {
    if let Some(interval) = args.set_poll_interval {
        config.poll_interval_secs = interval;
        println!("Set poll interval: {}s", interval);
    }

    config.save(config_dir)?;
    println!(
        "Configuration saved to {}",
        config_dir.join(config::CONFIG_FILE_NAME).display()
    );

    Ok(())
}
