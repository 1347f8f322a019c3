use crate::app::{App, OperationReport};
use crate::error::SaveError;
use crate::services::{RenameResult, SnapshotService};
use crate::utils::{format_path_for_display, get_config_dir};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Snapshot, restore and manage save folders
#[derive(Parser, Debug)]
#[command(name = "savekeep", version, about = "Snapshot, restore and manage save folders", long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    /// Use this config directory instead of the default
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saves in the destination folder (default)
    List {
        /// Show modification times
        #[arg(short, long)]
        verbose: bool,
    },
    /// Import the origin files into a new save
    Import,
    /// Copy a save's files back into the origin folder
    Load {
        /// Save to load
        name: String,
    },
    /// Overwrite a save with the current origin files
    Replace {
        /// Save to replace
        name: String,
    },
    /// Delete a save
    Delete {
        /// Save to delete
        name: String,
    },
    /// Rename a save
    Rename {
        /// Save to rename
        name: String,
        /// New name
        new_name: String,
    },
    /// Manage profiles
    #[command(subcommand)]
    Profile(ProfileCommands),
    /// Change the current profile's folders and file list
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List profiles
    List,
    /// Show the current profile's settings
    Show,
    /// Create a new empty profile and switch to it
    New,
    /// Rename the current profile
    Rename {
        /// New name
        new_name: String,
    },
    /// Delete the current profile
    Delete,
    /// Switch to another profile (created if missing)
    Switch {
        /// Profile name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set the origin folder (clears the file list if it changes)
    Origin { path: PathBuf },
    /// Set the destination folder
    Destination { path: PathBuf },
    /// Set the files copied into each save
    Files {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Clear the file list
    ClearFiles,
    /// List files available in the origin folder
    AvailableFiles,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let config_dir = self.config_dir.unwrap_or_else(get_config_dir);
        let mut app = App::open(&config_dir)
            .with_context(|| format!("Failed to open config directory {:?}", config_dir))?;

        let command = self.command.unwrap_or(Commands::List { verbose: false });
        match run(&mut app, command) {
            Ok(()) => Ok(()),
            Err(e) if e.is_notice() => {
                println!("ℹ️  {}", e);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn run(app: &mut App, command: Commands) -> Result<(), SaveError> {
    match command {
        Commands::List { verbose } => cmd_list(app, verbose),
        Commands::Import => {
            let report = app.import_snapshot()?;
            print_report(app, &report);
            Ok(())
        }
        Commands::Load { name } => {
            app.select_snapshot(&name)?;
            let report = app.load_snapshot()?;
            print_report(app, &report);
            Ok(())
        }
        Commands::Replace { name } => {
            app.select_snapshot(&name)?;
            let report = app.replace_snapshot()?;
            print_report(app, &report);
            Ok(())
        }
        Commands::Delete { name } => {
            app.select_snapshot(&name)?;
            app.delete_snapshot()?;
            print_status(app);
            Ok(())
        }
        Commands::Rename { name, new_name } => {
            app.select_snapshot(&name)?;
            match app.rename_snapshot(&new_name)? {
                RenameResult::Renamed => print_status(app),
                RenameResult::Unchanged => println!("ℹ️  Name unchanged"),
            }
            Ok(())
        }
        Commands::Profile(cmd) => cmd_profile(app, cmd),
        Commands::Config(cmd) => cmd_config(app, cmd),
    }
}

fn print_status(app: &App) {
    if let Some(toast) = app.toasts().current() {
        println!("{}", toast.display_text());
    }
}

fn print_report(app: &App, report: &OperationReport) {
    print_status(app);
    for file in &report.copy.copied {
        println!("  ✓ {}", file);
    }
    for file in &report.copy.missing {
        println!("  ✗ {} (not found)", file);
    }
    if report.copy.copied.is_empty() && report.copy.missing.is_empty() {
        println!("💡 No files configured. Run 'savekeep config files <names…>'");
    }
}

fn cmd_list(app: &App, verbose: bool) -> Result<(), SaveError> {
    let destination = &app.profile().destination_path;
    if destination.as_os_str().is_empty() {
        println!("No destination folder set. Run 'savekeep config destination <path>'");
        return Ok(());
    }

    let saves = SnapshotService::list_snapshot_details(destination)?;
    if saves.is_empty() {
        println!("No saves in {}", format_path_for_display(destination));
        return Ok(());
    }

    println!(
        "Saves in {} ({}):",
        format_path_for_display(destination),
        saves.len()
    );
    let selected = app.selected_name();
    for save in &saves {
        let marker = if selected == Some(save.name.as_str()) { "▶" } else { " " };
        match (verbose, save.modified) {
            (true, Some(modified)) => println!(
                "{} {}  {}",
                marker,
                save.name,
                modified.format("%Y-%m-%d %H:%M:%S")
            ),
            _ => println!("{} {}", marker, save.name),
        }
    }
    Ok(())
}

fn cmd_profile(app: &mut App, cmd: ProfileCommands) -> Result<(), SaveError> {
    match cmd {
        ProfileCommands::List => {
            let current = app.current_profile().to_string();
            for name in app.list_profiles()? {
                let marker = if name == current { "▶" } else { " " };
                println!("{} {}", marker, name);
            }
        }
        ProfileCommands::Show => {
            let profile = app.profile();
            println!("Profile: {}", app.current_profile());
            println!("Origin Folder: {}", format_path_for_display(&profile.origin_path));
            println!(
                "Destination Folder: {}",
                format_path_for_display(&profile.destination_path)
            );
            println!("Files to Copy:");
            for file in &profile.files_to_copy {
                println!("  {}", file);
            }
        }
        ProfileCommands::New => {
            let name = app.new_profile()?;
            println!("✅ Created profile '{}'", name);
        }
        ProfileCommands::Rename { new_name } => {
            let name = app.rename_profile(&new_name)?;
            println!("✅ Current profile is now named '{}'", name);
        }
        ProfileCommands::Delete => {
            let old = app.current_profile().to_string();
            let now = app.delete_profile()?;
            println!("✅ Deleted profile '{}', switched to '{}'", old, now);
        }
        ProfileCommands::Switch { name } => {
            app.switch_profile(&name)?;
            println!("✅ Switched to profile '{}'", app.current_profile());
            print_status(app);
        }
    }
    Ok(())
}

fn cmd_config(app: &mut App, cmd: ConfigCommands) -> Result<(), SaveError> {
    match cmd {
        ConfigCommands::Origin { path } => {
            let path = absolute(path)?;
            if app.set_origin_path(path)? {
                println!("ℹ️  Origin changed, file list cleared");
            }
            println!(
                "✅ Origin Folder: {}",
                format_path_for_display(&app.profile().origin_path)
            );
        }
        ConfigCommands::Destination { path } => {
            let path = absolute(path)?;
            app.set_destination_path(path)?;
            println!(
                "✅ Destination Folder: {} ({} saves)",
                format_path_for_display(&app.profile().destination_path),
                app.snapshots().len()
            );
        }
        ConfigCommands::Files { files } => {
            app.set_files_to_copy(files)?;
            println!("✅ Files to Copy: {}", app.profile().files_to_copy.join(", "));
        }
        ConfigCommands::ClearFiles => {
            app.clear_files_to_copy()?;
            println!("✅ File list cleared");
        }
        ConfigCommands::AvailableFiles => {
            for file in app.origin_files()? {
                let marker = if app.profile().has_file(&file) { "[x]" } else { "[ ]" };
                println!("{} {}", marker, file);
            }
        }
    }
    Ok(())
}

fn absolute(path: PathBuf) -> Result<PathBuf, SaveError> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir()
        .map_err(|e| SaveError::io("Failed to get current directory", e))?;
    Ok(cwd.join(path))
}
