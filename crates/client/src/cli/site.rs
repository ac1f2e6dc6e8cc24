//! Public site preview commands.

use std::path::PathBuf;

use caseco_core::content::SiteContent;
use caseco_core::site::{DownloadsPage, HomePage};
use caseco_core::ui::TopNav;
use clap::{Parser, Subcommand};

use super::OutputFormat;
use crate::error::Result;
use crate::output::{json, pretty};

/// Site preview commands.
#[derive(Debug, Parser)]
pub struct SiteCommand {
    /// Content file to preview instead of the built-in content.
    #[arg(long, env = "CASECO_CONTENT")]
    pub content: Option<PathBuf>,

    #[command(subcommand)]
    pub action: SiteAction,
}

/// Available site previews.
#[derive(Debug, Subcommand)]
pub enum SiteAction {
    /// Top and side navigation.
    Nav,
    /// Home page manufacturer carousels.
    Home {
        /// Viewport width in pixels.
        #[arg(long, default_value_t = 1280)]
        width: u32,
    },
    /// Downloads page.
    Downloads,
}

pub fn run(command: SiteCommand, format: OutputFormat) -> Result<()> {
    let content = match &command.content {
        Some(path) => SiteContent::load(path)?,
        None => SiteContent::builtin()?,
    };

    match (command.action, format) {
        (SiteAction::Nav, OutputFormat::Json) => {
            println!(
                "{}",
                json::format_json_pretty(&serde_json::json!({
                    "topNav": content.top_nav,
                    "sideNav": content.side_nav,
                }))
            );
        }
        (SiteAction::Nav, OutputFormat::Pretty) => {
            println!("{}", pretty::format_top_nav(&TopNav::new(&content.top_nav)));
            println!();
            println!("{}", pretty::format_side_nav(&content.side_nav));
        }
        (SiteAction::Home { width }, _) => {
            println!("{}", pretty::format_home(&HomePage::new(&content, width)));
        }
        (SiteAction::Downloads, OutputFormat::Json) => {
            println!("{}", json::format_json_pretty(&content.downloads));
        }
        (SiteAction::Downloads, OutputFormat::Pretty) => {
            println!("{}", pretty::format_downloads(&DownloadsPage::new(&content)));
        }
    }
    Ok(())
}
