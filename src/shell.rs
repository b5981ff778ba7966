//! The toolbox front end: pages selected by tool identity.

use std::ffi::OsString;

use clap::{Parser, Subcommand};

use crate::formatter::{self, FormatArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Home,
    Formatter,
}

/// Static description of a page.
#[derive(Debug, PartialEq, Eq)]
pub struct Page {
    pub tool: Tool,
    pub command: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub shows_menu: bool,
}

pub static PAGES: [Page; 2] = [
    Page {
        tool: Tool::Home,
        command: "home",
        title: "ThongKhongToolBox",
        summary: "List the available tools",
        shows_menu: false,
    },
    Page {
        tool: Tool::Formatter,
        command: "formatter",
        title: "Date and SSN formatter",
        summary: "Format date and SSN columns of an Excel workbook",
        shows_menu: true,
    },
];

impl Tool {
    pub fn page(self) -> &'static Page {
        &PAGES[self as usize]
    }
}

#[derive(Debug, Parser)]
#[command(name = "tktoolbox", version)]
#[command(about = "Small spreadsheet tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the available tools
    Home,
    /// Format date and SSN columns of an Excel workbook
    Formatter(FormatArgs),
}

impl Command {
    fn tool(&self) -> Tool {
        match self {
            Command::Home => Tool::Home,
            Command::Formatter(_) => Tool::Formatter,
        }
    }
}

/// Text of the Home page: title, then one menu line per tool.
pub fn home_page() -> String {
    let mut out = format!("{}\n", Tool::Home.page().title);
    for page in PAGES.iter().filter(|p| p.tool != Tool::Home) {
        out.push_str(&format!("  {:<12} {}\n", page.command, page.summary));
    }
    out
}

pub fn run(args: impl IntoIterator<Item = OsString>) -> anyhow::Result<()> {
    let cli = Cli::parse_from(args);
    let command = cli.command.unwrap_or(Command::Home);
    let page = command.tool().page();
    if page.shows_menu {
        eprintln!("== {} ==", page.title);
    }

    match command {
        Command::Home => print!("{}", home_page()),
        Command::Formatter(args) => {
            formatter::execute(&args)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn page_table_is_indexed_by_tool() {
        for tool in [Tool::Home, Tool::Formatter] {
            assert_eq!(tool.page().tool, tool);
        }
        assert_eq!(Tool::Formatter.page().title, "Date and SSN formatter");
        assert!(!Tool::Home.page().shows_menu);
    }

    #[test]
    fn home_lists_other_tools() {
        let text = home_page();
        assert!(text.starts_with("ThongKhongToolBox\n"));
        assert!(text.contains("formatter"));
        assert!(!text.contains("  home "));
    }

    #[test]
    fn subcommands_resolve_to_tools() {
        let cli = Cli::parse_from(["tktoolbox", "formatter", "in.xlsx", "--prefix", "x_"]);
        let command = cli.command.unwrap();
        assert_eq!(command.tool(), Tool::Formatter);
        let Command::Formatter(args) = command else {
            panic!("expected formatter");
        };
        assert_eq!(args.file, Some(PathBuf::from("in.xlsx")));
        assert_eq!(args.rules().output_prefix, "x_");

        let cli = Cli::parse_from(["tktoolbox"]);
        assert!(cli.command.is_none());
    }
}
