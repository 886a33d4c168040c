//! mdxui CLI: render an MDX document with widgets to HTML.
//!
//! Reads stdin when FILE is omitted or `-`. Widget diagnostics are logged
//! to stderr (`RUST_LOG=warn`, the default level).

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mdxui::{Fallback, Options, Theme};

#[derive(Debug, Parser)]
#[command(name = "mdxui")]
#[command(about = "Render MDX widgets (accordions, alerts, tabs, ...) to HTML", long_about = None)]
struct Cli {
    /// MDX file to render; `-` or nothing reads stdin
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Wrap the output in a themed root: light, dark or system
    #[arg(long, value_name = "THEME")]
    theme: Option<Theme>,

    /// Treat a popover without a `---` as invalid
    #[arg(long)]
    strict_popover: bool,

    /// Split a leading `---`/`+++` block off as front matter
    #[arg(long)]
    front_matter: bool,
}

impl Cli {
    fn options(&self) -> Options {
        let mut options = Options {
            theme: self.theme,
            front_matter: self.front_matter,
            ..Options::default()
        };
        if self.strict_popover {
            options.popover_fallback = Fallback::Reject;
        }
        options
    }

    fn read_input(&self) -> io::Result<String> {
        match &self.path {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
            _ => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

fn run(cli: &Cli) -> io::Result<()> {
    let input = cli.read_input()?;

    let output = mdxui::mdx::render_with_options(&input, &cli.options());
    if !output.diagnostics.is_empty() {
        log::warn!("{} widget(s) rendered as placeholders", output.diagnostics.len());
    }
    io::stdout().write_all(output.body.as_bytes())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Usage errors exit with status 2 from here.
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mdxui: {err}");
            ExitCode::FAILURE
        }
    }
}
