mod ed;
mod visual;

use anyhow::Result;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use gapedit_config::Config;
use gapedit_logger::LogLevel;

use crate::ed::EdSession;

const USAGE: &str = "usage: gapedit [-v] [FILE]";

/// Parsed command line
#[derive(Debug, PartialEq, Eq)]
struct Args {
    /// Full-screen modal editor instead of the line interpreter
    visual: bool,
    path: Option<PathBuf>,
}

impl Args {
    fn parse<I: IntoIterator<Item = OsString>>(args: I) -> Option<Self> {
        let mut parsed = Args {
            visual: false,
            path: None,
        };
        for arg in args {
            if arg == "-v" {
                parsed.visual = true;
            } else if parsed.path.is_none() {
                parsed.path = Some(PathBuf::from(arg));
            } else {
                return None;
            }
        }
        Some(parsed)
    }
}

fn main() -> Result<()> {
    let Some(args) = Args::parse(std::env::args_os().skip(1)) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let config = Config::load().unwrap_or_default();

    // stdout belongs to the editor, so logs only go to a file
    let log_path = config
        .logging
        .file_path
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| Config::default_log_path().ok());
    let min_level = config
        .logging
        .min_level
        .parse()
        .unwrap_or(LogLevel::Info);
    gapedit_logger::init(log_path, config.logging.max_entries, min_level);

    log::info!("Starting gapedit with {:?}", args);

    if args.visual {
        let result = visual::run(
            args.path.as_deref(),
            config.editor.initial_capacity,
            config.editor.undo_depth,
        );

        // Warnings raised while the screen was taken over
        for entry in gapedit_logger::entries() {
            if entry.level >= LogLevel::Warn {
                eprintln!("{}", entry.format_line());
            }
        }

        if let Err(err) = result {
            eprintln!("Error: {:?}", err);
        }
    } else {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut session = EdSession::open(
            args.path.as_deref(),
            config.editor.initial_capacity,
            config.editor.undo_depth,
            stdout.lock(),
        )?;
        session.run(stdin.lock())?;
    }

    log::info!("Exiting gapedit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Args> {
        Args::parse(args.iter().map(OsString::from))
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(
            parse(&[]),
            Some(Args {
                visual: false,
                path: None
            })
        );
        assert_eq!(
            parse(&["-v", "notes.txt"]),
            Some(Args {
                visual: true,
                path: Some(PathBuf::from("notes.txt"))
            })
        );
        assert_eq!(
            parse(&["notes.txt", "-v"]),
            Some(Args {
                visual: true,
                path: Some(PathBuf::from("notes.txt"))
            })
        );
        assert_eq!(parse(&["a.txt", "b.txt"]), None);
    }
}
