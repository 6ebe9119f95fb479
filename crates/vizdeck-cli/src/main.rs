use std::io::Read;

use vizdeck::{
    Config, RawConfig, UnknownKeyPolicy, config_to_query, preview_html, resolve_config,
};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Resolve,
    Query,
    Preview,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    version: Option<String>,
    query: Option<String>,
    reject_unknown: bool,
    keep_hidden: bool,
    title: Option<String>,
    style: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "vizdeck-cli\n\
\n\
USAGE:\n\
  vizdeck-cli [resolve] [--pretty] [--version <path>] [--query <string>] [--reject-unknown] [<default-path>|-]\n\
  vizdeck-cli query [--keep-hidden] [<config-path>|-]\n\
  vizdeck-cli preview [--title <title>] [--style <css-path>] [--out <path>] [<payload-path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - resolve layers the version file and query string over the default config\n\
    (query > version > default) and prints the effective config as JSON.\n\
  - query prints the embed query string for an already-resolved config;\n\
    hidden fields are omitted unless --keep-hidden is given.\n\
  - preview wraps a runGraphic payload in a standalone HTML page; it expects\n\
    bundle.js next to the page. Prints to stdout unless --out is given.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "resolve" => args.command = Command::Resolve,
            "query" => args.command = Command::Query,
            "preview" => args.command = Command::Preview,
            "--pretty" => args.pretty = true,
            "--reject-unknown" => args.reject_unknown = true,
            "--keep-hidden" => args.keep_hidden = true,
            "--version" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.version = Some(path.clone());
            }
            "--query" => {
                let Some(query) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.query = Some(query.clone());
            }
            "--title" => {
                let Some(title) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.title = Some(title.clone());
            }
            "--style" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.style = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                while it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl serde::Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Resolve => {
            let default: RawConfig = serde_json::from_str(&read_input(args.input.as_deref())?)?;
            let version: Option<RawConfig> = match &args.version {
                Some(path) => Some(serde_json::from_str(&std::fs::read_to_string(path)?)?),
                None => None,
            };
            let policy = if args.reject_unknown {
                UnknownKeyPolicy::Reject
            } else {
                UnknownKeyPolicy::Adopt
            };
            let resolved = resolve_config(
                &default,
                version.as_ref(),
                args.query.as_deref(),
                policy,
            );
            write_json(&resolved, args.pretty)?;
            Ok(())
        }
        Command::Query => {
            let config: Config = serde_json::from_str(&read_input(args.input.as_deref())?)?;
            println!("{}", config_to_query(&config, !args.keep_hidden));
            Ok(())
        }
        Command::Preview => {
            let payload: serde_json::Value =
                serde_json::from_str(&read_input(args.input.as_deref())?)?;
            let style = match &args.style {
                Some(path) => std::fs::read_to_string(path)?,
                None => String::new(),
            };
            let title = args.title.as_deref().unwrap_or("vizdeck preview");
            let html = preview_html(title, &style, &serde_json::to_string(&payload)?);
            write_text(&html, args.out.as_deref())?;
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
