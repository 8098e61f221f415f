//! textdown - Textile to Markdown converter

use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::process::ExitCode;

use clap::Parser;

use textdown::{FormatTag, convert, detect};

#[derive(Parser)]
#[command(name = "textdown")]
#[command(version, about = "Textile to Markdown converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    textdown notes.textile notes.md    Convert a file
    textdown notes.textile             Convert to stdout
    textdown -d notes.textile          Detect the format
    cat blob | textdown -              Convert stdin")]
struct Cli {
    /// Input file, or - for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (stdout if omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    /// Detect the format without converting
    #[arg(short, long)]
    detect: bool,

    /// Emit a JSON report instead of plain text
    #[arg(long)]
    json: bool,

    /// Suppress status messages
    #[arg(short, long)]
    quiet: bool,
}

#[derive(serde::Serialize)]
struct Report<'a> {
    format: FormatTag,
    signatures: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markdown: Option<Cow<'a, str>>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let text = read_input(&cli.input)?;
    let format = FormatTag::detect(&text);

    if cli.json {
        let report = Report {
            format,
            signatures: detect::matching_signatures(&text),
            markdown: if cli.detect {
                None
            } else {
                Some(Cow::Owned(convert(&text)))
            },
        };
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        write_output(cli, &json)?;
        return Ok(());
    }

    if cli.detect {
        println!("{format}");
        return Ok(());
    }

    write_output(cli, &convert(&text))
}

fn read_input(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("stdin: {e}"))?;
        Ok(text)
    } else {
        fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))
    }
}

fn write_output(cli: &Cli, content: &str) -> Result<(), String> {
    match &cli.output {
        Some(path) => {
            fs::write(path, content).map_err(|e| format!("{path}: {e}"))?;
            if !cli.quiet {
                println!("wrote {path}");
            }
            Ok(())
        }
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
