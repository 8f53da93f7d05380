use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use passbook_core::{Direction, StatementTransaction};
use passbook_ingest::{detect_bank, parser_for, StatementParser, SUPPORTED_BANKS};

#[derive(Parser, Debug)]
#[command(
    name = "passbook",
    version,
    about = "Reconstruct transactions from extracted bank-statement text"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse extracted statement text into normalized transactions
    Parse {
        /// Path to the extracted statement text (e.g. pdftotext output)
        file: PathBuf,

        /// Bank code (default: detected from the document, else GENERIC)
        #[arg(long)]
        bank: Option<String>,

        /// Opening balance in minor units, when the preamble lacks one
        #[arg(long)]
        opening_balance: Option<i64>,

        /// Output format on stdout
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Detect which supported bank a statement belongs to
    Detect {
        /// Path to the extracted statement text
        file: PathBuf,
    },

    /// List supported bank codes
    Banks,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse {
            file,
            bank,
            opening_balance,
            format,
        } => parse_statement(&file, bank, opening_balance, format),

        Command::Detect { file } => {
            let text = read_statement(&file)?;
            match detect_bank(&text) {
                Some(code) => {
                    println!("{code}");
                    Ok(())
                }
                None => bail!("no supported bank fingerprint found in {}", file.display()),
            }
        }

        Command::Banks => {
            for code in SUPPORTED_BANKS {
                println!("{code}");
            }
            Ok(())
        }
    }
}

fn parse_statement(
    file: &Path,
    bank: Option<String>,
    opening_balance: Option<i64>,
    format: Format,
) -> Result<()> {
    let text = read_statement(file)?;

    let code = bank
        .or_else(|| detect_bank(&text).map(str::to_string))
        .unwrap_or_else(|| "GENERIC".to_string());
    let Some(parser) = parser_for(&code) else {
        bail!(
            "unsupported bank code: {code} (supported: {})",
            SUPPORTED_BANKS.join(", ")
        );
    };

    let opening = opening_balance.or_else(|| parser.extract_opening_balance(&text));
    let txns = run_parser(parser.as_ref(), &text, opening)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&txns)?),
        Format::Csv => write_csv(&txns)?,
    }

    let debits = txns
        .iter()
        .filter(|t| t.direction == Direction::Debit)
        .count();
    eprintln!(
        "Parsed {} transactions ({} debits / {} credits) from {} as {}",
        txns.len(),
        debits,
        txns.len() - debits,
        file.display(),
        parser.bank_code(),
    );
    Ok(())
}

/// Feed the parser whole-document or page-by-page, as it asks.
///
/// pdftotext separates pages with form feeds; the opening balance applies
/// to the first page only.
fn run_parser(
    parser: &dyn StatementParser,
    text: &str,
    opening: Option<i64>,
) -> Result<Vec<StatementTransaction>> {
    if parser.requires_whole_document_text() {
        return parser.parse(text, opening);
    }

    let mut opening = opening;
    let mut out = Vec::new();
    for page in text.split('\x0c') {
        out.extend(parser.parse(page, opening.take())?);
    }
    Ok(out)
}

fn write_csv(txns: &[StatementTransaction]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for txn in txns {
        writer.serialize(txn)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_statement(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))
}
