use std::io::{self, BufRead, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use nmt_tokenizer::{normalize, SubwordTokenizer, TokenId, Tokenizer};

use super::model::ModelSource;

#[derive(Args)]
pub struct TokenizerArgs {
    #[command(flatten)]
    model: ModelSource,

    #[command(subcommand)]
    command: TokenizerCommand,
}

#[derive(Subcommand)]
enum TokenizerCommand {
    /// Encode text into token IDs.
    Encode {
        /// Text to encode (reads from stdin if omitted and --file not given).
        text: Option<String>,

        /// Read input text from a file.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Output token IDs as a JSON array instead of space-separated.
        #[arg(long)]
        json: bool,
    },

    /// Decode token IDs back into text.
    Decode {
        /// Token IDs to decode (reads from stdin if omitted and --file not given).
        ids: Vec<TokenId>,

        /// Read token IDs from a file (one per line or space-separated).
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Print text with whitespace runs collapsed to single spaces.
    Normalize {
        /// Text to normalize (reads from stdin if omitted and --file not given).
        text: Option<String>,

        /// Read input text from a file.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Display vocabulary info (sizes, reserved tokens, token lookups).
    Info {
        /// Look up specific tokens and print their IDs.
        #[arg(long, value_name = "TOKEN")]
        lookup: Vec<String>,
    },
}

pub(crate) fn read_text(text: Option<&str>, file: Option<&PathBuf>) -> Result<String> {
    if let Some(t) = text {
        Ok(t.to_string())
    } else if let Some(path) = file {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    } else {
        eprintln!("Reading from stdin...");
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    }
}

fn read_ids(ids: &[TokenId], file: Option<&PathBuf>) -> Result<Vec<TokenId>> {
    if !ids.is_empty() {
        return Ok(ids.to_vec());
    }

    let raw = if let Some(path) = file {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?
    } else {
        eprintln!("Reading IDs from stdin...");
        let mut buf = String::new();
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            buf.push_str(&line);
            buf.push(' ');
        }
        buf
    };

    raw.split_whitespace()
        .map(|s| {
            s.parse::<TokenId>()
                .with_context(|| format!("Invalid token ID: {s}"))
        })
        .collect()
}

fn join_ids(ids: &[TokenId], sep: &str) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

pub fn run(args: TokenizerArgs) -> Result<()> {
    let load = || args.model.load_vocab().map(SubwordTokenizer::new);

    match &args.command {
        TokenizerCommand::Encode { text, file, json } => {
            let tokenizer = load()?;
            let input = read_text(text.as_deref(), file.as_ref())?;
            let ids = tokenizer.encode(&input).context("Failed to encode text")?;

            if *json {
                println!("[{}]", join_ids(&ids, ", "));
            } else {
                println!("{}", join_ids(&ids, " "));
            }
        }

        TokenizerCommand::Decode { ids, file } => {
            let tokenizer = load()?;
            let token_ids = read_ids(ids, file.as_ref())?;
            let text = tokenizer.decode(&token_ids).context("Failed to decode token IDs")?;
            println!("{text}");
        }

        TokenizerCommand::Normalize { text, file } => {
            // No vocabulary involved
            let input = read_text(text.as_deref(), file.as_ref())?;
            println!("{}", normalize(&input));
        }

        TokenizerCommand::Info { lookup } => {
            let tokenizer = load()?;
            let vocab = tokenizer.vocab();
            println!("Entries: {}", vocab.len());
            println!("Vocab size: {}", tokenizer.vocab_size());
            println!("Longest token: {} bytes", vocab.max_token_len());
            println!("  <unk> -> {}", vocab.unk_id());
            for (name, id) in [("<pad>", vocab.pad_id()), ("<s>", vocab.bos_id()), ("</s>", vocab.eos_id())] {
                match id {
                    Some(id) => println!("  {name} -> {id}"),
                    None => println!("  {name} -> (not found)"),
                }
            }

            for token in lookup {
                match tokenizer.token_to_id(token) {
                    Some(id) => println!("  {token} -> {id}"),
                    None => println!("  {token} -> (not found)"),
                }
            }
        }
    }

    Ok(())
}
