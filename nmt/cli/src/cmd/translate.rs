use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;

use nmt_tokenizer::{SubwordTokenizer, TokenId, Tokenizer};
use nmt_translate::{BeamConfig, GenerationDefaults, ReplayModel, Translator};

use super::model::ModelSource;

const DEFAULT_PAD_TOKEN_ID: TokenId = 62517;
const DEFAULT_EOS_TOKEN_ID: TokenId = 0;
const DEFAULT_MAX_LENGTH: usize = 20;
const DEFAULT_BEAM_WIDTH: usize = 3;

#[derive(Args)]
pub struct TranslateArgs {
    #[command(flatten)]
    model: ModelSource,

    /// Logits script driving the replay model.
    #[arg(long, value_name = "PATH")]
    replay: PathBuf,

    /// Model config.json with generation defaults (default: next to the vocabulary).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Decoder start token.
    #[arg(long)]
    pad_token_id: Option<TokenId>,

    /// End-of-sequence token.
    #[arg(long)]
    eos_token_id: Option<TokenId>,

    /// Maximum number of decoding steps.
    #[arg(long)]
    max_length: Option<usize>,

    /// Number of hypotheses kept per step.
    #[arg(long)]
    beam_width: Option<usize>,

    /// Abort a translation that is still decoding after this many milliseconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Text to translate (reads lines from stdin if omitted and --file not given).
    #[arg(conflicts_with_all = ["file", "interactive"])]
    text: Option<String>,

    /// Translate each line of a file.
    #[arg(long, value_name = "PATH", conflicts_with = "interactive")]
    file: Option<PathBuf>,

    /// Read sentences from a prompt until `exit`.
    #[arg(long)]
    interactive: bool,
}

impl TranslateArgs {
    fn generation_defaults(&self) -> Result<GenerationDefaults> {
        let path = match self.config.clone().or_else(|| self.model.sibling_config()) {
            Some(path) => path,
            None => return Ok(GenerationDefaults::default()),
        };
        eprintln!("Loading generation config from {}", path.display());
        GenerationDefaults::from_file(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Flag, then config.json, then built-in default.
    fn beam_config(&self) -> Result<BeamConfig> {
        let defaults = self.generation_defaults()?;
        Ok(BeamConfig::new(
            self.pad_token_id
                .or(defaults.start_token_id())
                .unwrap_or(DEFAULT_PAD_TOKEN_ID),
            self.eos_token_id
                .or(defaults.eos_token_id)
                .unwrap_or(DEFAULT_EOS_TOKEN_ID),
            self.max_length
                .or(defaults.max_length)
                .unwrap_or(DEFAULT_MAX_LENGTH),
            self.beam_width
                .or(defaults.num_beams)
                .unwrap_or(DEFAULT_BEAM_WIDTH),
        ))
    }
}

pub fn run(args: TranslateArgs) -> Result<()> {
    let tokenizer = SubwordTokenizer::new(args.model.load_vocab()?);

    eprintln!("Loading replay script from {}", args.replay.display());
    let model = ReplayModel::from_file(&args.replay)
        .with_context(|| format!("Failed to load replay script: {}", args.replay.display()))?;
    eprintln!("  Script: {} steps, {} logits per step", model.steps(), model.width());
    if model.width() != tokenizer.vocab_size() {
        eprintln!(
            "  [warn] script width {} does not match vocabulary size {}",
            model.width(),
            tokenizer.vocab_size()
        );
    }

    let config = args.beam_config()?;
    eprintln!(
        "  pad={} eos={} max_length={} beam_width={}",
        config.pad_token_id, config.eos_token_id, config.max_length, config.beam_width
    );

    let mut translator = Translator::new(&model, &tokenizer, config);
    if let Some(ms) = args.timeout_ms {
        eprintln!("  Timeout: {}ms", ms);
        translator = translator.with_timeout(Duration::from_millis(ms));
    }

    if args.interactive {
        return run_interactive(&translator);
    }

    if let Some(text) = &args.text {
        let output = translator.translate(text).context("Translation failed")?;
        println!("{output}");
        return Ok(());
    }

    let input = if let Some(path) = &args.file {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?
    } else {
        eprintln!("Reading from stdin...");
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    };

    let lines: Vec<&str> = input.lines().collect();
    let start = Instant::now();
    let outputs = translator
        .translate_batch(&lines)
        .context("Translation failed")?;
    for output in &outputs {
        println!("{output}");
    }
    eprintln!(
        "  Translated {} lines in {:.2}s",
        outputs.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_interactive(translator: &Translator<'_>) -> Result<()> {
    eprintln!("Interactive mode. Type 'exit' to leave.");
    eprintln!("---");

    let stdin = io::stdin();
    loop {
        eprint!("> ");
        io::stderr().flush().ok();

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => {
                // EOF (Ctrl-D)
                eprintln!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }

        let input = input.trim_end_matches(&['\r', '\n'][..]);
        if input == "exit" {
            break;
        }
        if input.trim().is_empty() {
            eprintln!("Please enter some text to translate, or 'exit' to quit.");
            continue;
        }

        // A failed sentence does not end the session
        match translator.translate(input) {
            Ok(output) => {
                println!("{output}");
                io::stdout().flush().ok();
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }
    Ok(())
}
