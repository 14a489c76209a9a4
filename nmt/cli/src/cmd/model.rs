use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};

use nmt_tokenizer::Vocabulary;

/// Supported opus-mt language pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModelPair {
    #[value(name = "en-ru")]
    EnRu,
    #[value(name = "ru-en")]
    RuEn,
}

impl ModelPair {
    /// Directory name under the models directory, e.g. `opus-mt-en-ru`.
    pub fn dir_name(self) -> &'static str {
        match self {
            ModelPair::EnRu => "opus-mt-en-ru",
            ModelPair::RuEn => "opus-mt-ru-en",
        }
    }
}

/// Where the vocabulary comes from (at most one; required by every
/// command that loads it).
#[derive(Args)]
#[group(multiple = false)]
pub struct VocabSource {
    /// Load the vocabulary from a vocab.json file.
    #[arg(long, value_name = "PATH")]
    vocab: Option<PathBuf>,

    /// Load the vocabulary of a bundled opus-mt model pair.
    #[arg(long, value_enum, value_name = "PAIR")]
    pair: Option<ModelPair>,
}

#[derive(Args)]
pub struct ModelSource {
    #[command(flatten)]
    source: VocabSource,

    /// Directory holding opus-mt-<pair> model directories.
    #[arg(long, value_name = "DIR", default_value = "models")]
    models_dir: PathBuf,
}

impl ModelSource {
    /// Path of the vocab.json to load, if a source was given.
    pub fn vocab_path(&self) -> Option<PathBuf> {
        match (&self.source.vocab, self.source.pair) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(pair)) => Some(self.models_dir.join(pair.dir_name()).join("vocab.json")),
            (None, None) => None,
        }
    }

    /// The model's config.json, looked up next to the vocabulary.
    pub fn sibling_config(&self) -> Option<PathBuf> {
        let vocab = self.vocab_path()?;
        let dir = vocab.parent().unwrap_or_else(|| Path::new("."));
        let config = dir.join("config.json");
        config.is_file().then_some(config)
    }

    pub fn load_vocab(&self) -> Result<Arc<Vocabulary>> {
        let Some(path) = self.vocab_path() else {
            bail!("No vocabulary specified (use --vocab or --pair)");
        };
        eprintln!("Loading vocabulary from {}", path.display());
        let vocab = Vocabulary::from_file(&path)
            .with_context(|| format!("Failed to load vocabulary: {}", path.display()))?;
        Ok(Arc::new(vocab))
    }
}
