pub mod model;
pub mod tokenizer;
pub mod translate;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    /// Encode, decode, normalize, and inspect a subword vocabulary.
    Tokenizer(tokenizer::TokenizerArgs),

    /// Translate text with beam search over a scripted model.
    Translate(translate::TranslateArgs),
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Tokenizer(args) => tokenizer::run(args),
        Command::Translate(args) => translate::run(args),
    }
}
