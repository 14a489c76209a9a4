use std::io::Write;
use std::sync::Arc;

use nmt_tokenizer::{normalize, SubwordTokenizer, Tokenizer, TokenizerError, Vocabulary};

const VOCAB_JSON: &str = r#"{
    "<unk>": 0,
    "<pad>": 1,
    "<s>": 2,
    "</s>": 3,
    "▁Hello": 101,
    "▁World": 102,
    "!": 103
}"#;

fn write_vocab(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn load_tokenizer() -> SubwordTokenizer {
    let file = write_vocab(VOCAB_JSON);
    let vocab = Vocabulary::from_file(file.path()).expect("vocab should load");
    SubwordTokenizer::new(Arc::new(vocab))
}

#[test]
fn test_encode_decode_hello_world() {
    let t = load_tokenizer();
    assert_eq!(t.encode("Hello World!").unwrap(), vec![101, 102, 103]);
    assert_eq!(t.decode(&[101, 102, 103]).unwrap(), "Hello World!");
}

#[test]
fn test_unknown_word_is_one_unk() {
    let t = load_tokenizer();
    assert_eq!(t.encode("Unknown").unwrap(), vec![0]);
    assert_eq!(t.encode("Unknown Hello").unwrap(), vec![0, 101]);
}

#[test]
fn test_reserved_tokens_decode_to_nothing() {
    let t = load_tokenizer();
    assert_eq!(t.decode(&[1, 2, 3]).unwrap(), "");
}

#[test]
fn test_normalize_properties() {
    assert_eq!(normalize("Hello\t\nWorld"), "Hello World");
    assert_eq!(normalize(""), "");
    let t = load_tokenizer();
    assert_eq!(t.normalize("a\r\nb"), "a b");
}

#[test]
fn test_tokenizer_is_shareable_across_threads() {
    let t = Arc::new(load_tokenizer());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let t = Arc::clone(&t);
            std::thread::spawn(move || t.encode("Hello World!").unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), vec![101, 102, 103]);
    }
}

#[test]
fn test_missing_unk_fails_load() {
    let file = write_vocab(r#"{"<pad>": 1, "▁Hello": 101}"#);
    let err = Vocabulary::from_file(file.path()).unwrap_err();
    assert!(matches!(err, TokenizerError::MissingReservedToken(_)));
    assert_eq!(err.to_string(), "Vocabulary is missing reserved token <unk>");
}

#[test]
fn test_garbage_file_fails_load() {
    let file = write_vocab("not json at all");
    assert!(matches!(
        Vocabulary::from_file(file.path()),
        Err(TokenizerError::VocabLoad(_))
    ));
}
