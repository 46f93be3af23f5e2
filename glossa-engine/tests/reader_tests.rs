//! Rendering texts into owned units

use glossa_core::{Token, TokenStream, Tokenizer};
use glossa_engine::{
    chunk_tokens, ChunkPolicy, InMemoryVocabulary, LanguageRegistry, Reader, Term, TermStatus,
};
use proptest::prelude::*;
use std::sync::Arc;

fn reader_with(language: &str, terms: &[(&str, TermStatus)]) -> Reader {
    let registry = Arc::new(LanguageRegistry::with_builtin().unwrap());
    let rules = registry.rules(language).unwrap();
    let tokenizer = Tokenizer::new(&rules);

    let vocabulary = Arc::new(InMemoryVocabulary::new());
    for (id, (text, status)) in terms.iter().enumerate() {
        let term = Term::parse(text, &tokenizer, *status)
            .unwrap()
            .with_id(id as u64 + 1);
        vocabulary.add_term(language, term).unwrap();
    }
    Reader::new(registry, vocabulary)
}

#[test]
fn test_overlapping_terms_render_once() {
    let reader = reader_with(
        "es",
        &[
            ("tengo un", TermStatus::Learning(2)),
            ("un gato", TermStatus::Learning(4)),
        ],
    );

    let units = reader.render("es", "Tengo un gato.").unwrap();
    let shown: Vec<(&str, &str, u8)> = units
        .iter()
        .map(|u| (u.text.as_str(), u.display_text.as_str(), u.status))
        .collect();

    assert_eq!(
        shown,
        vec![
            ("Tengo un", "Tengo un", 2),
            ("un gato", " gato", 4),
            (".", ".", 0),
        ]
    );
    let displayed: String = units.iter().map(|u| u.display_text.as_str()).collect();
    assert_eq!(displayed, "Tengo un gato.");
}

#[test]
fn test_render_pre_tokenized_stream() {
    let reader = reader_with("lzh", &[("學而", TermStatus::WellKnown)]);
    let stream = TokenStream::from_ordered(vec![
        (10, Token::word("學")),
        (11, Token::word("而")),
        (12, Token::word("時")),
    ])
    .unwrap();

    let units = reader.render_stream("lzh", &stream).unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].order, 10);
    assert_eq!(units[0].length, 2);
    assert_eq!(units[1].order, 12);
}

#[test]
fn test_rendered_units_serialize() {
    let reader = reader_with("es", &[("gato", TermStatus::WellKnown)]);
    let units = reader.render("es", "Un gato").unwrap();

    let json = serde_json::to_value(&units).unwrap();
    assert_eq!(json[2]["display_text"], "gato");
    assert_eq!(json[2]["status"], 99);
    assert_eq!(json[2]["term_id"], 1);
    assert!(json[0].get("term_id").is_none());
}

fn sentence_tokens() -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec((1usize..6, any::<bool>()), 0..20).prop_map(|sentences| {
        let mut tokens = Vec::new();
        for (words, closed) in sentences {
            for i in 0..words {
                tokens.push(Token::word(format!("w{i}")));
            }
            tokens.push(Token::non_word(".", closed));
        }
        tokens
    })
}

proptest! {
    #[test]
    fn chunks_keep_every_token_in_order(tokens in sentence_tokens(), target in 1usize..30) {
        let chunks = chunk_tokens(tokens.clone(), ChunkPolicy::new(target));

        let mut next_order = 0;
        let mut rejoined = Vec::new();
        for chunk in &chunks {
            prop_assert_eq!(chunk.first_order(), next_order);
            next_order += chunk.len();
            rejoined.extend(chunk.tokens().iter().cloned());
        }
        prop_assert_eq!(rejoined, tokens);
    }

    #[test]
    fn chunks_end_on_sentence_ends(tokens in sentence_tokens(), target in 1usize..30) {
        let chunks = chunk_tokens(tokens, ChunkPolicy::new(target));
        if let Some((_, closed)) = chunks.split_last() {
            for chunk in closed {
                prop_assert!(chunk.tokens().last().is_some_and(|t| t.is_end_of_sentence));
                prop_assert!(chunk.len() >= target);
            }
        }
    }
}
