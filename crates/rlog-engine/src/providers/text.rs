//! Text providers: words, sentences, paragraphs.

use super::args::Args;
use crate::error::{ProviderError, ProviderLoadError};
use crate::provider::ProviderModule;
use rlog_core::Value;
use rlog_faker::Faker;

pub fn module() -> Result<ProviderModule, ProviderLoadError> {
    ProviderModule::builder("text")
        .function("randword", randword)
        .function("randsentence", randsentence)
        .function("randparagraph", randparagraph)
        .build()
}

pub fn randword(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::from(faker.word()))
}

/// Most words `randsentence` accepts.
pub const MAX_SENTENCE_WORDS: usize = 10_000;
/// Most sentences `randparagraph` accepts.
pub const MAX_PARAGRAPH_SENTENCES: usize = 1_000;

/// `randsentence [nb_words=4] [variable_nb_words=false]`
pub fn randsentence(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    let args = Args::new(args).at_most(2)?;
    let nb_words: usize = args.optional_at_most(
        0,
        "nb_words",
        "an integer from 0 to 10000",
        4,
        MAX_SENTENCE_WORDS,
    )?;
    let variable = args.flag(1, "variable_nb_words", false)?;
    Ok(Value::String(faker.sentence(nb_words, variable)))
}

/// `randparagraph [nb_sentences=2] [variable_nb_sentences=true]`
pub fn randparagraph(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    let args = Args::new(args).at_most(2)?;
    let nb_sentences: usize = args.optional_at_most(
        0,
        "nb_sentences",
        "an integer from 0 to 1000",
        2,
        MAX_PARAGRAPH_SENTENCES,
    )?;
    let variable = args.flag(1, "variable_nb_sentences", true)?;
    Ok(Value::String(faker.paragraph(nb_sentences, variable)))
}
