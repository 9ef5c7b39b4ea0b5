//! Standard text capabilities built on a fixture source: lorem text joins and
//! phone-number clean-up.

use crate::generation::evaluator::GenerationContext;
use crate::generation::fixtures::Fixture;

/// Cut a phone number before its extension.
///
/// Everything from one character before the first `x` onwards is dropped, which
/// removes the separating space in numbers like `555-0100 x42`. A number that
/// starts with `x` comes back empty.
pub fn remove_extension(phone: &str) -> String {
    match phone.find('x') {
        Some(index) => {
            let cut = phone[..index]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            phone[..cut].to_string()
        }
        None => phone.to_string(),
    }
}

pub fn phone_number(ctx: &mut GenerationContext<'_>, fixture: Fixture) -> String {
    remove_extension(&ctx.fixture(&fixture))
}

/// `count` words joined by single spaces.
pub fn words(ctx: &mut GenerationContext<'_>, count: usize) -> String {
    (0..count)
        .map(|_| ctx.fixture(&Fixture::Word))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn sentence(ctx: &mut GenerationContext<'_>, min_words: usize) -> String {
    ctx.fixture(&Fixture::Sentence { min_words })
}

/// `count` sentences joined by single spaces.
pub fn sentences(ctx: &mut GenerationContext<'_>, count: usize) -> String {
    (0..count)
        .map(|_| ctx.fixture(&Fixture::Sentence { min_words: 4 }))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `count` paragraphs separated by a blank line.
pub fn paragraphs(ctx: &mut GenerationContext<'_>, count: usize) -> String {
    (0..count)
        .map(|_| ctx.fixture(&Fixture::Paragraph))
        .collect::<Vec<_>>()
        .join("\n\n")
}
