//! # Part Matchers
//!
//! Pure functions deciding whether a phrase starts or extends a match against
//! one simple definition part or one paths part.
//!
//! A matcher receives the progress previously recorded for the same
//! definition index, if any, and returns the updated progress on success. It
//! never mutates its input, so a failed attempt leaves no trace and the caller
//! is free to try the next part.

use crate::grammar::{ModifiersPart, Optionality, PathsPart, SimplePart, TextPart};
use crate::parser::{ParsedPaths, ParsedSimplePart, PathProgress, Phrase, PhraseKind};
use crate::syntax::Cursor;
use compact_str::CompactString;
use smallvec::{SmallVec, smallvec};

/// Match `phrase` against a simple part.
///
/// With `previous` set this is a continuation attempt: keywords, identifiers
/// and numbers never continue, modifiers accept only unseen candidates and
/// text parts in text mode accept anything.
#[must_use]
pub fn match_simple(
    definition: &SimplePart,
    index: usize,
    phrase: &Phrase,
    previous: Option<&ParsedSimplePart>,
) -> Option<ParsedSimplePart> {
    let single = |matches: bool| {
        (previous.is_none() && matches)
            .then(|| ParsedSimplePart::new(index, phrase.text.clone(), phrase.position).finished())
    };

    match definition {
        SimplePart::Keyword { phrase: keyword } => single(keyword.as_str() == phrase.as_str()),
        SimplePart::Identifier { .. } => single(phrase.kind == PhraseKind::Word),
        SimplePart::Number { .. } => single(phrase.kind == PhraseKind::Number),
        SimplePart::Modifiers(modifiers) => match_modifiers(modifiers, index, phrase, previous),
        SimplePart::Text(text) => match_text(text, index, phrase, previous),
    }
}

fn match_modifiers(
    definition: &ModifiersPart,
    index: usize,
    phrase: &Phrase,
    previous: Option<&ParsedSimplePart>,
) -> Option<ParsedSimplePart> {
    if !definition.contains(phrase.as_str()) {
        return None;
    }

    match previous {
        Some(previous) => {
            if previous.values.iter().any(|value| value.as_str() == phrase.as_str()) {
                return None;
            }
            let mut part = previous.clone();
            part.values.push(phrase.text.clone());
            part.position.end = phrase.position.end;
            part.finished = part.values.len() >= definition.phrases.len();
            Some(part)
        }
        None => {
            let part = ParsedSimplePart::new(index, phrase.text.clone(), phrase.position);
            Some(if definition.singular || definition.phrases.len() == 1 {
                part.finished()
            } else {
                part
            })
        }
    }
}

fn match_text(
    definition: &TextPart,
    index: usize,
    phrase: &Phrase,
    previous: Option<&ParsedSimplePart>,
) -> Option<ParsedSimplePart> {
    let Some(previous) = previous else {
        let starts = match &definition.start_phrase {
            Some(start) => start.as_str() == phrase.as_str(),
            None => definition.end_phrase.as_str() != phrase.as_str(),
        };
        return starts.then(|| {
            ParsedSimplePart::new(index, phrase.text.clone(), phrase.position).in_text_mode()
        });
    };

    if !previous.text_mode {
        return None;
    }

    let mut part = previous.clone();
    let mut value = CompactString::from(part.value());
    value.push_str(phrase.as_str());

    // The end phrase must lie entirely after the opening phrase
    let end = definition.end_phrase.as_str();
    let closes = !end.is_empty()
        && value.len() >= part.opening_len + end.len()
        && value.ends_with(end);

    if closes {
        part.text_mode = false;
        part.finished = true;
        if definition.exclude_end_phrase {
            value.truncate(value.len() - end.len());
            part.position.end = value.chars().fold(part.position.start, Cursor::advanced);
            part.reoffer = Some(definition.end_phrase.clone());
        } else {
            part.position.end = phrase.position.end;
        }
    } else {
        part.position.end = phrase.position.end;
    }

    part.values = smallvec![value];
    Some(part)
}

/// Whether every part from `next` onwards may be skipped
#[must_use]
pub fn rest_optional<P: Optionality>(parts: &[P], next: usize) -> bool {
    parts.iter().skip(next).all(Optionality::is_optional)
}

/// Offer a phrase to a sequence of simple parts, continuing after `previous`.
///
/// The previous part gets the first chance to extend itself; after that the
/// following parts are tried in order until one matches or a required one
/// fails.
#[must_use]
pub fn match_simple_sequence(
    parts: &[SimplePart],
    phrase: &Phrase,
    previous: Option<&ParsedSimplePart>,
) -> Option<ParsedSimplePart> {
    if let Some(previous) = previous.filter(|part| !part.finished) {
        let definition = parts.get(previous.index)?;
        if let Some(part) = match_simple(definition, previous.index, phrase, Some(previous)) {
            return Some(part);
        }
    }

    let start = previous.map_or(0, |part| part.index + 1);
    for (index, definition) in parts.iter().enumerate().skip(start) {
        if let Some(part) = match_simple(definition, index, phrase, None) {
            return Some(part);
        }
        if !definition.is_optional() {
            return None;
        }
    }
    None
}

/// Match a phrase against the alternatives of a paths part.
///
/// Every alternative still alive is advanced independently; those that fail
/// to take the phrase are dropped. The part as a whole fails when no
/// alternative takes it, in which case `previous` stays untouched.
#[must_use]
pub fn match_paths(
    definition: &PathsPart,
    index: usize,
    phrase: &Phrase,
    previous: Option<&ParsedPaths>,
) -> Option<ParsedPaths> {
    let mut alive: SmallVec<[PathProgress; 2]> = SmallVec::new();

    match previous {
        Some(previous) => {
            for progress in &previous.progress {
                let Some(path) = definition.paths.get(progress.path) else {
                    continue;
                };
                if let Some(part) = match_simple_sequence(path, phrase, progress.parts.last()) {
                    let mut parts = progress.parts.clone();
                    record(&mut parts, part);
                    alive.push(PathProgress {
                        path: progress.path,
                        parts,
                    });
                }
            }
        }
        None => {
            for (path_index, path) in definition.paths.iter().enumerate() {
                if let Some(part) = match_simple_sequence(path, phrase, None) {
                    alive.push(PathProgress {
                        path: path_index,
                        parts: smallvec![part],
                    });
                }
            }
        }
    }

    if alive.is_empty() {
        return None;
    }

    let text_mode = alive
        .iter()
        .any(|progress| progress.parts.last().is_some_and(|part| part.text_mode));
    let has_satisfied_path = alive.iter().any(|progress| {
        definition.paths.get(progress.path).is_some_and(|path| {
            let next = progress.parts.last().map_or(0, |part| part.index + 1);
            rest_optional(path, next)
        })
    });

    Some(ParsedPaths {
        index,
        progress: alive,
        has_satisfied_path,
        text_mode,
    })
}

/// Replace the last entry when it belongs to the same definition index,
/// append otherwise
fn record(parts: &mut SmallVec<[ParsedSimplePart; 2]>, part: ParsedSimplePart) {
    match parts.last_mut() {
        Some(last) if last.index == part.index => *last = part,
        _ => parts.push(part),
    }
}
