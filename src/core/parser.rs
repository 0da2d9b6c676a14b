//! # Command Interpreter
//!
//! Turns one free-text line into an [`Action`]. Pure and total: anything it
//! can't read comes back with `verb: None` instead of an error.
//!
//! The token count picks the grammar:
//!
//! ```text
//! holdings                     1 token   query / toggle
//! open rusty-trains            2 tokens  verb + argument
//! mikko buy cr                 3 tokens  subject + verb + (object | quantity)
//! mikko buy 2 cr @80 from gt   4+        buy / sell / give
//! ```
//!
//! Verbs may be abbreviated to any prefix down to the keyword's minimum
//! length, so `h`, `hold` and `holdings` all mean the same thing.

use super::action::{Action, Verb};

/// A verb spelling: the full word plus the shortest prefix still accepted.
struct Keyword {
    word: &'static str,
    min: usize,
    verb: Verb,
}

const fn kw(word: &'static str, min: usize, verb: Verb) -> Keyword {
    Keyword { word, min, verb }
}

// Order matters: the first keyword accepting the token wins.
const QUERIES: &[Keyword] = &[
    kw("holdings", 1, Verb::Holdings),
    kw("values", 1, Verb::Values),
    kw("list", 1, Verb::ListGames),
    kw("listGames", 9, Verb::ListGames),
    kw("bank", 1, Verb::Bank),
    kw("companies", 1, Verb::Companies),
    kw("companycredits", 14, Verb::CompanyCredits),
];

const UNARY: &[Keyword] = &[
    kw("open", 1, Verb::Open),
    kw("delete", 6, Verb::Delete),
    kw("start", 5, Verb::Start),
    kw("banksize", 1, Verb::BankSize),
    kw("close", 5, Verb::Close),
    kw("next", 1, Verb::Next),
    kw("rounding", 8, Verb::Rounding),
];

const BINARY: &[Keyword] = &[
    kw("buys", 1, Verb::Buy),
    kw("sells", 1, Verb::Sell),
    kw("dividends", 1, Verb::Dividend),
    kw("pays", 1, Verb::Dividend),
    kw("halfdividends", 1, Verb::HalfDividend),
    kw("value", 1, Verb::Value),
    kw("float", 1, Verb::Float),
    kw("cash", 1, Verb::Cash),
    kw("income", 6, Verb::Income),
];

const VARIADIC: &[Keyword] = &[
    kw("buys", 1, Verb::Buy),
    kw("sells", 1, Verb::Sell),
    kw("give", 1, Verb::Give),
];

fn lookup(table: &[Keyword], token: &str) -> Option<Verb> {
    let token = token.to_ascii_lowercase();
    table
        .iter()
        .find(|keyword| {
            token.len() >= keyword.min && keyword.word.to_ascii_lowercase().starts_with(&token)
        })
        .map(|keyword| keyword.verb)
}

/// Reads an integer the forgiving way: optional sign, then leading digits.
/// `"10"` and `"10x"` are 10; `"x10"` and `""` are not numbers.
pub fn parse_int(token: &str) -> Option<i64> {
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// A price token: a bare integer or one prefixed with `@`.
fn parse_price(token: &str) -> Option<i64> {
    parse_int(token.strip_prefix('@').unwrap_or(token))
}

/// Parse one command line.
pub fn parse(line: &str) -> Action {
    let (command, comment) = match line.split_once('#') {
        Some((command, comment)) => (command, Some(comment.trim().to_string())),
        None => (line, None),
    };
    let comment = comment.filter(|comment| !comment.is_empty());
    let parts: Vec<&str> = command.split_whitespace().collect();

    match parts.as_slice() {
        [] if comment.is_some() => Action {
            comment,
            ..Action::new(Verb::Comment)
        },
        [] => Action::unrecognized(comment),
        [verb] => parse_query(verb, comment),
        [verb, argument] => parse_unary(verb, argument, comment),
        [subject, verb, argument] => parse_binary(subject, verb, argument, comment),
        [subject, verb, rest @ ..] => parse_variadic(subject, verb, rest, comment),
    }
}

fn parse_query(token: &str, comment: Option<String>) -> Action {
    match lookup(QUERIES, token) {
        Some(verb) => Action {
            comment,
            ..Action::new(verb)
        },
        None => Action::unrecognized(comment),
    }
}

fn parse_unary(token: &str, argument: &str, comment: Option<String>) -> Action {
    let Some(verb) = lookup(UNARY, token) else {
        return Action::unrecognized(comment);
    };
    let raw = argument.to_uppercase();

    let (object, quantity) = if verb == Verb::BankSize {
        split_currency(raw)
    } else {
        (Some(raw), 0)
    };

    Action {
        object,
        quantity: Some(quantity),
        comment,
        ..Action::new(verb)
    }
}

/// `4000` → (None, 4000); `£4000` → ("£", 4000); `WORD` → ("WORD", 0).
fn split_currency(raw: String) -> (Option<String>, i64) {
    if let Some(amount) = parse_int(&raw) {
        return (None, amount);
    }
    let mut chars = raw.chars();
    match (chars.next(), parse_int(chars.as_str())) {
        (Some(symbol), Some(amount)) => (Some(symbol.to_string()), amount),
        _ => (Some(raw), 0),
    }
}

fn parse_binary(subject: &str, token: &str, argument: &str, comment: Option<String>) -> Action {
    let Some(verb) = lookup(BINARY, token) else {
        return Action::unrecognized(comment);
    };

    let (mut object, mut quantity) = match parse_int(argument) {
        Some(amount) => (None, Some(amount)),
        None => (Some(argument.to_uppercase()), Some(1)),
    };

    // Amount-only verbs have no object slot: a word here is a bad number.
    if matches!(verb, Verb::Value | Verb::Income | Verb::Cash | Verb::Float) && object.is_some() {
        object = None;
        quantity = None;
    }

    Action {
        subject: Some(subject.to_uppercase()),
        object,
        quantity,
        comment,
        ..Action::new(verb)
    }
}

fn parse_variadic(subject: &str, token: &str, rest: &[&str], comment: Option<String>) -> Action {
    let Some(verb) = lookup(VARIADIC, token) else {
        return Action::unrecognized(comment);
    };
    let mut args = rest.iter().copied().peekable();
    let subject = Some(subject.to_uppercase());

    if verb == Verb::Give {
        let quantity = args.next().and_then(parse_int);
        args.next_if(|word| word.eq_ignore_ascii_case("to"));
        return Action {
            subject,
            object: args.next().map(str::to_uppercase),
            quantity,
            comment,
            ..Action::new(verb)
        };
    }

    let quantity = args
        .next_if(|word| parse_int(word).is_some())
        .and_then(parse_int)
        .unwrap_or(1);
    let object = args.next().map(str::to_uppercase);
    let price = args
        .next_if(|word| parse_price(word).is_some())
        .and_then(parse_price)
        .unwrap_or(0);
    let source = if verb == Verb::Buy {
        args.next_if(|word| word.eq_ignore_ascii_case("from"));
        args.next().map(str::to_uppercase)
    } else {
        None
    };

    Action {
        subject,
        object,
        quantity: Some(quantity),
        price,
        source,
        comment,
        ..Action::new(verb)
    }
}
