//! # Event Log & Replay
//!
//! A session's only durable state is its list of normalized command lines.
//! The ledger is a fold over that list:
//!
//! ```text
//! ["banksize 4000", "MIKKO cash 1000", "CR float 670"]
//!        │ parse → handler → Ledger          (silent)
//!        ▼
//!      Ledger { cash: {MIKKO: 1000}, treasuries: {CR: 670}, .. }
//! ```
//!
//! Live commands go through the same handlers, then their normalized text
//! is appended. Undo drops the last entry and folds again from empty.

use log::{debug, info, warn};

use super::action::{Action, CommandError, Verb};
use super::ledger::Ledger;
use super::parser::{parse, parse_int};
use super::round::RoundKind;

/// Applies one parsed action. `history` is the log before this entry.
type Handler = fn(&mut Ledger, &Action, &[String]) -> Result<String, CommandError>;

fn handler(verb: Verb) -> Option<Handler> {
    let handler: Handler = match verb {
        Verb::Buy => buy,
        Verb::Sell => sell,
        Verb::Dividend => dividend,
        Verb::HalfDividend => half_dividend,
        Verb::Value => value,
        Verb::Float => float,
        Verb::Cash => cash,
        Verb::Income => income,
        Verb::Give => give,
        Verb::Close => close,
        Verb::Next => next,
        Verb::Rounding => rounding,
        Verb::BankSize => bank_size,
        Verb::CompanyCredits => company_credits,
        Verb::Comment => comment,
        _ => return None,
    };
    Some(handler)
}

fn subject(action: &Action) -> Result<&str, CommandError> {
    action
        .subject
        .as_deref()
        .ok_or(CommandError::MissingArgument("name"))
}

fn object<'a>(action: &'a Action, what: &'static str) -> Result<&'a str, CommandError> {
    action
        .object
        .as_deref()
        .ok_or(CommandError::MissingArgument(what))
}

fn quantity(action: &Action, what: &'static str) -> Result<i64, CommandError> {
    action.quantity.ok_or(CommandError::NotANumber(what))
}

fn buy(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    let company = object(action, "company")?;
    let quantity = quantity(action, "quantity")?;
    Ok(ledger.buy_shares(
        subject(action)?,
        company,
        quantity,
        action.price,
        action.source.as_deref(),
    ))
}

fn sell(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    let company = object(action, "company")?;
    let quantity = quantity(action, "quantity")?;
    Ok(ledger.sell_shares(subject(action)?, company, quantity, action.price))
}

/// Per-share or total amount of a dividend. A word other than `PREV` pays nothing.
fn dividend_amount(action: &Action, history: &[String]) -> Result<i64, CommandError> {
    let company = subject(action)?;
    let Some(verb) = action.verb else {
        return Err(CommandError::Unrecognized);
    };
    if action.refers_to_previous() {
        return Ok(previous_amount(history, company, verb).unwrap_or(0));
    }
    if action.object.is_some() {
        return Ok(0);
    }
    quantity(action, "dividend")
}

fn dividend(ledger: &mut Ledger, action: &Action, history: &[String]) -> Result<String, CommandError> {
    let amount = dividend_amount(action, history)?;
    Ok(ledger.pay_dividends(subject(action)?, amount))
}

fn half_dividend(
    ledger: &mut Ledger,
    action: &Action,
    history: &[String],
) -> Result<String, CommandError> {
    let amount = dividend_amount(action, history)?;
    Ok(ledger.pay_half_dividends(subject(action)?, amount))
}

fn value(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    ledger.set_value(subject(action)?, action.quantity)
}

fn float(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    let cash = quantity(action, "cash")?;
    Ok(ledger.float(subject(action)?, cash))
}

fn cash(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    let sum = quantity(action, "cash")?;
    Ok(ledger.change_cash(subject(action)?, sum))
}

fn income(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    ledger.set_income(subject(action)?, action.quantity)
}

fn give(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    let amount = quantity(action, "amount")?;
    let target = object(action, "recipient")?;
    Ok(ledger.move_cash(subject(action)?, target, amount))
}

fn close(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    Ok(ledger.close(object(action, "company")?))
}

fn next(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    let token = object(action, "round")?;
    let kind = RoundKind::parse(token).ok_or_else(|| CommandError::UnknownRound(token.to_string()))?;
    Ok(ledger.next_round(kind))
}

fn rounding(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    Ok(ledger.set_rounding(object(action, "rounding")?))
}

fn bank_size(ledger: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    let size = quantity(action, "bank size")?;
    ledger.set_bank_size(size, action.object.as_deref())
}

fn company_credits(ledger: &mut Ledger, _: &Action, _: &[String]) -> Result<String, CommandError> {
    Ok(ledger.enable_company_credits())
}

fn comment(_: &mut Ledger, action: &Action, _: &[String]) -> Result<String, CommandError> {
    let note = action.comment.as_deref().unwrap_or_default();
    Ok(format!("Noted: {note}\n"))
}

/// Latest numeric `<company> <verb> <amount>` entry in `history`.
///
/// Entries that themselves say `PREV` are skipped, so a chain of them
/// always resolves to the last number actually written.
pub fn previous_amount(history: &[String], company: &str, verb: Verb) -> Option<i64> {
    history.iter().rev().find_map(|entry| {
        let command = entry.split_once('#').map_or(entry.as_str(), |(head, _)| head);
        match command.split_whitespace().collect::<Vec<_>>().as_slice() {
            [subject, word, amount] if *subject == company && *word == verb.as_str() => {
                parse_int(amount)
            }
            _ => None,
        }
    })
}

/// One named game: its event log and the ledger derived from it.
#[derive(Debug, Clone)]
pub struct Session {
    name: String,
    events: Vec<String>,
    ledger: Ledger,
    currency: String,
}

impl Session {
    pub fn new(name: &str, currency: &str) -> Self {
        Self {
            name: name.to_string(),
            events: Vec::new(),
            ledger: Ledger::new(currency),
            currency: currency.to_string(),
        }
    }

    /// Rebuild a session by applying every entry silently, in order.
    pub fn replay(name: &str, events: Vec<String>, currency: &str) -> Self {
        let mut session = Self::new(name, currency);
        let count = events.len();
        for entry in events {
            let action = parse(&entry);
            if let Err(e) = session.apply(&action, true) {
                warn!("Replaying \"{}\" in {}: {}", entry, name, e);
            }
            session.events.push(entry);
        }
        info!("Replayed {} entries for game {}", count, name);
        session
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Apply a live command and log it. Returns the feedback text.
    pub fn perform(&mut self, action: &Action) -> Result<String, CommandError> {
        let feedback = self.apply(action, false)?;
        if let Some(entry) = action.normalized() {
            debug!("{}: appended \"{}\"", self.name, entry);
            self.events.push(entry);
        }
        Ok(feedback)
    }

    /// Run the action's handler against the ledger. Silent runs return no feedback.
    fn apply(&mut self, action: &Action, silent: bool) -> Result<String, CommandError> {
        let verb = action.verb.ok_or(CommandError::Unrecognized)?;
        let handler = handler(verb).ok_or(CommandError::Unrecognized)?;
        let feedback = handler(&mut self.ledger, action, &self.events)?;
        Ok(if silent { String::new() } else { feedback })
    }

    /// Drop the last entry and rebuild. Returns the removed entry.
    pub fn undo(&mut self) -> Result<String, CommandError> {
        let mut events = std::mem::take(&mut self.events);
        let Some(entry) = events.pop() else {
            return Err(CommandError::NothingToUndo);
        };
        *self = Self::replay(&self.name, events, &self.currency);
        info!("{}: undid \"{}\"", self.name, entry);
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, line: &str) -> Result<String, CommandError> {
        session.perform(&parse(line))
    }

    fn session_with(lines: &[&str]) -> Session {
        let mut session = Session::new("test", "$");
        for line in lines {
            run(&mut session, line).unwrap();
        }
        session
    }

    #[test]
    fn test_perform_appends_normalized_entries() {
        let session = session_with(&["mikko b 4 cr", "cr v 100 # seed", "mikko g 100 cr"]);
        assert_eq!(
            session.events(),
            ["MIKKO buy 4 CR", "CR value 100 # seed", "MIKKO give 100 to CR"]
        );
    }

    #[test]
    fn test_rejected_commands_are_not_logged() {
        let mut session = Session::new("test", "$");
        assert_eq!(
            run(&mut session, "lnwr value abc"),
            Err(CommandError::NotANumber("value"))
        );
        assert_eq!(
            run(&mut session, "next XR"),
            Err(CommandError::UnknownRound("XR".to_string()))
        );
        assert_eq!(
            run(&mut session, "banksize lots"),
            Err(CommandError::NotANumber("bank size"))
        );
        assert!(session.events().is_empty());
        assert_eq!(session.ledger(), &Ledger::default());
    }

    #[test]
    fn test_replay_matches_live_state() {
        let session = session_with(&[
            "banksize 4000",
            "mikko cash 1000",
            "cr float 670",
            "mikko buy 2 cr @80 from cr",
            "cr dividend 10",
            "next OR",
        ]);
        let replayed = Session::replay("test", session.events().to_vec(), "$");
        assert_eq!(replayed.ledger(), session.ledger());
        assert_eq!(replayed.events(), session.events());
    }

    #[test]
    fn test_undo_equals_replay_of_prefix() {
        let mut session = session_with(&["mikko cash 100", "mikko buy 2 cr", "cr dividend 10"]);
        let prefix = Session::replay("test", session.events()[..2].to_vec(), "$");

        assert_eq!(session.undo().as_deref(), Ok("CR dividend 10"));
        assert_eq!(session.ledger(), prefix.ledger());
        assert_eq!(session.ledger().cash("MIKKO"), 100);
    }

    #[test]
    fn test_undo_on_empty_log() {
        let mut session = Session::new("test", "$");
        assert_eq!(session.undo(), Err(CommandError::NothingToUndo));
    }

    #[test]
    fn test_prev_resolves_to_last_numeric_dividend() {
        let mut session = session_with(&["mikko buy 2 cr", "cr dividend 10", "mikko cash 5"]);
        run(&mut session, "cr dividend prev").unwrap();
        run(&mut session, "cr dividend pr").unwrap();
        assert_eq!(session.ledger().cash("MIKKO"), 5 + 3 * 20);
        assert_eq!(session.events()[3], "CR dividend PREV");

        // Later entries do not change what earlier PREVs resolved to.
        run(&mut session, "cr dividend 50").unwrap();
        let replayed = Session::replay("test", session.events().to_vec(), "$");
        assert_eq!(replayed.ledger().cash("MIKKO"), 5 + 3 * 20 + 100);
    }

    #[test]
    fn test_prev_for_half_dividends_only_sees_half_dividends() {
        let history = vec![
            "CR halfdividend 60 # first".to_string(),
            "CR dividend 10".to_string(),
            "GT halfdividend 90".to_string(),
            "CR halfdividend PREV".to_string(),
        ];
        assert_eq!(previous_amount(&history, "CR", Verb::HalfDividend), Some(60));
        assert_eq!(previous_amount(&history, "CR", Verb::Dividend), Some(10));
        assert_eq!(previous_amount(&history, "NBR", Verb::Dividend), None);
    }

    #[test]
    fn test_dividend_with_word_pays_nothing() {
        let mut session = session_with(&["mikko buy 2 cr"]);
        run(&mut session, "cr dividend lots").unwrap();
        assert_eq!(session.ledger().cash("MIKKO"), 0);
        assert_eq!(session.events().last().map(String::as_str), Some("CR dividend 0"));
    }

    #[test]
    fn test_comment_lines_are_logged_and_replay_as_no_ops() {
        let session = session_with(&["# lunch break", "mikko cash 10"]);
        assert_eq!(session.events(), ["# lunch break", "MIKKO cash 10"]);
        let replayed = Session::replay("test", session.events().to_vec(), "$");
        assert_eq!(replayed.ledger().cash("MIKKO"), 10);
    }

    #[test]
    fn test_queries_are_rejected_by_the_engine() {
        let mut session = Session::new("test", "$");
        assert_eq!(run(&mut session, "holdings"), Err(CommandError::Unrecognized));
        assert_eq!(run(&mut session, "gibberish"), Err(CommandError::Unrecognized));
    }

    #[test]
    fn test_buy_without_company_is_missing_argument() {
        let mut session = Session::new("test", "$");
        assert_eq!(
            run(&mut session, "mikko buy 2"),
            Err(CommandError::MissingArgument("company"))
        );
    }

    #[test]
    fn test_replay_keeps_unreadable_entries() {
        let events = vec!["MIKKO cash 10".to_string(), "garbage line".to_string()];
        let session = Session::replay("test", events.clone(), "$");
        assert_eq!(session.events(), events);
        assert_eq!(session.ledger().cash("MIKKO"), 10);
    }

    #[test]
    fn test_replay_of_huge_amounts_stays_usable() {
        let events = vec!["A cash 9223372036854775807".to_string(), "B cash 1".to_string()];
        let mut session = Session::replay("test", events, "$");
        assert_eq!(session.ledger().total_cash(), i64::MAX);

        run(&mut session, "mikko buy 9223372036854775807 cr").unwrap();
        run(&mut session, "mikko buy 1 cr").unwrap();
        assert_eq!(session.ledger().holding("MIKKO", "CR"), i64::MAX);
    }
}
