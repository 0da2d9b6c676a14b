//! # Ledger
//!
//! Everything the game knows right now: who holds what, who has how much
//! money, which companies have floated. A `Ledger` is never saved; it is
//! rebuilt from the event log by replaying each entry through these methods.
//!
//! ```text
//! Ledger
//! ├── cash: Party → money             // players, and companies not yet floated
//! ├── shares: Owner → Company → count // never negative
//! ├── treasuries: Company → money     // present ⇔ floated
//! ├── values: Company → share price
//! ├── incomes: Party → money per OR
//! ├── bank: size + currency
//! ├── round: Option<Round>
//! └── parameters: rounding, company credits
//! ```
//!
//! Each operation mutates the ledger and returns the feedback text for the
//! operator. Operations never fail on game grounds; the only rejections are
//! malformed numbers, returned as `CommandError`.

use std::collections::{BTreeMap, BTreeSet};

use super::action::CommandError;
use super::round::{Round, RoundKind};

/// Split used by half dividends: what the company keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Keep half, rounded down to a multiple of ten.
    #[default]
    Down,
    /// Keep half, rounded up to a multiple of ten.
    Up,
    /// Keep exactly half (1837 rules).
    Exact,
}

impl Rounding {
    /// `UP` and `1837` select their modes; anything else is the default.
    pub fn parse(token: &str) -> Self {
        match token {
            "UP" => Rounding::Up,
            "1837" => Rounding::Exact,
            _ => Rounding::Down,
        }
    }

    /// Amount the company keeps out of a `total` half dividend.
    pub fn retained(self, total: i64) -> i64 {
        match self {
            Rounding::Down => total.div_euclid(20).saturating_mul(10),
            Rounding::Up => total
                .saturating_neg()
                .div_euclid(20)
                .saturating_neg()
                .saturating_mul(10),
            Rounding::Exact => total.div_euclid(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters {
    pub rounding: Rounding,
    /// Company treasuries are funded outside the bank.
    pub company_credits: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    pub size: Option<i64>,
    pub currency: String,
}

/// Players and companies, as derived from the current ledger contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    pub players: Vec<String>,
    pub companies: Vec<String>,
}

impl Roster {
    pub fn is_company(&self, name: &str) -> bool {
        self.companies.iter().any(|company| company == name)
    }
}

/// Sort parties into players and companies.
///
/// Companies are everything floated plus everything anyone holds shares in.
/// Players are every other name with cash or shares. Nothing about a
/// party's role is stored, so this is the only place the rule lives.
pub fn classify(ledger: &Ledger) -> Roster {
    let companies: BTreeSet<&String> = ledger
        .treasuries
        .keys()
        .chain(ledger.shares.values().flat_map(|owned| owned.keys()))
        .collect();
    let players: BTreeSet<&String> = ledger
        .cash
        .keys()
        .chain(ledger.shares.keys())
        .filter(|party| !companies.contains(party))
        .collect();

    Roster {
        players: players.into_iter().cloned().collect(),
        companies: companies.into_iter().cloned().collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    cash: BTreeMap<String, i64>,
    shares: BTreeMap<String, BTreeMap<String, i64>>,
    treasuries: BTreeMap<String, i64>,
    values: BTreeMap<String, i64>,
    incomes: BTreeMap<String, i64>,
    bank: Bank,
    round: Option<Round>,
    parameters: Parameters,
    default_currency: String,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new("$")
    }
}

impl Ledger {
    /// An empty ledger whose money is shown in `currency` until a bank size says otherwise.
    pub fn new(currency: &str) -> Self {
        Self {
            cash: BTreeMap::new(),
            shares: BTreeMap::new(),
            treasuries: BTreeMap::new(),
            values: BTreeMap::new(),
            incomes: BTreeMap::new(),
            bank: Bank {
                size: None,
                currency: currency.to_string(),
            },
            round: None,
            parameters: Parameters::default(),
            default_currency: currency.to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Cash held outside a treasury (players and unfloated companies).
    pub fn cash(&self, party: &str) -> i64 {
        self.cash.get(party).copied().unwrap_or(0)
    }

    pub fn treasury(&self, company: &str) -> Option<i64> {
        self.treasuries.get(company).copied()
    }

    pub fn is_floated(&self, company: &str) -> bool {
        self.treasuries.contains_key(company)
    }

    /// Money a party can spend: its treasury when floated, its cash otherwise.
    pub fn balance(&self, party: &str) -> i64 {
        self.treasury(party).unwrap_or_else(|| self.cash(party))
    }

    pub fn holding(&self, owner: &str, company: &str) -> i64 {
        self.shares
            .get(owner)
            .and_then(|owned| owned.get(company))
            .copied()
            .unwrap_or(0)
    }

    /// Every owner with a non-zero holding of `company`.
    pub fn holders(&self, company: &str) -> Vec<(String, i64)> {
        self.shares
            .iter()
            .filter_map(|(owner, owned)| {
                owned
                    .get(company)
                    .filter(|count| **count != 0)
                    .map(|count| (owner.clone(), *count))
            })
            .collect()
    }

    /// True when `company` appears in any owner's share map, even at zero.
    pub fn has_share_entry(&self, company: &str) -> bool {
        self.shares.values().any(|owned| owned.contains_key(company))
    }

    pub fn value(&self, company: &str) -> i64 {
        self.values.get(company).copied().unwrap_or(0)
    }

    pub fn income(&self, party: &str) -> i64 {
        self.incomes.get(party).copied().unwrap_or(0)
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn round(&self) -> Option<Round> {
        self.round
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn money(&self, amount: i64) -> String {
        format!("{}{}", self.bank.currency, amount)
    }

    pub fn total_cash(&self) -> i64 {
        self.cash.values().fold(0, |total, cash| total.saturating_add(*cash))
    }

    /// Cash plus the market value of every share held.
    pub fn worth(&self, party: &str) -> i64 {
        let shares = self.shares.get(party).map_or(0, |owned| {
            owned
                .iter()
                .map(|(company, count)| count.saturating_mul(self.value(company)))
                .fold(0, i64::saturating_add)
        });
        self.balance(party).saturating_add(shares)
    }

    /// Money left in the bank, or `None` while no bank size is set.
    pub fn bank_remains(&self) -> Option<i64> {
        let size = self.bank.size?;
        let mut remains = size.saturating_sub(self.total_cash());
        if !self.parameters.company_credits {
            let funded = self
                .treasuries
                .values()
                .fold(0i64, |total, treasury| total.saturating_add(*treasury));
            remains = remains.saturating_sub(funded);
        }
        Some(remains)
    }

    pub fn bank_report(&self) -> String {
        match self.bank_remains() {
            Some(remains) => format!("Bank has {}.\n", self.money(remains)),
            None => "Bank size is not set.\n".to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Shares
    // ------------------------------------------------------------------

    /// Add `delta` shares of `company` to `owner`. Overselling empties the holding.
    pub fn change_shares(&mut self, owner: &str, company: &str, delta: i64) -> String {
        let holding = self
            .shares
            .entry(owner.to_string())
            .or_default()
            .entry(company.to_string())
            .or_insert(0);

        if holding.saturating_add(delta) < 0 {
            let had = *holding;
            *holding = 0;
            return format!("{owner} only has {had}, selling all.\n");
        }

        *holding = holding.saturating_add(delta);
        match delta {
            d if d > 0 => format!("{owner} buys {d} {company} and now has {holding}.\n"),
            d if d < 0 => format!(
                "{owner} sells {} {company} and now has {holding}.\n",
                d.unsigned_abs()
            ),
            _ => String::new(),
        }
    }

    /// Without a `source` the shares are new and any payment leaves play.
    pub fn buy_shares(
        &mut self,
        actor: &str,
        company: &str,
        quantity: i64,
        price: i64,
        source: Option<&str>,
    ) -> String {
        let mut feedback = self.change_shares(actor, company, quantity);
        let cost = price.saturating_mul(quantity);

        match source {
            Some(source) => {
                feedback.push_str(&self.change_shares(source, company, quantity.saturating_neg()));
                if price > 0 {
                    feedback.push_str(&self.move_cash(actor, source, cost));
                }
            }
            None if price > 0 => {
                feedback.push_str(&self.change_cash(actor, cost.saturating_neg()));
            }
            None => {}
        }
        feedback
    }

    pub fn sell_shares(&mut self, actor: &str, company: &str, quantity: i64, price: i64) -> String {
        let mut feedback = self.change_shares(actor, company, quantity.saturating_neg());
        if price > 0 {
            feedback.push_str(&self.change_cash(actor, price.saturating_mul(quantity)));
        }
        feedback
    }

    // ------------------------------------------------------------------
    // Money
    // ------------------------------------------------------------------

    /// Credit (or debit) a party. Floated companies use their treasury.
    pub fn change_cash(&mut self, target: &str, sum: i64) -> String {
        let account = match self.treasuries.get_mut(target) {
            Some(treasury) => treasury,
            None => self.cash.entry(target.to_string()).or_insert(0),
        };
        *account = account.saturating_add(sum);
        let balance = *account;
        format!("{target} now has {}.\n", self.money(balance))
    }

    pub fn move_cash(&mut self, source: &str, target: &str, amount: i64) -> String {
        let mut feedback = self.change_cash(source, amount.saturating_neg());
        feedback.push_str(&self.change_cash(target, amount));
        feedback
    }

    pub fn pay_dividends(&mut self, company: &str, per_share: i64) -> String {
        self.distribute(company, per_share, 1)
    }

    /// Company keeps part of `total`; the rest is paid over ten shares.
    pub fn pay_half_dividends(&mut self, company: &str, total: i64) -> String {
        let retained = self.parameters.rounding.retained(total);
        let distributed = total.saturating_sub(retained);

        let mut feedback = format!(
            "{company} retains {} and pays {} per share.\n",
            self.money(retained),
            distributed as f64 / 10.0
        );
        self.change_cash(company, retained);
        feedback.push_str(&self.distribute(company, distributed, 10));
        feedback
    }

    /// Pay every holder `floor(holding * numerator / denominator)`.
    fn distribute(&mut self, company: &str, numerator: i64, denominator: i64) -> String {
        let mut feedback = String::new();
        for (owner, holding) in self.holders(company) {
            let payout = holding.saturating_mul(numerator).div_euclid(denominator);
            if payout == 0 {
                continue;
            }
            self.change_cash(&owner, payout);
            feedback.push_str(&format!(
                "{company} pays {owner} {} for {holding} shares.\n",
                self.money(payout)
            ));
        }
        if feedback.is_empty() {
            feedback = format!("{company} pays nothing.\n");
        }
        feedback
    }

    // ------------------------------------------------------------------
    // Companies
    // ------------------------------------------------------------------

    pub fn set_value(&mut self, company: &str, value: Option<i64>) -> Result<String, CommandError> {
        let value = value.ok_or(CommandError::NotANumber("value"))?;
        self.values.insert(company.to_string(), value);
        Ok(format!("{company} value set to {value}.\n"))
    }

    pub fn float(&mut self, company: &str, cash: i64) -> String {
        self.treasuries.insert(company.to_string(), cash);
        format!("{company} floats with {}.\n", self.money(cash))
    }

    /// Remove a company's money and every share of it. Its history stays in the log.
    pub fn close(&mut self, company: &str) -> String {
        self.treasuries.remove(company);
        self.cash.remove(company);
        let mut returned: i64 = 0;
        for owned in self.shares.values_mut() {
            returned = owned.remove(company).unwrap_or(0).saturating_add(returned);
        }
        format!("{company} closed, {returned} shares removed from play.\n")
    }

    // ------------------------------------------------------------------
    // Bank, income, rounds, parameters
    // ------------------------------------------------------------------

    /// Overwrites the bank size; no symbol means the default currency.
    pub fn set_bank_size(&mut self, size: i64, currency: Option<&str>) -> Result<String, CommandError> {
        if size == 0 {
            return Err(CommandError::NotANumber("bank size"));
        }
        self.bank.size = Some(size);
        self.bank.currency = currency.unwrap_or(self.default_currency.as_str()).to_string();
        Ok(format!("Bank size set to {}.\n", self.money(size)))
    }

    pub fn set_income(&mut self, party: &str, income: Option<i64>) -> Result<String, CommandError> {
        let income = income.ok_or(CommandError::NotANumber("income"))?;
        self.incomes.insert(party.to_string(), income);
        Ok(format!("{party} income set to {}.\n", self.money(income)))
    }

    /// Credit every positive income once, to current players and companies only.
    pub fn pay_income(&mut self) -> String {
        let roster = classify(self);
        let payouts: Vec<(String, i64)> = roster
            .players
            .into_iter()
            .chain(roster.companies)
            .map(|party| {
                let income = self.income(&party);
                (party, income)
            })
            .filter(|(_, income)| *income > 0)
            .collect();

        let mut feedback = String::new();
        for (party, income) in payouts {
            self.change_cash(&party, income);
            feedback.push_str(&format!("{party} receives {} income.\n", self.money(income)));
        }
        feedback
    }

    /// Start the next round. Operating rounds pay income on entry.
    pub fn next_round(&mut self, kind: RoundKind) -> String {
        let round = Round::advance(self.round, kind);
        self.round = Some(round);
        let mut feedback = format!("{}\n", round.describe());
        if kind == RoundKind::Operating {
            feedback.push_str(&self.pay_income());
        }
        feedback
    }

    pub fn set_rounding(&mut self, token: &str) -> String {
        self.parameters.rounding = Rounding::parse(token);
        format!("Rounding set to {token}.\n")
    }

    pub fn enable_company_credits(&mut self) -> String {
        self.parameters.company_credits = true;
        "Company credits on: treasuries are funded outside the bank.\n".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_shares_buy_sell_and_oversell() {
        let mut ledger = Ledger::default();
        let feedback = ledger.change_shares("MIKKO", "LSWR", 3);
        assert_eq!(ledger.holding("MIKKO", "LSWR"), 3);
        assert_eq!(feedback, "MIKKO buys 3 LSWR and now has 3.\n");

        let feedback = ledger.change_shares("MIKKO", "LSWR", -2);
        assert_eq!(ledger.holding("MIKKO", "LSWR"), 1);
        assert_eq!(feedback, "MIKKO sells 2 LSWR and now has 1.\n");

        let feedback = ledger.change_shares("MIKKO", "LSWR", -2);
        assert_eq!(ledger.holding("MIKKO", "LSWR"), 0);
        assert_eq!(feedback, "MIKKO only has 1, selling all.\n");
    }

    #[test]
    fn test_oversell_never_goes_negative() {
        let mut ledger = Ledger::default();
        for delta in [5, -3, -10, 2, i64::MIN, 7, -7, -1] {
            ledger.change_shares("ANNI", "CR", delta);
            assert!(ledger.holding("ANNI", "CR") >= 0, "after {delta}");
        }
    }

    #[test]
    fn test_buy_without_source_pays_into_nowhere() {
        let mut ledger = Ledger::default();
        ledger.change_cash("MIKKO", 500);
        ledger.buy_shares("MIKKO", "CR", 2, 100, None);
        assert_eq!(ledger.holding("MIKKO", "CR"), 2);
        assert_eq!(ledger.cash("MIKKO"), 300);
    }

    #[test]
    fn test_buy_from_source_moves_shares_and_money() {
        let mut ledger = Ledger::default();
        ledger.float("GT", 0);
        ledger.change_shares("GT", "GT", 10);
        ledger.buy_shares("MIKKO", "GT", 5, 80, Some("GT"));
        assert_eq!(ledger.holding("MIKKO", "GT"), 5);
        assert_eq!(ledger.holding("GT", "GT"), 5);
        assert_eq!(ledger.cash("MIKKO"), -400);
        assert_eq!(ledger.treasury("GT"), Some(400));
    }

    #[test]
    fn test_self_trade_nets_to_zero() {
        let mut ledger = Ledger::default();
        ledger.change_shares("MIKKO", "CR", 2);
        ledger.change_cash("MIKKO", 100);
        ledger.buy_shares("MIKKO", "CR", 1, 50, Some("MIKKO"));
        assert_eq!(ledger.holding("MIKKO", "CR"), 2);
        assert_eq!(ledger.cash("MIKKO"), 100);
    }

    #[test]
    fn test_sell_with_price_credits_seller() {
        let mut ledger = Ledger::default();
        ledger.change_shares("NOOA", "CR", 3);
        ledger.sell_shares("NOOA", "CR", 2, 90);
        assert_eq!(ledger.holding("NOOA", "CR"), 1);
        assert_eq!(ledger.cash("NOOA"), 180);
    }

    #[test]
    fn test_change_cash_routes_to_treasury_when_floated() {
        let mut ledger = Ledger::default();
        ledger.change_cash("CR", 50);
        assert_eq!(ledger.cash("CR"), 50);

        ledger.float("CR", 300);
        let feedback = ledger.change_cash("CR", -100);
        assert_eq!(ledger.treasury("CR"), Some(200));
        assert_eq!(ledger.cash("CR"), 50);
        assert_eq!(feedback, "CR now has $200.\n");
    }

    #[test]
    fn test_move_cash() {
        let mut ledger = Ledger::default();
        ledger.change_cash("MIKKO", 100);
        ledger.move_cash("MIKKO", "NOOA", 30);
        assert_eq!(ledger.cash("MIKKO"), 70);
        assert_eq!(ledger.cash("NOOA"), 30);
    }

    #[test]
    fn test_pay_dividends_skips_zero_holders() {
        let mut ledger = Ledger::default();
        ledger.change_shares("MIKKO", "CR", 4);
        ledger.change_shares("NOOA", "CR", 2);
        ledger.change_shares("ANNI", "CR", 1);
        ledger.change_shares("ANNI", "CR", -1);

        let feedback = ledger.pay_dividends("CR", 10);
        assert_eq!(ledger.cash("MIKKO"), 40);
        assert_eq!(ledger.cash("NOOA"), 20);
        assert_eq!(ledger.cash("ANNI"), 0);
        assert!(feedback.contains("CR pays MIKKO $40 for 4 shares."));
        assert!(!feedback.contains("ANNI"));
    }

    #[test]
    fn test_self_held_shares_are_paid() {
        let mut ledger = Ledger::default();
        ledger.float("CR", 100);
        ledger.change_shares("CR", "CR", 2);
        ledger.pay_dividends("CR", 10);
        assert_eq!(ledger.treasury("CR"), Some(120));
    }

    #[test]
    fn test_half_dividend_default_rounding() {
        let mut ledger = Ledger::default();
        ledger.float("X", 0);
        ledger.change_shares("MIKKO", "X", 1);
        ledger.pay_half_dividends("X", 230);
        assert_eq!(ledger.treasury("X"), Some(110));
        assert_eq!(ledger.cash("MIKKO"), 12);
    }

    #[test]
    fn test_half_dividend_rounding_up() {
        let mut ledger = Ledger::default();
        ledger.set_rounding("UP");
        ledger.float("X", 0);
        ledger.change_shares("MIKKO", "X", 1);
        ledger.pay_half_dividends("X", 230);
        assert_eq!(ledger.treasury("X"), Some(120));
        assert_eq!(ledger.cash("MIKKO"), 11);
    }

    #[test]
    fn test_half_dividend_1837_pays_fractional_per_share() {
        let mut ledger = Ledger::default();
        ledger.set_rounding("1837");
        ledger.float("X", 0);
        ledger.change_shares("X", "X", 3);
        let feedback = ledger.pay_half_dividends("X", 50);
        // 25 retained plus floor(3 * 2.5) paid to its own shares
        assert_eq!(ledger.treasury("X"), Some(32));
        assert!(feedback.contains("X retains $25 and pays 2.5 per share."));
        assert!(feedback.contains("X pays X $7 for 3 shares."));
    }

    #[test]
    fn test_rounding_retained_amounts() {
        assert_eq!(Rounding::Down.retained(230), 110);
        assert_eq!(Rounding::Up.retained(230), 120);
        assert_eq!(Rounding::Up.retained(240), 120);
        assert_eq!(Rounding::Exact.retained(50), 25);
        assert_eq!(Rounding::parse("WHATEVER"), Rounding::Down);
    }

    #[test]
    fn test_set_value_rejects_non_numbers() {
        let mut ledger = Ledger::default();
        let feedback = ledger.set_value("LNWR", Some(134)).unwrap();
        assert_eq!(feedback, "LNWR value set to 134.\n");
        assert_eq!(ledger.value("LNWR"), 134);

        let before = ledger.clone();
        let error = ledger.set_value("LNWR", None).unwrap_err();
        assert_eq!(error.to_string(), "Value is not a number!");
        assert_eq!(ledger, before);
        assert_eq!(ledger.value("NON_EXISTING_COMPANY"), 0);
    }

    #[test]
    fn test_close_purges_company() {
        let mut ledger = Ledger::default();
        ledger.float("GT", 0);
        ledger.change_shares("GT", "GT", 10);
        ledger.buy_shares("MIKKO", "GT", 5, 80, Some("GT"));
        ledger.buy_shares("NOOA", "GT", 5, 80, Some("GT"));
        ledger.change_shares("MIKKO", "CR", 1);

        ledger.close("GT");
        assert_eq!(ledger.treasury("GT"), None);
        assert!(!ledger.has_share_entry("GT"));
        assert_eq!(ledger.holding("MIKKO", "CR"), 1);

        let roster = classify(&ledger);
        assert!(roster.players.contains(&"MIKKO".to_string()));
        assert!(roster.players.contains(&"NOOA".to_string()));
        assert!(!roster.is_company("GT"));
    }

    #[test]
    fn test_bank_remains() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.bank_remains(), None);

        ledger.set_bank_size(4000, None).unwrap();
        ledger.change_cash("MIKKO", 1000);
        assert_eq!(ledger.bank_remains(), Some(3000));

        ledger.float("CR", 670);
        assert_eq!(ledger.bank_remains(), Some(2330));

        ledger.enable_company_credits();
        assert_eq!(ledger.bank_remains(), Some(3000));
    }

    #[test]
    fn test_bank_size_overwrites_and_sets_currency() {
        let mut ledger = Ledger::default();
        ledger.set_bank_size(4000, Some("£")).unwrap();
        assert_eq!(ledger.bank().currency, "£");
        ledger.set_bank_size(12000, None).unwrap();
        assert_eq!(ledger.bank().size, Some(12000));
        assert_eq!(ledger.bank().currency, "$");
        assert!(ledger.set_bank_size(0, Some("WORD")).is_err());
        assert_eq!(ledger.bank().size, Some(12000));
    }

    #[test]
    fn test_operating_round_pays_income_stock_round_does_not() {
        let mut ledger = Ledger::default();
        ledger.change_cash("MIKKO", 0);
        ledger.change_cash("NOOA", 0);
        ledger.set_income("MIKKO", Some(25)).unwrap();
        ledger.set_income("NOOA", Some(0)).unwrap();

        let feedback = ledger.next_round(RoundKind::Stock);
        assert_eq!(ledger.cash("MIKKO"), 0);
        assert_eq!(feedback, "Stock round 1 begins.\n");

        let feedback = ledger.next_round(RoundKind::Operating);
        assert_eq!(ledger.cash("MIKKO"), 25);
        assert!(feedback.contains("MIKKO receives $25 income."));
        assert!(!feedback.contains("NOOA"));
        assert_eq!(ledger.round().map(|r| r.to_string()).as_deref(), Some("OR 1.1"));
    }

    #[test]
    fn test_set_income_rejects_non_numbers() {
        let mut ledger = Ledger::default();
        assert_eq!(
            ledger.set_income("MIKKO", None),
            Err(CommandError::NotANumber("income"))
        );
        assert_eq!(ledger.income("MIKKO"), 0);
    }

    #[test]
    fn test_classification_is_disjoint() {
        let mut ledger = Ledger::default();
        ledger.change_cash("MIKKO", 10);
        ledger.change_shares("NOOA", "CR", 2);
        ledger.change_shares("CR", "NBR", 1);
        ledger.float("GT", 100);
        ledger.change_cash("GT", 5);

        let roster = classify(&ledger);
        assert_eq!(roster.players, vec!["MIKKO", "NOOA"]);
        assert_eq!(roster.companies, vec!["CR", "GT", "NBR"]);
        assert!(roster.players.iter().all(|p| !roster.is_company(p)));
    }

    #[test]
    fn test_worth_counts_share_values() {
        let mut ledger = Ledger::default();
        ledger.change_cash("MIKKO", 40);
        ledger.change_shares("MIKKO", "CR", 4);
        ledger.set_value("CR", Some(100)).unwrap();
        assert_eq!(ledger.worth("MIKKO"), 440);
    }

    #[test]
    fn test_income_goes_only_to_parties_in_play() {
        let mut ledger = Ledger::default();
        ledger.float("GT", 100);
        ledger.set_income("GT", Some(50)).unwrap();
        ledger.change_shares("MIKKO", "GT", 2);
        ledger.close("GT");
        ledger.set_income("ANNI", Some(25)).unwrap();
        ledger.float("CR", 100);
        ledger.set_income("CR", Some(30)).unwrap();

        let feedback = ledger.next_round(RoundKind::Operating);
        assert_eq!(ledger.cash("GT"), 0);
        assert_eq!(ledger.cash("ANNI"), 0);
        assert_eq!(ledger.treasury("CR"), Some(130));
        assert_eq!(feedback, "Operating round 0.1 begins.\nCR receives $30 income.\n");

        let roster = classify(&ledger);
        assert_eq!(roster.players, vec!["MIKKO"]);
        assert_eq!(roster.companies, vec!["CR"]);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let mut ledger = Ledger::default();
        ledger.set_bank_size(4000, None).unwrap();
        ledger.change_cash("A", i64::MAX);
        ledger.change_cash("B", 1);
        assert_eq!(ledger.total_cash(), i64::MAX);

        ledger.float("X", i64::MAX);
        assert_eq!(ledger.bank_remains(), Some(i64::MIN));

        ledger.set_value("X", Some(i64::MAX)).unwrap();
        ledger.change_shares("A", "X", i64::MAX);
        ledger.change_shares("A", "X", 1);
        ledger.change_shares("B", "X", i64::MAX);
        assert_eq!(ledger.holding("A", "X"), i64::MAX);
        assert_eq!(ledger.worth("A"), i64::MAX);

        let feedback = ledger.close("X");
        assert_eq!(feedback, format!("X closed, {} shares removed from play.\n", i64::MAX));
    }
}
