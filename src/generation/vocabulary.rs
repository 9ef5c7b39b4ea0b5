//! Capability Vocabulary
//!
//! The closed table of generators a directive may name. Every capability is also
//! reachable under a `db_` prefixed alias (`db_city`, `db_words(2)`, ...).

use crate::error::EvalError;
use crate::generation::dates::{self, DEFAULT_DATE_FORMAT};
use crate::generation::evaluator::GenerationContext;
use crate::generation::fixtures::Fixture;
use crate::generation::{random, standard};
use crate::value::Value;

/// Prefix accepted in front of any capability name.
pub const ALIAS_PREFIX: &str = "db_";

/// Upper bound for count arguments (`words(n)`, `characters(n)`, ...).
pub const MAX_COUNT: usize = 100_000;

/// One generator in the vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    FullName,
    FirstName,
    LastName,
    NamePrefix,
    NameSuffix,
    Title,
    StreetAddress,
    SecondaryAddress,
    City,
    State,
    StateAbbr,
    ZipCode,
    Country,
    CreditCardNumber,
    CreditCardType,
    PhoneNumber,
    CellPhone,
    CompanyName,
    CatchPhrase,
    Words,
    Sentence,
    Sentences,
    Paragraphs,
    Characters,
    EmailAddress,
    DomainName,
    UserName,
    Url,
    Today,
    Tomorrow,
    Yesterday,
    DaysFromToday,
    DaysAgo,
    Month,
    MonthAbbr,
    DayOfWeek,
    DayOfWeekAbbr,
    Randomize,
    Sequential,
    Mask,
}

/// Table entry describing how a capability is called
#[derive(Debug, Clone, Copy)]
pub struct CapabilitySpec {
    pub capability: Capability,
    pub name: &'static str,
    /// Human-readable parameter list, e.g. `n = 3`
    pub params: &'static str,
    pub summary: &'static str,
    /// Called on an integer receiver (`5.days_ago`) rather than bare
    pub takes_receiver: bool,
}

const fn entry(
    capability: Capability,
    name: &'static str,
    params: &'static str,
    summary: &'static str,
) -> CapabilitySpec {
    CapabilitySpec {
        capability,
        name,
        params,
        summary,
        takes_receiver: false,
    }
}

const fn offset_entry(
    capability: Capability,
    name: &'static str,
    summary: &'static str,
) -> CapabilitySpec {
    CapabilitySpec {
        capability,
        name,
        params: "format = '%D'",
        summary,
        takes_receiver: true,
    }
}

pub const VOCABULARY: &[CapabilitySpec] = &[
    entry(Capability::FullName, "full_name", "", "full person name"),
    entry(Capability::FirstName, "first_name", "", "given name"),
    entry(Capability::LastName, "last_name", "", "family name"),
    entry(Capability::NamePrefix, "name_prefix", "", "honorific such as Mr."),
    entry(Capability::NameSuffix, "name_suffix", "", "suffix such as Jr."),
    entry(Capability::Title, "title", "", "job title"),
    entry(
        Capability::StreetAddress,
        "street_address",
        "include_secondary = false",
        "building number and street",
    ),
    entry(Capability::SecondaryAddress, "secondary_address", "", "apartment or suite"),
    entry(Capability::City, "city", "", "city name"),
    entry(Capability::State, "state", "", "state name"),
    entry(Capability::StateAbbr, "state_abbr", "", "state abbreviation"),
    entry(Capability::ZipCode, "zip_code", "", "postal code"),
    entry(Capability::Country, "country", "", "country name"),
    entry(Capability::CreditCardNumber, "credit_card_number", "", "card number"),
    entry(Capability::CreditCardType, "credit_card_type", "", "card issuer"),
    entry(Capability::PhoneNumber, "phone_number", "", "phone number without extension"),
    entry(Capability::CellPhone, "cell_phone", "", "cell number without extension"),
    entry(Capability::CompanyName, "company_name", "", "company name"),
    entry(Capability::CatchPhrase, "catch_phrase", "", "company catch phrase"),
    entry(Capability::Words, "words", "n = 3", "n words separated by spaces"),
    entry(Capability::Sentence, "sentence", "min_words = 4", "one sentence"),
    entry(Capability::Sentences, "sentences", "n = 3", "n sentences separated by spaces"),
    entry(Capability::Paragraphs, "paragraphs", "n = 3", "n paragraphs separated by blank lines"),
    entry(Capability::Characters, "characters", "n = 255", "n random alphanumeric characters"),
    entry(Capability::EmailAddress, "email_address", "name = nil", "email address"),
    entry(Capability::DomainName, "domain_name", "", "domain name"),
    entry(Capability::UserName, "user_name", "", "user name"),
    entry(Capability::Url, "url", "", "http URL"),
    entry(Capability::Today, "today", "format = '%D'", "today's date"),
    entry(Capability::Tomorrow, "tomorrow", "format = '%D'", "tomorrow's date"),
    entry(Capability::Yesterday, "yesterday", "format = '%D'", "yesterday's date"),
    offset_entry(Capability::DaysFromToday, "days_from_today", "N.days_from_today: N days ahead"),
    offset_entry(Capability::DaysAgo, "days_ago", "N.days_ago: N days back"),
    entry(Capability::Month, "month", "", "month name"),
    entry(Capability::MonthAbbr, "month_abbr", "", "abbreviated month name"),
    entry(Capability::DayOfWeek, "day_of_week", "", "weekday name"),
    entry(Capability::DayOfWeekAbbr, "day_of_week_abbr", "", "abbreviated weekday name"),
    entry(Capability::Randomize, "randomize", "collection | lo..hi", "uniform pick"),
    entry(Capability::Sequential, "sequential", "collection", "next element in round-robin order"),
    entry(Capability::Mask, "mask", "pattern", "# digit, A upper, a lower, others kept"),
];

/// Find a capability by name or `db_` alias.
pub fn lookup(name: &str) -> Option<&'static CapabilitySpec> {
    let name = name.strip_prefix(ALIAS_PREFIX).unwrap_or(name);
    VOCABULARY.iter().find(|spec| spec.name == name)
}

/// Evaluated call arguments with per-position accessors.
struct Args<'a> {
    capability: &'a str,
    values: Vec<Value>,
}

impl<'a> Args<'a> {
    fn invalid(&self, message: impl Into<String>) -> EvalError {
        EvalError::invalid_arguments(self.capability, message)
    }

    fn at_most(&self, max: usize) -> Result<(), EvalError> {
        if self.values.len() > max {
            return Err(self.invalid(format!(
                "expected at most {} argument(s), got {}",
                max,
                self.values.len()
            )));
        }
        Ok(())
    }

    fn count(&self, index: usize, default: usize) -> Result<usize, EvalError> {
        match self.values.get(index) {
            None => Ok(default),
            Some(Value::Integer(n)) if *n >= 0 && (*n as u64) <= MAX_COUNT as u64 => {
                Ok(*n as usize)
            }
            Some(Value::Integer(n)) => Err(self.invalid(format!(
                "count must be between 0 and {}, got {}",
                MAX_COUNT, n
            ))),
            Some(other) => Err(self.invalid(format!("expected a count, got {}", other.kind()))),
        }
    }

    fn string(&self, index: usize, default: &str) -> Result<String, EvalError> {
        match self.values.get(index) {
            None => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.invalid(format!("expected a string, got {}", other.kind()))),
        }
    }

    fn optional_string(&self, index: usize) -> Result<Option<String>, EvalError> {
        match self.values.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.invalid(format!("expected a string, got {}", other.kind()))),
        }
    }

    fn flag(&self, index: usize, default: bool) -> Result<bool, EvalError> {
        match self.values.get(index) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.invalid(format!("expected true or false, got {}", other.kind()))),
        }
    }

    fn required(&self, index: usize, what: &str) -> Result<&Value, EvalError> {
        self.values
            .get(index)
            .ok_or_else(|| self.invalid(format!("missing {}", what)))
    }
}

/// Argument shape of `randomize`, after list/range evaluation.
pub enum Collection {
    Items(Vec<Value>),
    Range(i64, i64),
}

impl CapabilitySpec {
    /// Run this capability with already-evaluated arguments.
    ///
    /// `range` carries the bounds when `randomize` was given `lo..hi` directly,
    /// so the range is sampled without being expanded.
    pub fn invoke(
        &self,
        ctx: &mut GenerationContext<'_>,
        receiver: Option<i64>,
        args: Vec<Value>,
        range: Option<(i64, i64)>,
    ) -> Result<Value, EvalError> {
        let args = Args {
            capability: self.name,
            values: args,
        };

        match (self.takes_receiver, receiver) {
            (true, None) => {
                return Err(args.invalid(format!(
                    "needs a day count, e.g. 5.{}",
                    self.name
                )))
            }
            (false, Some(n)) => {
                return Err(args.invalid(format!("cannot be called on {}", n)));
            }
            _ => {}
        }

        let text = |fixture: Fixture, ctx: &mut GenerationContext<'_>| -> Result<Value, EvalError> {
            args.at_most(0)?;
            Ok(Value::String(ctx.fixture(&fixture)))
        };

        match self.capability {
            Capability::FullName => text(Fixture::FullName, ctx),
            Capability::FirstName => text(Fixture::FirstName, ctx),
            Capability::LastName => text(Fixture::LastName, ctx),
            Capability::NamePrefix => text(Fixture::NamePrefix, ctx),
            Capability::NameSuffix => text(Fixture::NameSuffix, ctx),
            Capability::Title => text(Fixture::Title, ctx),
            Capability::StreetAddress => {
                args.at_most(1)?;
                let include_secondary = args.flag(0, false)?;
                Ok(Value::String(
                    ctx.fixture(&Fixture::StreetAddress { include_secondary }),
                ))
            }
            Capability::SecondaryAddress => text(Fixture::SecondaryAddress, ctx),
            Capability::City => text(Fixture::City, ctx),
            Capability::State => text(Fixture::State, ctx),
            Capability::StateAbbr => text(Fixture::StateAbbr, ctx),
            Capability::ZipCode => text(Fixture::ZipCode, ctx),
            Capability::Country => text(Fixture::Country, ctx),
            Capability::CreditCardNumber => text(Fixture::CreditCardNumber, ctx),
            Capability::CreditCardType => text(Fixture::CreditCardType, ctx),
            Capability::PhoneNumber => {
                args.at_most(0)?;
                Ok(Value::String(standard::phone_number(ctx, Fixture::PhoneNumber)))
            }
            Capability::CellPhone => {
                args.at_most(0)?;
                Ok(Value::String(standard::phone_number(ctx, Fixture::CellPhone)))
            }
            Capability::CompanyName => text(Fixture::CompanyName, ctx),
            Capability::CatchPhrase => text(Fixture::CatchPhrase, ctx),
            Capability::Words => {
                args.at_most(1)?;
                let count = args.count(0, 3)?;
                Ok(Value::String(standard::words(ctx, count)))
            }
            Capability::Sentence => {
                args.at_most(1)?;
                let min_words = args.count(0, 4)?;
                Ok(Value::String(standard::sentence(ctx, min_words)))
            }
            Capability::Sentences => {
                args.at_most(1)?;
                let count = args.count(0, 3)?;
                Ok(Value::String(standard::sentences(ctx, count)))
            }
            Capability::Paragraphs => {
                args.at_most(1)?;
                let count = args.count(0, 3)?;
                Ok(Value::String(standard::paragraphs(ctx, count)))
            }
            Capability::Characters => {
                args.at_most(1)?;
                let count = args.count(0, 255)?;
                Ok(Value::String(random::characters(ctx.rng(), count)))
            }
            Capability::EmailAddress => {
                args.at_most(1)?;
                let name = args.optional_string(0)?;
                Ok(Value::String(ctx.fixture(&Fixture::EmailAddress { name })))
            }
            Capability::DomainName => text(Fixture::DomainName, ctx),
            Capability::UserName => text(Fixture::UserName, ctx),
            Capability::Url => text(Fixture::Url, ctx),
            Capability::Today | Capability::Tomorrow | Capability::Yesterday => {
                args.at_most(1)?;
                let format = args.string(0, DEFAULT_DATE_FORMAT)?;
                let days = match self.capability {
                    Capability::Tomorrow => 1,
                    Capability::Yesterday => -1,
                    _ => 0,
                };
                let date = dates::shift(ctx.today(), days)?;
                Ok(Value::String(dates::format_date(date, &format)?))
            }
            Capability::DaysFromToday | Capability::DaysAgo => {
                args.at_most(1)?;
                let format = args.string(0, DEFAULT_DATE_FORMAT)?;
                let n = receiver.unwrap_or_default();
                let days = if self.capability == Capability::DaysAgo {
                    n.checked_neg()
                        .ok_or_else(|| args.invalid(format!("{} days is out of range", n)))?
                } else {
                    n
                };
                let date = dates::shift(ctx.today(), days)?;
                Ok(Value::String(dates::format_date(date, &format)?))
            }
            Capability::Month => pick_name(ctx, &args, &dates::MONTH_NAMES),
            Capability::MonthAbbr => pick_name(ctx, &args, &dates::MONTH_ABBRS),
            Capability::DayOfWeek => pick_name(ctx, &args, &dates::DAY_NAMES),
            Capability::DayOfWeekAbbr => pick_name(ctx, &args, &dates::DAY_ABBRS),
            Capability::Randomize => {
                args.at_most(1)?;
                match collection_arg(&args, range)? {
                    Collection::Items(items) => random::randomize_sequence(ctx.rng(), &items),
                    Collection::Range(lo, hi) => random::randomize_range(ctx.rng(), lo, hi),
                }
            }
            Capability::Sequential => {
                args.at_most(1)?;
                match args.required(0, "collection")? {
                    Value::Sequence(items) => ctx
                        .next_in_sequence(items)
                        .ok_or_else(|| args.invalid("collection is empty")),
                    other => Err(args.invalid(format!(
                        "expected a collection, got {}",
                        other.kind()
                    ))),
                }
            }
            Capability::Mask => {
                args.at_most(1)?;
                match args.required(0, "pattern")? {
                    Value::String(pattern) => {
                        Ok(Value::String(random::mask(ctx.rng(), pattern)))
                    }
                    other => Err(args.invalid(format!("expected a pattern, got {}", other.kind()))),
                }
            }
        }
    }
}

fn pick_name(
    ctx: &mut GenerationContext<'_>,
    args: &Args<'_>,
    names: &[&str],
) -> Result<Value, EvalError> {
    args.at_most(0)?;
    random::pick(ctx.rng(), names)
        .map(|name| Value::String(name.to_string()))
        .ok_or_else(|| args.invalid("no names to pick from"))
}

fn collection_arg(args: &Args<'_>, range: Option<(i64, i64)>) -> Result<Collection, EvalError> {
    if let Some((lo, hi)) = range {
        return Ok(Collection::Range(lo, hi));
    }
    match args.required(0, "collection")? {
        Value::Sequence(items) => Ok(Collection::Items(items.clone())),
        other => Err(args.invalid(format!("expected a collection or range, got {}", other.kind()))),
    }
}
