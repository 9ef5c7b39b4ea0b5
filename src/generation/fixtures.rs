//! Fixture Sources
//!
//! The boundary to realistic-looking fake data (names, addresses, lorem text).
//! Capabilities ask a [`FixtureSource`] for one [`Fixture`] at a time; the default
//! source is backed by the `fake` crate's English locale.

use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, SecondaryAddress, StateAbbr, StateName, StreetName,
    ZipCode,
};
use fake::faker::company::en::{Buzzword, BuzzwordMiddle, BuzzwordTail, CompanyName};
use fake::faker::creditcard::en::CreditCardNumber;
use fake::faker::internet::en::{DomainSuffix, FreeEmailProvider, Username};
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name, Suffix, Title as NamePrefix};
use fake::Fake;
use rand::rngs::StdRng;
use rand::Rng;

/// Issuer names handed out by `credit_card_type`.
pub const CREDIT_CARD_TYPES: &[&str] = &[
    "visa",
    "mastercard",
    "american_express",
    "discover",
    "diners_club",
    "jcb",
    "switch",
    "solo",
    "dankort",
    "maestro",
    "forbrugsforeningen",
    "laser",
];

/// One kind of fixture value a source can produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fixture {
    FullName,
    FirstName,
    LastName,
    NamePrefix,
    NameSuffix,
    Title,
    StreetAddress { include_secondary: bool },
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
    Word,
    Sentence { min_words: usize },
    Paragraph,
    EmailAddress { name: Option<String> },
    DomainName,
    UserName,
    Url,
}

/// Producer of fixture values.
///
/// Implementations must draw all randomness from `rng` so a seeded evaluator
/// produces repeatable output.
pub trait FixtureSource: Send + Sync {
    fn produce(&self, fixture: &Fixture, rng: &mut StdRng) -> String;
}

/// Fixture source backed by the `fake` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeFixtures;

impl FakeFixtures {
    fn domain_name(rng: &mut StdRng) -> String {
        let word: String = Word().fake_with_rng(rng);
        let suffix: String = DomainSuffix().fake_with_rng(rng);
        format!("{}.{}", word.to_lowercase(), suffix)
    }

    fn email_local_part(name: &str) -> String {
        let mut local = String::with_capacity(name.len());
        for c in name.chars() {
            if c.is_ascii_alphanumeric() || c == '_' {
                local.push(c.to_ascii_lowercase());
            } else if !local.is_empty() && !local.ends_with('.') {
                local.push('.');
            }
        }
        local.trim_end_matches('.').to_string()
    }
}

impl FixtureSource for FakeFixtures {
    fn produce(&self, fixture: &Fixture, rng: &mut StdRng) -> String {
        match fixture {
            Fixture::FullName => Name().fake_with_rng(rng),
            Fixture::FirstName => FirstName().fake_with_rng(rng),
            Fixture::LastName => LastName().fake_with_rng(rng),
            Fixture::NamePrefix => NamePrefix().fake_with_rng(rng),
            Fixture::NameSuffix => Suffix().fake_with_rng(rng),
            Fixture::Title => JobTitle().fake_with_rng(rng),
            Fixture::StreetAddress { include_secondary } => {
                let number: String = BuildingNumber().fake_with_rng(rng);
                let street: String = StreetName().fake_with_rng(rng);
                if *include_secondary {
                    let secondary: String = SecondaryAddress().fake_with_rng(rng);
                    format!("{} {} {}", number, street, secondary)
                } else {
                    format!("{} {}", number, street)
                }
            }
            Fixture::SecondaryAddress => SecondaryAddress().fake_with_rng(rng),
            Fixture::City => CityName().fake_with_rng(rng),
            Fixture::State => StateName().fake_with_rng(rng),
            Fixture::StateAbbr => StateAbbr().fake_with_rng(rng),
            Fixture::ZipCode => ZipCode().fake_with_rng(rng),
            Fixture::Country => CountryName().fake_with_rng(rng),
            Fixture::CreditCardNumber => CreditCardNumber().fake_with_rng(rng),
            Fixture::CreditCardType => {
                CREDIT_CARD_TYPES[rng.random_range(0..CREDIT_CARD_TYPES.len())].to_string()
            }
            Fixture::PhoneNumber => {
                fake::faker::phone_number::en::PhoneNumber().fake_with_rng(rng)
            }
            Fixture::CellPhone => fake::faker::phone_number::en::CellNumber().fake_with_rng(rng),
            Fixture::CompanyName => CompanyName().fake_with_rng(rng),
            Fixture::CatchPhrase => {
                let head: String = Buzzword().fake_with_rng(rng);
                let middle: String = BuzzwordMiddle().fake_with_rng(rng);
                let tail: String = BuzzwordTail().fake_with_rng(rng);
                format!("{} {} {}", head, middle, tail)
            }
            Fixture::Word => Word().fake_with_rng(rng),
            Fixture::Sentence { min_words } => {
                let min = (*min_words).max(1);
                Sentence(min..min + 4).fake_with_rng(rng)
            }
            Fixture::Paragraph => Paragraph(3..6).fake_with_rng(rng),
            Fixture::EmailAddress { name } => {
                let seed = match name {
                    Some(name) => name.clone(),
                    None => Username().fake_with_rng(rng),
                };
                let mut local = Self::email_local_part(&seed);
                if local.is_empty() {
                    local = Username().fake_with_rng(rng);
                }
                let provider: String = FreeEmailProvider().fake_with_rng(rng);
                format!("{}@{}", local, provider)
            }
            Fixture::DomainName => Self::domain_name(rng),
            Fixture::UserName => Username().fake_with_rng(rng),
            Fixture::Url => {
                let domain = Self::domain_name(rng);
                let path: String = Username().fake_with_rng(rng);
                format!("http://{}/{}", domain, path)
            }
        }
    }
}
