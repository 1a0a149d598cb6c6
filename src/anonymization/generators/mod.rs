//! Value generators
//!
//! Each [`Generator`] produces one substitute string from a caller-supplied
//! random source. Generators are plain data so rule tables can be `static`.

pub mod pool;

use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

/// Days per year used when stepping birth dates back
const DAYS_PER_YEAR: u64 = 365;

/// A substitute-value generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// Nine digits: three, two and four digit blocks drawn independently
    Ssn,
    /// `YYYY-MM-DD`, between 30 and 51 years before the reference date
    BirthDate,
    /// Random house number followed by the fixed street name
    StreetAddress,
    /// Fixed value
    Literal(&'static str),
    /// One entry of the organization pool
    OrganizationName,
    /// `prefix` followed by a uniform integer in `low..=high`
    Prefixed {
        /// Text placed before the number
        prefix: &'static str,
        /// Smallest number drawn
        low: u64,
        /// Largest number drawn
        high: u64,
    },
    /// `userNNNN@example.com`
    EmailAddress,
}

impl Generator {
    /// `555` followed by seven digits
    pub const PHONE_NUMBER: Generator = Generator::Prefixed {
        prefix: "555",
        low: 1_000_000,
        high: 9_999_999,
    };

    /// Integer age in `30..=50`
    pub const AGE_YEARS: Generator = Generator::Prefixed {
        prefix: "",
        low: 30,
        high: 50,
    };

    /// Produce a substitute value
    ///
    /// `today` anchors date generators; the engine passes the local date.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, today: NaiveDate) -> String {
        match *self {
            Generator::Ssn => format!(
                "{}{}{}",
                rng.gen_range(100..=999),
                rng.gen_range(10..=99),
                rng.gen_range(1000..=9999)
            ),
            Generator::BirthDate => birth_date(rng, today).format("%Y-%m-%d").to_string(),
            Generator::StreetAddress => {
                format!("{} {}", rng.gen_range(100..=9999), pool::STREET_NAME)
            }
            Generator::Literal(value) => value.to_string(),
            Generator::OrganizationName => pick(rng, pool::ORGANIZATION_NAMES).to_string(),
            Generator::Prefixed { prefix, low, high } => {
                format!("{}{}", prefix, rng.gen_range(low..=high))
            }
            Generator::EmailAddress => format!(
                "user{}@{}",
                rng.gen_range(1000..=9999),
                pool::EMAIL_DOMAIN
            ),
        }
    }
}

/// A first / middle / last triple drawn together for one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    /// First name
    pub first: &'static str,
    /// Middle initial
    pub middle: &'static str,
    /// Last name
    pub last: &'static str,
}

impl PersonName {
    /// Draw a name from the static pools
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            first: pick(rng, pool::FIRST_NAMES),
            middle: pick(rng, pool::MIDDLE_INITIALS),
            last: pick(rng, pool::LAST_NAMES),
        }
    }

    /// `"{first} {middle} {last}"`
    pub fn unparsed(&self) -> String {
        format!("{} {} {}", self.first, self.middle, self.last)
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &'static [&'static str]) -> &'static str {
    // Pools are non-empty static data
    pool.choose(rng).copied().unwrap_or_default()
}

fn birth_date<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> NaiveDate {
    let years: u64 = rng.gen_range(30..=50);
    let extra_days: u64 = rng.gen_range(0..=365);
    today
        .checked_sub_days(Days::new(years * DAYS_PER_YEAR + extra_days))
        .unwrap_or(NaiveDate::MIN)
}
