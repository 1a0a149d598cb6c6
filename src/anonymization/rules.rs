//! Field recognition rules
//!
//! A [`FieldRule`] pairs a [`Trigger`] (which elements carry the field) with
//! a [`Replacement`] (how the matched attributes are rewritten). The engine
//! walks the tree once per rule and never names an attribute itself, so new
//! MISMO fields are added here without touching traversal code.

use crate::anonymization::generators::{pool, Generator, PersonName};
use crate::anonymization::models::FieldCategory;
use crate::document::Element;
use chrono::NaiveDate;
use rand::Rng;

/// Element predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// At least one of the attributes is present
    AnyAttribute(&'static [&'static str]),
    /// Tag is one of `tags` and `attribute` is present
    TagWithAttribute {
        /// Accepted tags
        tags: &'static [&'static str],
        /// Required attribute
        attribute: &'static str,
    },
    /// `requires` is present and `attribute` equals one of `values`
    AttributeOneOf {
        /// Discriminator attribute
        attribute: &'static str,
        /// Accepted discriminator values
        values: &'static [&'static str],
        /// Attribute that must also be present
        requires: &'static str,
    },
}

impl Trigger {
    /// Whether the element satisfies the predicate
    pub fn matches(&self, element: &Element) -> bool {
        match *self {
            Trigger::AnyAttribute(names) => names.iter().any(|n| element.has_attribute(n)),
            Trigger::TagWithAttribute { tags, attribute } => {
                tags.contains(&element.tag.as_str()) && element.has_attribute(attribute)
            }
            Trigger::AttributeOneOf {
                attribute,
                values,
                requires,
            } => {
                element.has_attribute(requires)
                    && element
                        .attribute(attribute)
                        .is_some_and(|v| values.contains(&v))
            }
        }
    }
}

/// How a matched element is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// Linked first / middle / last / unparsed name fields
    PersonName,
    /// Each present attribute gets an independent value from its generator
    Attributes(&'static [(&'static str, Generator)]),
}

/// One attribute rewritten by [`FieldRule::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    /// Attribute name
    pub attribute: &'static str,
    /// Value before the rewrite
    pub previous: String,
    /// Value after the rewrite
    pub value: String,
}

/// A named, categorized (trigger, replacement) record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Stable rule name used in stats and audit output
    pub name: &'static str,
    /// PII category
    pub category: FieldCategory,
    /// Element predicate
    pub trigger: Trigger,
    /// Rewrite action
    pub replacement: Replacement,
}

const FIRST_NAME: &str = "_FirstName";
const MIDDLE_NAME: &str = "_MiddleName";
const LAST_NAME: &str = "_LastName";
const UNPARSED_NAME: &str = "_UnparsedName";

const NAME_ATTRIBUTES: &[&str] = &[FIRST_NAME, MIDDLE_NAME, LAST_NAME, UNPARSED_NAME];

const ADDRESS_FIELDS: &[(&str, Generator)] = &[
    ("_StreetAddress", Generator::StreetAddress),
    ("_City", Generator::Literal(pool::CITY)),
    ("_State", Generator::Literal(pool::STATE)),
    ("_PostalCode", Generator::Literal(pool::POSTAL_CODE)),
];

const INTERNAL_ID_FIELDS: &[(&str, Generator)] = &[
    (
        "InternalAccountIdentifier",
        Generator::Prefixed {
            prefix: "INT",
            low: 1000,
            high: 9999,
        },
    ),
    (
        "LenderCaseIdentifier",
        Generator::Prefixed {
            prefix: "",
            low: 1_000_000,
            high: 9_999_999,
        },
    ),
    (
        "_RequestedByName",
        Generator::Prefixed {
            prefix: "user",
            low: 1,
            high: 999,
        },
    ),
];

const PHONE_VALUE: &[(&str, Generator)] = &[("_Value", Generator::PHONE_NUMBER)];
const EMAIL_VALUE: &[(&str, Generator)] = &[("_Value", Generator::EmailAddress)];

const SSN_FIELD: &[(&str, Generator)] = &[("_SSN", Generator::Ssn)];
const BIRTH_DATE_FIELD: &[(&str, Generator)] = &[("_BirthDate", Generator::BirthDate)];
const AGE_FIELD: &[(&str, Generator)] = &[("_AgeYears", Generator::AGE_YEARS)];
const ORGANIZATION_NAME_FIELD: &[(&str, Generator)] = &[("_Name", Generator::OrganizationName)];
const ACCOUNT_ID_FIELD: &[(&str, Generator)] = &[(
    "_AccountIdentifier",
    Generator::Prefixed {
        prefix: "ACC",
        low: 100_000_000,
        high: 999_999_999,
    },
)];

/// Options that change the standard rule table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleOptions {
    /// Generate `userNNNN@example.com` for `_Type="Email"` contact values
    /// instead of the `555` digit string used for phones and faxes
    pub realistic_emails: bool,
}

/// Ordered collection of rules applied by the engine
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// The MISMO loan-document rule table
    pub fn standard(options: &RuleOptions) -> Self {
        // Email/Fax contact values get the phone-number generator unless
        // realistic e-mails were explicitly enabled
        let email_value = if options.realistic_emails {
            EMAIL_VALUE
        } else {
            PHONE_VALUE
        };

        let rules = vec![
            FieldRule {
                name: "person_name",
                category: FieldCategory::Name,
                trigger: Trigger::AnyAttribute(&[FIRST_NAME, LAST_NAME]),
                replacement: Replacement::PersonName,
            },
            FieldRule {
                name: "ssn",
                category: FieldCategory::Ssn,
                trigger: Trigger::AnyAttribute(&["_SSN"]),
                replacement: Replacement::Attributes(SSN_FIELD),
            },
            FieldRule {
                name: "birth_date",
                category: FieldCategory::BirthDate,
                trigger: Trigger::AnyAttribute(&["_BirthDate"]),
                replacement: Replacement::Attributes(BIRTH_DATE_FIELD),
            },
            FieldRule {
                name: "age",
                category: FieldCategory::Age,
                trigger: Trigger::AnyAttribute(&["_AgeYears"]),
                replacement: Replacement::Attributes(AGE_FIELD),
            },
            FieldRule {
                name: "address",
                category: FieldCategory::Address,
                trigger: Trigger::AnyAttribute(&[
                    "_StreetAddress",
                    "_City",
                    "_State",
                    "_PostalCode",
                ]),
                replacement: Replacement::Attributes(ADDRESS_FIELDS),
            },
            FieldRule {
                name: "creditor_name",
                category: FieldCategory::Organization,
                trigger: Trigger::TagWithAttribute {
                    tags: &["_CREDITOR"],
                    attribute: "_Name",
                },
                replacement: Replacement::Attributes(ORGANIZATION_NAME_FIELD),
            },
            FieldRule {
                name: "requesting_party_name",
                category: FieldCategory::Organization,
                trigger: Trigger::TagWithAttribute {
                    tags: &["REQUESTING_PARTY"],
                    attribute: "_Name",
                },
                replacement: Replacement::Attributes(ORGANIZATION_NAME_FIELD),
            },
            FieldRule {
                name: "contact_phone",
                category: FieldCategory::Contact,
                trigger: Trigger::AttributeOneOf {
                    attribute: "_Type",
                    values: &["Phone", "Fax"],
                    requires: "_Value",
                },
                replacement: Replacement::Attributes(PHONE_VALUE),
            },
            FieldRule {
                name: "contact_email",
                category: FieldCategory::Contact,
                trigger: Trigger::AttributeOneOf {
                    attribute: "_Type",
                    values: &["Email"],
                    requires: "_Value",
                },
                replacement: Replacement::Attributes(email_value),
            },
            FieldRule {
                name: "account_identifier",
                category: FieldCategory::AccountIdentifier,
                trigger: Trigger::AnyAttribute(&["_AccountIdentifier"]),
                replacement: Replacement::Attributes(ACCOUNT_ID_FIELD),
            },
            FieldRule {
                name: "internal_identifiers",
                category: FieldCategory::InternalIdentifier,
                trigger: Trigger::AnyAttribute(&[
                    "InternalAccountIdentifier",
                    "LenderCaseIdentifier",
                    "_RequestedByName",
                ]),
                replacement: Replacement::Attributes(INTERNAL_ID_FIELDS),
            },
        ];

        Self { rules }
    }

    /// Build a rule set from an explicit list
    pub fn from_rules(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Rules in application order
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Look up a rule by name
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard(&RuleOptions::default())
    }
}

impl FieldRule {
    /// Whether the rule applies to the element
    pub fn matches(&self, element: &Element) -> bool {
        self.trigger.matches(element)
    }

    /// Attributes of the element this rule would rewrite
    pub fn target_attributes<'e>(&self, element: &'e Element) -> Vec<(&'static str, &'e str)> {
        let names: Vec<&'static str> = match self.replacement {
            Replacement::PersonName => NAME_ATTRIBUTES.to_vec(),
            Replacement::Attributes(fields) => fields.iter().map(|(name, _)| *name).collect(),
        };
        names
            .into_iter()
            .filter_map(|name| element.attribute(name).map(|value| (name, value)))
            .collect()
    }

    /// Rewrite the element's matched attributes.
    ///
    /// Only attributes already present are touched. Call after
    /// [`matches`](Self::matches) returned true.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        element: &mut Element,
        rng: &mut R,
        today: NaiveDate,
    ) -> Vec<AttributeChange> {
        match self.replacement {
            Replacement::PersonName => {
                let name = PersonName::draw(rng);
                let values = [
                    (FIRST_NAME, name.first.to_string()),
                    (MIDDLE_NAME, name.middle.to_string()),
                    (LAST_NAME, name.last.to_string()),
                    (UNPARSED_NAME, name.unparsed()),
                ];
                values
                    .into_iter()
                    .filter_map(|(attribute, value)| set(element, attribute, value))
                    .collect()
            }
            Replacement::Attributes(fields) => {
                let mut changes = Vec::new();
                for &(attribute, generator) in fields {
                    if !element.has_attribute(attribute) {
                        continue;
                    }
                    let value = generator.generate(rng, today);
                    changes.extend(set(element, attribute, value));
                }
                changes
            }
        }
    }
}

fn set(element: &mut Element, attribute: &'static str, value: String) -> Option<AttributeChange> {
    element
        .set_attribute(attribute, value.clone())
        .map(|previous| AttributeChange {
            attribute,
            previous,
            value,
        })
}
