//! Integration tests for the anonymization engine over MISMO documents

use chrono::{Local, NaiveDate};
use mismo_anon::anonymization::generators::{pool, Generator};
use mismo_anon::anonymization::rules::{Replacement, Trigger};
use mismo_anon::anonymization::{
    AnonymizationConfig, AnonymizationEngine, FieldCategory, FieldRule, RuleSet,
};
use mismo_anon::document::{parse_document, parse_root, write_document, Element};
use regex::Regex;
use std::sync::Arc;

const LOAN_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<LOAN_APPLICATION MISMOVersionID="2.3.1">
    <_DATA_INFORMATION>
        <DATA_VERSION _Name="Uniform Residential Loan Application" _Number="3.2"/>
    </_DATA_INFORMATION>
    <ADDITIONAL_CASE_DATA>
        <TRANSMITTAL_DATA LenderCaseIdentifier="4471120" InternalAccountIdentifier="INT0042"/>
    </ADDITIONAL_CASE_DATA>
    <BORROWER BorrowerID="BRW1" _FirstName="Ann" _MiddleName="Q" _LastName="Lee" _UnparsedName="Ann Q Lee" _SSN="123456789" _BirthDate="1971-04-02" _AgeYears="53" _PrintPositionType="Borrower">
        <_RESIDENCE _StreetAddress="12 Elm Road" _City="Springfield" _State="IL" _PostalCode="62701" BorrowerResidencyType="Current"/>
        <CONTACT_POINT _RoleType="Home" _Type="Phone" _Value="2175550100"/>
        <CONTACT_POINT _RoleType="Work" _Type="Email" _Value="ann.lee@example.org"/>
        <CONTACT_POINT _RoleType="Work" _Type="Fax" _Value="2175550199"/>
        <CONTACT_POINT _RoleType="Home" _Type="Other" _Value="pager 42"/>
    </BORROWER>
    <BORROWER BorrowerID="BRW2" _FirstName="Bo" _LastName="Park" _UnparsedName="Bo Park" _SSN="987654321"/>
    <LIABILITY _AccountIdentifier="000111222" _HolderName="Old Card Co" _UnpaidBalanceAmount="1200">
        <_HOLDER _StreetAddress="1 Bank Plaza" _City="Chicago"/>
    </LIABILITY>
    <_CREDITOR _Name="Old Bank" _CreditorType="Lender"/>
    <REQUESTING_PARTY _Name="Acme Mortgage" _RequestedByName="jdoe"/>
    <PROPERTY _StreetAddress="99 Oak Lane" _PropertyType="SingleFamily"/>
    <LOAN_PURPOSE _Type="Purchase"/>
</LOAN_APPLICATION>
"#;

fn engine() -> AnonymizationEngine {
    AnonymizationEngine::new(AnonymizationConfig::default()).expect("Failed to create engine")
}

/// Pre-order (tag, attribute names) of every element
fn shape(root: &Element) -> Vec<(String, Vec<String>)> {
    let mut out = Vec::new();
    root.walk(&mut |e: &Element| {
        out.push((
            e.tag.clone(),
            e.attribute_names().map(str::to_string).collect(),
        ));
    });
    out
}

fn elements(root: &Element) -> Vec<Element> {
    let mut out = Vec::new();
    root.walk(&mut |e: &Element| out.push(e.clone()));
    out
}

fn attribute_values<'a>(root: &'a Element, name: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    root.walk(&mut |e: &'a Element| {
        if let Some(v) = e.attribute(name) {
            out.push(v);
        }
    });
    out
}

fn anonymized() -> Element {
    let mut root = parse_root(LOAN_DOCUMENT).unwrap();
    engine().anonymize(&mut root);
    root
}

#[test]
fn test_shape_preservation() {
    let original = parse_root(LOAN_DOCUMENT).unwrap();
    let result = anonymized();

    assert_eq!(original.element_count(), result.element_count());
    assert_eq!(shape(&original), shape(&result));
}

#[test]
fn test_non_pii_elements_pass_through() {
    let rules = RuleSet::default();
    let original = parse_root(LOAN_DOCUMENT).unwrap();
    let result = anonymized();

    for (before, after) in elements(&original).iter().zip(elements(&result).iter()) {
        let recognized = rules.rules().iter().any(|r| r.matches(before));
        if !recognized {
            assert_eq!(before.attributes, after.attributes, "element {}", before.tag);
        }
    }
}

#[test]
fn test_unrecognized_attributes_unchanged_on_matched_elements() {
    let result = anonymized();
    let borrower = result
        .child_elements()
        .find(|e| e.attribute("BorrowerID") == Some("BRW1"))
        .unwrap();

    assert_eq!(borrower.attribute("_PrintPositionType"), Some("Borrower"));

    let liability = result.child_elements().find(|e| e.tag == "LIABILITY").unwrap();
    assert_eq!(liability.attribute("_HolderName"), Some("Old Card Co"));
    assert_eq!(liability.attribute("_UnpaidBalanceAmount"), Some("1200"));

    let creditor = result.child_elements().find(|e| e.tag == "_CREDITOR").unwrap();
    assert_eq!(creditor.attribute("_CreditorType"), Some("Lender"));
}

#[test]
fn test_name_linkage() {
    let result = anonymized();

    result.walk(&mut |e: &Element| {
        let (Some(first), Some(unparsed)) = (e.attribute("_FirstName"), e.attribute("_UnparsedName"))
        else {
            return;
        };
        let last = e.attribute("_LastName").unwrap();
        let parts: Vec<&str> = unparsed.split(' ').collect();

        assert_eq!(parts.len(), 3, "unparsed name {unparsed:?}");
        assert_eq!(parts[0], first);
        assert_eq!(parts[2], last);
        if let Some(middle) = e.attribute("_MiddleName") {
            assert_eq!(parts[1], middle);
        }
        assert!(pool::MIDDLE_INITIALS.contains(&parts[1]));
    });
}

#[test]
fn test_names_drawn_from_pools() {
    let result = anonymized();

    for first in attribute_values(&result, "_FirstName") {
        assert!(pool::FIRST_NAMES.contains(&first), "{first}");
    }
    for last in attribute_values(&result, "_LastName") {
        assert!(pool::LAST_NAMES.contains(&last), "{last}");
    }
}

#[test]
fn test_format_conformance() {
    let result = anonymized();
    let today = Local::now().date_naive();

    let ssn = Regex::new(r"^\d{9}$").unwrap();
    for value in attribute_values(&result, "_SSN") {
        assert!(ssn.is_match(value), "SSN {value}");
    }

    for value in attribute_values(&result, "_BirthDate") {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap();
        assert!(date < today);
        assert_eq!(value.len(), 10);
    }

    let account = Regex::new(r"^ACC\d{9}$").unwrap();
    for value in attribute_values(&result, "_AccountIdentifier") {
        assert!(account.is_match(value), "account {value}");
    }

    let phone = Regex::new(r"^555\d{7}$").unwrap();
    result.walk(&mut |e: &Element| {
        if e.attribute("_Type") == Some("Phone") {
            let value = e.attribute("_Value").unwrap();
            assert!(phone.is_match(value), "phone {value}");
        }
    });

    for value in attribute_values(&result, "_AgeYears") {
        let age: u32 = value.parse().unwrap();
        assert!((30..=50).contains(&age));
    }
}

#[test]
fn test_address_values() {
    let result = anonymized();
    let street = Regex::new(r"^\d{3,4} Main Street$").unwrap();

    for value in attribute_values(&result, "_StreetAddress") {
        assert!(street.is_match(value), "street {value}");
    }
    for value in attribute_values(&result, "_City") {
        assert_eq!(value, pool::CITY);
    }
    assert_eq!(attribute_values(&result, "_State"), vec![pool::STATE]);
    assert_eq!(attribute_values(&result, "_PostalCode"), vec![pool::POSTAL_CODE]);
}

#[test]
fn test_internal_identifiers() {
    let result = anonymized();

    let lender_case = attribute_values(&result, "LenderCaseIdentifier");
    assert!(Regex::new(r"^\d{7}$").unwrap().is_match(lender_case[0]));

    let internal = attribute_values(&result, "InternalAccountIdentifier");
    assert!(Regex::new(r"^INT\d{4}$").unwrap().is_match(internal[0]));

    let requested_by = attribute_values(&result, "_RequestedByName");
    assert!(Regex::new(r"^user\d{1,3}$").unwrap().is_match(requested_by[0]));
}

#[test]
fn test_contact_points() {
    let result = anonymized();
    let digits = Regex::new(r"^555\d{7}$").unwrap();

    result.walk(&mut |e: &Element| {
        match e.attribute("_Type") {
            Some("Phone") | Some("Fax") | Some("Email") => {
                assert!(digits.is_match(e.attribute("_Value").unwrap()));
            }
            Some("Other") => assert_eq!(e.attribute("_Value"), Some("pager 42")),
            _ => {}
        }
    });
}

#[test]
fn test_realistic_emails_option() {
    let config = AnonymizationConfig {
        realistic_emails: true,
        ..Default::default()
    };
    let engine = AnonymizationEngine::new(config).unwrap();
    let mut root = parse_root(LOAN_DOCUMENT).unwrap();
    engine.anonymize(&mut root);

    let email = Regex::new(r"^user\d{4}@example\.com$").unwrap();
    let phone = Regex::new(r"^555\d{7}$").unwrap();
    root.walk(&mut |e: &Element| match e.attribute("_Type") {
        Some("Email") => assert!(email.is_match(e.attribute("_Value").unwrap())),
        Some("Phone") | Some("Fax") => assert!(phone.is_match(e.attribute("_Value").unwrap())),
        _ => {}
    });
}

#[test]
fn test_idempotent_structure() {
    let engine = engine();
    let mut once = parse_root(LOAN_DOCUMENT).unwrap();
    engine.anonymize(&mut once);

    let mut twice = parse_root(LOAN_DOCUMENT).unwrap();
    engine.anonymize(&mut twice);
    engine.anonymize(&mut twice);

    assert_eq!(shape(&once), shape(&twice));
}

#[test]
fn test_scenario_single_loan_node() {
    let mut root = parse_root(r#"<LOAN _FirstName="Ann" _LastName="Lee" _SSN="123456789"/>"#).unwrap();
    engine().anonymize(&mut root);

    assert_eq!(root.tag, "LOAN");
    assert!(pool::FIRST_NAMES.contains(&root.attribute("_FirstName").unwrap()));
    assert!(pool::LAST_NAMES.contains(&root.attribute("_LastName").unwrap()));
    assert!(Regex::new(r"^\d{9}$")
        .unwrap()
        .is_match(root.attribute("_SSN").unwrap()));

    let names: Vec<_> = root.attribute_names().collect();
    assert_eq!(names, vec!["_FirstName", "_LastName", "_SSN"]);
}

#[test]
fn test_scenario_creditor_name() {
    let mut root = parse_root(r#"<_CREDITOR _Name="Old Bank"/>"#).unwrap();
    engine().anonymize(&mut root);

    let name = root.attribute("_Name").unwrap();
    assert!(pool::ORGANIZATION_NAMES.contains(&name), "{name}");
}

#[test]
fn test_name_attribute_on_other_tags_unchanged() {
    let result = anonymized();
    let version = result
        .child_elements()
        .next()
        .and_then(|info| info.child_elements().next())
        .unwrap();
    assert_eq!(version.tag, "DATA_VERSION");
    assert_eq!(
        version.attribute("_Name"),
        Some("Uniform Residential Loan Application")
    );
}

#[test]
fn test_unparsed_name_alone_is_untouched() {
    let mut root = parse_root(r#"<PARTY _UnparsedName="Ann Lee"/>"#).unwrap();
    engine().anonymize(&mut root);
    assert_eq!(root.attribute("_UnparsedName"), Some("Ann Lee"));
}

#[test]
fn test_serialized_output_round_trips() {
    let result = engine().anonymize_xml("loan.xml", LOAN_DOCUMENT).unwrap();

    assert!(result
        .xml
        .starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<LOAN_APPLICATION"));
    assert!(!result.xml.contains("123456789"));
    assert!(!result.xml.contains("Springfield"));
    assert!(!result.xml.contains("Old Bank"));

    let original = parse_document(LOAN_DOCUMENT).unwrap();
    let reparsed = parse_document(&result.xml).unwrap();
    assert_eq!(shape(&original.root), shape(&reparsed.root));
}

#[test]
fn test_write_document_after_in_place_anonymize() {
    let mut document = parse_document(LOAN_DOCUMENT).unwrap();
    engine().anonymize(&mut document.root);
    let xml = write_document(&document).unwrap();
    assert!(xml.contains("  <BORROWER BorrowerID=\"BRW1\""));
}

#[test]
fn test_concurrent_anonymization() {
    let engine = Arc::new(engine());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                engine
                    .anonymize_xml(&format!("loan-{i}.xml"), LOAN_DOCUMENT)
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert!(result.total_replacements() > 0);
    }
}

const LOAN_NUMBER_FIELDS: &[(&str, Generator)] = &[(
    "_LoanNumber",
    Generator::Prefixed {
        prefix: "LN",
        low: 100_000,
        high: 999_999,
    },
)];

#[test]
fn test_custom_rule_table() {
    let rules = RuleSet::from_rules(vec![FieldRule {
        name: "loan_number",
        category: FieldCategory::InternalIdentifier,
        trigger: Trigger::AnyAttribute(&["_LoanNumber"]),
        replacement: Replacement::Attributes(LOAN_NUMBER_FIELDS),
    }]);
    let engine = AnonymizationEngine::with_rules(AnonymizationConfig::default(), rules).unwrap();
    assert_eq!(engine.rules().len(), 1);

    let result = engine
        .anonymize_xml(
            "custom.xml",
            r#"<LOAN><TERMS _LoanNumber="0042"/><BORROWER _SSN="123456789"/></LOAN>"#,
        )
        .unwrap();
    let root = parse_root(&result.xml).unwrap();

    let loan_number = attribute_values(&root, "_LoanNumber");
    assert!(Regex::new(r"^LN\d{6}$").unwrap().is_match(loan_number[0]));
    // Only the custom rule runs
    assert_eq!(attribute_values(&root, "_SSN"), vec!["123456789"]);
    assert_eq!(result.stats.by_rule["loan_number"], 1);
    assert_eq!(result.total_replacements(), 1);
}
