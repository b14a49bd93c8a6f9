use gatherer_core::{Normalizer, RawResult, Rejection, SeenSet, Verdict};
use pretty_assertions::assert_eq;

fn person(json: &str) -> RawResult {
    serde_json::from_str(json).expect("valid raw result")
}

fn init_logging() {
    engine_logging::initialize_for_tests();
}

#[test]
fn accepts_usable_email_and_records_it() {
    init_logging();
    let normalizer = Normalizer::default();
    let mut seen = SeenSet::new();
    let raw = person(
        r#"{"first_name":" Ada ","last_name":"Lovelace","title":"CEO",
            "email":"ada@acme.io","organization_name":"Acme"}"#,
    );

    let Verdict::Accepted(contact) = normalizer.accept(raw, &mut seen) else {
        panic!("expected acceptance");
    };
    assert_eq!(contact.fields(), ["Ada Lovelace", "CEO", "ada@acme.io", "Acme"]);
    assert!(seen.contains("ada@acme.io"));
    assert_eq!(seen.inserted_since_load(), 1);
}

#[test]
fn missing_fields_default_to_empty_strings() {
    let normalizer = Normalizer::default();
    let mut seen = SeenSet::new();
    let raw = person(r#"{"email":"x@y.com","title":null}"#);

    let Verdict::Accepted(contact) = normalizer.accept(raw, &mut seen) else {
        panic!("expected acceptance");
    };
    assert_eq!(contact.name(), "");
    assert_eq!(contact.role(), "");
    assert_eq!(contact.company(), "");
}

#[test]
fn company_falls_back_to_nested_organization() {
    let normalizer = Normalizer::default();
    let mut seen = SeenSet::new();
    let raw = person(r#"{"name":"Grace Hopper","email":"g@navy.mil","organization":{"name":"Navy"}}"#);

    let Verdict::Accepted(contact) = normalizer.accept(raw, &mut seen) else {
        panic!("expected acceptance");
    };
    assert_eq!(contact.name(), "Grace Hopper");
    assert_eq!(contact.company(), "Navy");
}

#[test]
fn absent_blank_and_placeholder_emails_are_rejected_without_touching_seen() {
    let normalizer = Normalizer::default();
    let mut seen = SeenSet::new();

    for raw in [
        person(r#"{"first_name":"No","last_name":"Email"}"#),
        person(r#"{"email":null}"#),
        person(r#"{"email":"   "}"#),
        person(r#"{"email":"email_not_unlocked@domain.com"}"#),
        person(r#"{"email":"EMAIL_NOT_UNLOCKED@DOMAIN.COM"}"#),
    ] {
        assert_eq!(
            normalizer.accept(raw, &mut seen),
            Verdict::Rejected(Rejection::NoEmail)
        );
    }
    assert!(seen.is_empty());
}

#[test]
fn primary_email_is_used_when_email_is_a_placeholder() {
    let normalizer = Normalizer::default();
    let mut seen = SeenSet::new();
    let raw = person(
        r#"{"email":"email_not_unlocked@domain.com","primary_email":"real@acme.io"}"#,
    );

    let Verdict::Accepted(contact) = normalizer.accept(raw, &mut seen) else {
        panic!("expected acceptance");
    };
    assert_eq!(contact.email(), "real@acme.io");
}

#[test]
fn already_seen_email_is_rejected_and_seen_unchanged() {
    let normalizer = Normalizer::default();
    let mut seen: SeenSet = ["a@x.com"].into_iter().collect();
    let before = seen.clone();

    let verdict = normalizer.accept(person(r#"{"email":"a@x.com"}"#), &mut seen);
    assert_eq!(verdict, Verdict::Rejected(Rejection::AlreadySeen));
    assert_eq!(seen, before);
}

#[test]
fn seen_matching_is_case_sensitive() {
    let normalizer = Normalizer::default();
    let mut seen: SeenSet = ["a@x.com"].into_iter().collect();

    let verdict = normalizer.accept(person(r#"{"email":"A@x.com"}"#), &mut seen);
    assert!(matches!(verdict, Verdict::Accepted(_)));
    assert_eq!(seen.len(), 2);
}

#[test]
fn extra_placeholders_extend_the_denylist() {
    let normalizer = Normalizer::default().with_extra_placeholders(["locked@example.com", " "]);
    assert_eq!(normalizer.placeholders().len(), 2);

    let mut seen = SeenSet::new();
    let verdict = normalizer.accept(person(r#"{"email":"locked@example.com"}"#), &mut seen);
    assert_eq!(verdict, Verdict::Rejected(Rejection::NoEmail));
}

#[test]
fn padded_email_stays_seen_after_reload() {
    let normalizer = Normalizer::default();
    let mut seen = SeenSet::new();

    let Verdict::Accepted(contact) =
        normalizer.accept(person(r#"{"email":"  a@x.com "}"#), &mut seen)
    else {
        panic!("expected acceptance");
    };
    assert_eq!(contact.email(), "a@x.com");
    assert_eq!(seen.to_lines(), "a@x.com\n");

    let mut reloaded = SeenSet::parse(&seen.to_lines());
    assert_eq!(reloaded, seen.iter().collect::<SeenSet>());
    let verdict = normalizer.accept(person(r#"{"email":" a@x.com"}"#), &mut reloaded);
    assert_eq!(verdict, Verdict::Rejected(Rejection::AlreadySeen));
}
