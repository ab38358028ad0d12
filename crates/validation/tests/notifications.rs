//! Notification behaviour of validation passes over the `Person` shape.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use common::{JOBS, ONE_SPACE_MESSAGE, Person, Spy, has_space, init_tracing, name_rules};
use nebula_validation::prelude::*;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

// ============================================================================
// SIMPLE PROPERTY VALIDATORS
// ============================================================================

#[fixture]
fn names() -> RuleTemplate<Person> {
    init_tracing();
    name_rules().build()
}

#[rstest]
fn correct_names_have_no_errors(names: RuleTemplate<Person>) {
    let mut person = names.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["FirstName", "LastName"]);

    let result = person.validate(&Person::named("John", "Smith")).unwrap();

    assert!(!result.has_errors());
    for slot in ["FirstName", "LastName"] {
        for rule in ["required", "maxlength"] {
            assert!(!result[slot].validation_failures()[rule].has_error, "{slot}.{rule}");
        }
    }
    assert!(!person.result().has_errors());
    assert!(!spy.called());
}

#[rstest]
fn incorrect_names_notify_in_registration_order(names: RuleTemplate<Person>) {
    let mut person = names.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["FirstName", "LastName"]);

    let data = Person::named("", "Smith toooooooooooooooooooooooooooooooo long");
    let result = person.validate(&data).unwrap();

    assert!(result.has_errors());
    let first = result["FirstName"].validation_failures();
    assert!(first["required"].has_error);
    assert!(!first["maxlength"].has_error);
    let last = result["LastName"].validation_failures();
    assert!(!last["required"].has_error);
    assert!(last["maxlength"].has_error);

    assert!(person.result().has_errors());
    assert_eq!(spy.names(), vec!["FirstName", "LastName"]);
}

#[rstest]
fn repeated_pass_with_same_failures_is_silent(names: RuleTemplate<Person>) {
    let mut person = names.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["FirstName", "LastName"]);

    let data = Person::named("", "Smith");
    person.validate(&data).unwrap();
    person.validate(&data).unwrap();
    person.validate(&data).unwrap();

    assert_eq!(spy.calls(), vec![("FirstName".to_owned(), true)]);
}

#[rstest]
fn fixing_a_slot_notifies_it_again(names: RuleTemplate<Person>) {
    let mut person = names.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["FirstName", "LastName"]);

    person.validate(&Person::named("", "Smith")).unwrap();
    person.validate(&Person::named("John", "Smith")).unwrap();

    assert_eq!(
        spy.calls(),
        vec![("FirstName".to_owned(), true), ("FirstName".to_owned(), false)]
    );
    assert!(!person.result().has_errors());
}

#[rstest]
fn sessions_from_one_template_are_independent(names: RuleTemplate<Person>) {
    let mut valid = names.create_rule("Valid");
    let mut invalid = names.create_rule("Invalid");
    let spy = Spy::new();
    spy.watch(&valid, &["FirstName", "LastName"]);

    invalid.validate(&Person::named("", "")).unwrap();
    valid.validate(&Person::named("John", "Smith")).unwrap();

    assert!(invalid.result().has_errors());
    assert!(!valid.result().has_errors());
    assert!(!spy.called());
}

// ============================================================================
// SIMPLE ASYNC VALIDATORS
// ============================================================================

fn jobs() -> RuleTemplate<Person> {
    init_tracing();
    let options = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        JOBS.iter().map(|job| (*job).to_owned()).collect::<Vec<_>>()
    };

    RuleTemplate::builder()
        .rule_for("Job", contains_pending(options))
        .build()
}

#[tokio::test]
async fn known_job_has_no_errors() {
    let template = jobs();
    let mut person = template.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["Job"]);

    let result = person
        .validate_async(&Person::with_job("programmer"))
        .await
        .unwrap();

    assert!(!result.has_errors());
    assert!(!person.result().has_errors());
    assert!(!spy.called());
}

#[tokio::test]
async fn unknown_job_notifies_once() {
    let template = jobs();
    let mut person = template.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["Job"]);

    let result = person
        .validate_async(&Person::with_job("unknow job"))
        .await
        .unwrap();

    assert!(result.has_errors());
    assert!(person.result().has_errors());
    assert_eq!(spy.calls(), vec![("Job".to_owned(), true)]);
}

#[test]
fn synchronous_pass_skips_async_only_evaluators() {
    let template = jobs();
    let mut person = template.create_rule("Person");

    let result = person.validate(&Person::with_job("unknow job")).unwrap();

    assert!(!result.has_errors());
    assert!(result["Job"].validation_failures().is_empty());
}

// ============================================================================
// SHARED VALIDATORS
// ============================================================================

fn one_space(runs: Arc<AtomicUsize>) -> SharedRule<Person> {
    SharedRule::new("OneSpaceForbidden", move |person: &Person, args| {
        runs.fetch_add(1, Ordering::SeqCst);
        if person.checked && has_space(person) {
            args.fail(ONE_SPACE_MESSAGE);
        }
        Ok(())
    })
}

fn shared_template(rule: SharedRule<Person>) -> RuleTemplate<Person> {
    init_tracing();
    RuleTemplate::builder()
        .validation_for("FirstName", rule.clone())
        .validation_for("LastName", rule)
        .build()
}

#[test]
fn shared_rule_without_spaces_is_silent() {
    let runs = Arc::new(AtomicUsize::new(0));
    let template = shared_template(one_space(Arc::clone(&runs)));
    let mut person = template.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["OneSpaceForbidden"]);

    let result = person.validate(&Person::named("John", "Smith")).unwrap();

    assert!(!result.has_errors());
    assert!(!spy.called());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn shared_rule_runs_once_and_fills_its_own_slot() {
    let runs = Arc::new(AtomicUsize::new(0));
    let template = shared_template(one_space(Arc::clone(&runs)));
    let mut person = template.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["OneSpaceForbidden"]);

    let result = person
        .validate(&Person::named("John Junior", "Smith"))
        .unwrap();

    assert!(result.has_errors());
    assert_eq!(result.errors().len(), 1);
    let slot = &result["OneSpaceForbidden"];
    assert!(slot.has_errors());
    assert_eq!(
        slot.validation_failures()["OneSpaceForbidden"].error_message,
        ONE_SPACE_MESSAGE
    );
    assert_eq!(spy.names(), vec!["OneSpaceForbidden"]);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

// ============================================================================
// SHARED VALIDATORS - ASYNC
// ============================================================================

fn one_space_async(runs: Arc<AtomicUsize>) -> SharedRule<Person> {
    SharedRule::new_async("OneSpaceForbidden", move |person: &Person| {
        runs.fetch_add(1, Ordering::SeqCst);
        let violated = person.checked && has_space(person);
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<_, EvaluatorFault>(ValidationFailure::check(!violated, ONE_SPACE_MESSAGE))
        }
    })
}

#[tokio::test]
async fn async_shared_rule_without_spaces_is_silent() {
    let runs = Arc::new(AtomicUsize::new(0));
    let template = shared_template(one_space_async(Arc::clone(&runs)));
    let mut person = template.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["OneSpaceForbidden"]);

    person
        .validate_async(&Person::named("John", "Smith"))
        .await
        .unwrap();

    assert!(!person.result().has_errors());
    assert!(!spy.called());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn async_shared_rule_with_spaces_notifies() {
    let runs = Arc::new(AtomicUsize::new(0));
    let template = shared_template(one_space_async(Arc::clone(&runs)));
    let mut person = template.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["OneSpaceForbidden"]);

    person
        .validate_async(&Person::named("John Junior", "Smith"))
        .await
        .unwrap();

    assert!(person.result().has_errors());
    assert_eq!(spy.names(), vec!["OneSpaceForbidden"]);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[rstest]
#[case::valid(Person::named("John", "Smith"))]
#[case::invalid(Person::named("John Junior", "Smith toooooooooooooooooooooooooooooooo long"))]
#[tokio::test]
async fn async_pass_over_sync_rules_matches_sync_pass(#[case] data: Person) {
    let runs = Arc::new(AtomicUsize::new(0));
    let template = name_rules()
        .validation_for("FirstName", one_space(Arc::clone(&runs)))
        .validation_for("LastName", one_space(Arc::clone(&runs)))
        .build();
    let mut sync_session = template.create_rule("Person");
    let mut async_session = template.create_rule("Person");

    let sync_result = serde_json::to_value(sync_session.validate(&data).unwrap()).unwrap();
    let async_result =
        serde_json::to_value(async_session.validate_async(&data).await.unwrap()).unwrap();

    assert_eq!(sync_result, async_result);
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn borrowed_data_validates_like_owned() {
    let data = Person::named("", "Smith");
    let template = name_rules().build();
    let mut owned = template.create_rule("Owned");
    let mut borrowed = RuleTemplate::<&Person>::builder()
        .rule_for("FirstName", required())
        .build()
        .create_rule("Borrowed");

    assert!(owned.validate(&data).unwrap().has_errors());
    assert!(borrowed.validate(&&data).unwrap()["FirstName"].has_errors());
}

// ============================================================================
// OPTIONAL RULES
// ============================================================================

fn invalid_names(checked: bool) -> Person {
    Person {
        checked,
        ..Person::named("", "Smith toooooooooooooooooooooooooooooooo long")
    }
}

#[rstest]
#[case::optional(false, false, vec![])]
#[case::not_optional(true, true, vec!["FirstName", "LastName"])]
fn session_optional_predicate(
    names: RuleTemplate<Person>,
    #[case] checked: bool,
    #[case] has_errors: bool,
    #[case] notified: Vec<&str>,
) {
    let mut person = names.create_rule("Person");
    let spy = Spy::new();
    spy.watch(&person, &["FirstName", "LastName"]);
    person.set_optional(|person: &Person| !person.checked);

    let result = person.validate(&invalid_names(checked)).unwrap();

    assert_eq!(result.has_errors(), has_errors);
    assert_eq!(spy.names(), notified);
}

#[rstest]
#[case::optional(false, false)]
#[case::not_optional(true, true)]
fn template_optional_predicate(#[case] checked: bool, #[case] has_errors: bool) {
    let runs = Arc::new(AtomicUsize::new(0));
    let template = name_rules()
        .validation_for("FirstName", one_space(Arc::clone(&runs)))
        .set_optional(|person: &Person| !person.checked)
        .build();
    let mut person = template.create_rule("Person");

    let result = person.validate(&invalid_names(checked)).unwrap();

    assert_eq!(result.has_errors(), has_errors);
    let expected_runs = usize::from(checked);
    assert_eq!(runs.load(Ordering::SeqCst), expected_runs);
}

#[tokio::test]
async fn optional_predicate_also_skips_async_passes() {
    let evaluated = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&evaluated);
    let template = RuleTemplate::builder()
        .rule_for(
            "Job",
            async_evaluator_fn("slow", move |_: &serde_json::Value| {
                flag.store(true, Ordering::SeqCst);
                async { Ok::<_, EvaluatorFault>(ValidationFailure::failed("never")) }
            }),
        )
        .set_optional(|person: &Person| !person.checked)
        .build();
    let mut person = template.create_rule("Person");

    let result = person
        .validate_async(&Person::with_job("anything"))
        .await
        .unwrap();

    assert!(!result.has_errors());
    assert!(!evaluated.load(Ordering::SeqCst));
}
