use errslot::{
    Domain, Error, ErrorOut, ErrorSlot, Routine, define_domain, err_check, err_create_if,
    err_propagate,
};
use pretty_assertions::assert_eq;
use tracing_subscriber::EnvFilter;

define_domain!(fn test_domain => "test-error-handling");

const CODE_SUCCESS: i32 = 0;
const CODE_1: i32 = -1;
const CODE_2: i32 = -2;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_test_writer()
        .try_init();
}

/// Level two can create an error.
fn level_two(code: i32, note: &str, err: ErrorOut<'_>) -> bool {
    Routine::new(err)
        .named("level_two")
        .body(|err| {
            err_create_if!(
                err,
                test_domain(),
                code != CODE_SUCCESS,
                code,
                "Big error in level {} function: {}",
                2,
                note
            );
            Ok(())
        })
        .on_failure(|err| assert!(err.is_discard() || err.is_set()))
        .finish()
}

/// Level one forwards whatever level two reports.
fn level_one(code: i32, err: ErrorOut<'_>) -> bool {
    let mut internal = ErrorSlot::new();
    Routine::new(err)
        .named("level_one")
        .body(|err| {
            level_two(code, "called by level_one", internal.out());
            err_propagate!(err, internal);
            Ok(())
        })
        .on_failure(|err| assert!(err.is_discard() || err.is_set()))
        .finish()
}

#[test]
fn error_one_level() {
    init_tracing();
    let mut err = ErrorSlot::new();

    let status = level_two(CODE_1, "called by error_one_level", err.out());

    assert!(!status);
    let error = err.get().expect("level two should have failed");
    assert!(error.matches(test_domain(), CODE_1));
    assert_eq!(
        error.message(),
        "Big error in level 2 function: called by error_one_level"
    );
}

#[test]
fn error_two_level() {
    init_tracing();
    let mut err = ErrorSlot::new();

    let status = level_one(CODE_2, err.out());

    assert!(!status);
    let error = err.take().expect("error should reach the top");
    assert_eq!(error.domain(), test_domain());
    assert_eq!(error.code(), CODE_2);
    assert_eq!(
        error.message(),
        "Big error in level 2 function: called by level_one"
    );
    assert!(err.is_empty());
}

#[test]
fn error_none() {
    init_tracing();
    let mut err = ErrorSlot::new();

    let status = level_two(CODE_SUCCESS, "called by error_none", err.out());

    assert!(status);
    assert!(err.is_empty());
}

#[test]
fn error_none_through_two_levels() {
    let mut err = ErrorSlot::new();
    assert!(level_one(CODE_SUCCESS, err.out()));
    assert!(err.is_empty());
}

#[test]
fn error_no_format_arguments() {
    fn raise(err: &mut ErrorSlot) -> errslot::Step {
        err_create_if!(
            err,
            test_domain(),
            true,
            CODE_1,
            "I have no additional arguments"
        );
        Ok(())
    }

    let mut err = ErrorSlot::new();
    assert!(raise(&mut err).is_err());
    err_checked(&err);
    let error = err.get().expect("error should be set");
    assert!(error.matches(test_domain(), CODE_1));
    assert_eq!(error.message(), "I have no additional arguments");
}

fn err_checked(err: &ErrorSlot) {
    let detected = (|| -> errslot::Step {
        err_check!(err);
        Ok(())
    })();
    assert_eq!(detected, Err(errslot::Failed));
}

#[test]
fn error_discarded_without_destination() {
    init_tracing();
    assert!(!level_one(CODE_2, ErrorOut::discard()));
    assert!(!level_two(CODE_1, "nobody listens", ErrorOut::discard()));
    assert!(level_one(CODE_SUCCESS, ErrorOut::discard()));
}

#[test]
fn demo_scenario_matches_exactly() {
    let demo = Domain::get_or_create("demo");
    let mut err = ErrorSlot::new();

    let status = Routine::new(&mut err)
        .body(|err| {
            err_create_if!(
                err,
                demo,
                true,
                -1,
                "Big error in level {} function: {}",
                2,
                "called by X"
            );
            Ok(())
        })
        .finish();

    assert!(!status);
    let expected = Error::new(demo, -1, "Big error in level 2 function: called by X");
    assert_eq!(err.into_result(), Err(expected));
}

#[test]
fn domains_are_shared_across_lookups() {
    assert_eq!(test_domain(), Domain::get_or_create("test-error-handling"));
    assert_eq!(test_domain().name(), "test-error-handling");
}

#[test]
#[should_panic(expected = "error code 0 is reserved")]
fn creating_with_zero_code_panics() {
    let mut err = ErrorSlot::new();
    let _ = (|| -> errslot::Step {
        err_create_if!(err, test_domain(), true, 0, "zero is success");
        Ok(())
    })();
}

#[test]
#[should_panic(expected = "slot already holds")]
fn creating_into_populated_slot_panics() {
    let mut err = ErrorSlot::new();
    level_two(CODE_1, "first", err.out());
    level_two(CODE_2, "second", err.out());
}
