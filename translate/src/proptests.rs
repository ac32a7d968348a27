//! Property tests for the pipeline invariants: cleanup is idempotent and
//! the whole translation is a pure function of its input.

use proptest::collection::vec;
use proptest::prelude::*;

use dsl::core::FileId;

use crate::options::TranslateOptions;
use crate::{translate, xform_cleanup};

/// Space-separated source fragments. Keeping fragments apart avoids
/// manufacturing new tokens by adjacency (removing the `;` from `a:;=b`
/// creates a `:=`), which the cleanup stage makes no attempt to fix.
fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,6}",
        "[0-9]{1,4}",
        Just(":=".to_string()),
        Just(";".to_string()),
        Just("RETURN".to_string()),
        Just("EXIT".to_string()),
        Just("ELSIF".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("\n".to_string()),
        Just("\n\n\n".to_string()),
    ]
}

fn source() -> impl Strategy<Value = String> {
    vec(fragment(), 0..40).prop_map(|fragments| fragments.join(" "))
}

proptest! {
    #[test]
    fn cleanup_when_run_twice_then_same_text(source in source()) {
        let once = xform_cleanup::apply(&source);
        let twice = xform_cleanup::apply(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.ends_with('\n'));
        prop_assert!(!once.ends_with("\n\n"));
    }

    #[test]
    fn translate_when_run_twice_then_same_text(source in "[ -~\n]{1,200}") {
        let options = TranslateOptions::default();
        let first = translate(&source, &FileId::default(), &options).map(|t| t.text).ok();
        let second = translate(&source, &FileId::default(), &options).map(|t| t.text).ok();
        prop_assert_eq!(first, second);
    }
}
