//! Assertions over generated test code.

/// Assert that no template marker survived substitution.
pub fn assert_no_markers(text: &str) {
    assert!(
        !text.contains("##"),
        "unsubstituted marker in generated code:\n{}",
        text
    );
}

/// Assert that every needle occurs in `text`, in the given order.
pub fn assert_in_order(text: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match text[from..].find(needle) {
            Some(pos) => from += pos + needle.len(),
            None => panic!("expected {:?} after byte {} in:\n{}", needle, from, text),
        }
    }
}
