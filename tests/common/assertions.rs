//! Domain-specific assertion macros for sift harnesses.
//!
//! These add context-rich failure messages that make it clear which part of
//! the search state or request was wrong.

// ---------------------------------------------------------------------------
// Request assertions
// ---------------------------------------------------------------------------

/// Assert that a request's `filter_by` consists of exactly these clauses, in
/// order. An empty list asserts that no filter is sent.
///
/// ```rust
/// assert_filter_clauses!(request, [r#"industry:="steel""#, "verified:=true"]);
/// ```
#[macro_export]
macro_rules! assert_filter_clauses {
    ($request:expr, [$($clause:expr),* $(,)?]) => {{
        let request: &sift_core::SearchRequest = &$request;
        let expected: Vec<&str> = vec![$($clause),*];
        let actual: Vec<&str> = request
            .filter_by
            .as_deref()
            .map(|f| f.split(" && ").collect())
            .unwrap_or_default();
        if actual != expected {
            panic!(
                "assert_filter_clauses! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// State assertions
// ---------------------------------------------------------------------------

/// Assert that the result list holds exactly these ids, in order.
///
/// ```rust
/// assert_result_ids!(session.state(), ["1", "2"]);
/// ```
#[macro_export]
macro_rules! assert_result_ids {
    ($state:expr, [$($id:expr),* $(,)?]) => {{
        let state: &sift_core::SearchState = &$state;
        let expected: Vec<&str> = vec![$($id),*];
        let actual: Vec<&str> = state.results.iter().map(|d| d.id.as_str()).collect();
        if actual != expected {
            panic!(
                "assert_result_ids! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}

/// Assert that `last_error` is set and contains every given fragment.
///
/// ```rust
/// assert_error_contains!(session.state(), "500", "server error");
/// ```
#[macro_export]
macro_rules! assert_error_contains {
    ($state:expr, $($fragment:expr),+ $(,)?) => {{
        let state: &sift_core::SearchState = &$state;
        match state.last_error.as_deref() {
            Some(err) => {
                $(
                    if !err.contains($fragment) {
                        panic!(
                            "assert_error_contains! failed: {:?} not in last_error {:?}",
                            $fragment, err
                        );
                    }
                )+
            }
            None => panic!("assert_error_contains! failed: last_error is None"),
        }
    }};
}
