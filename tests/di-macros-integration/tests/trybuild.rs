//! trybuild compile-time tests for di_macros

#[test]
fn trybuild_reflect() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/reflect_ok.rs");
    t.pass("tests/trybuild/reflect_tuple_ok.rs");
}
