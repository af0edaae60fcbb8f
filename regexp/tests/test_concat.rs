use fsa_regexp::RegularExpression;

include!("macros.rs");

#[test]
fn test_concat() {
    let exprs = ["ab", "a&b", "(a)b", "a(b)", "(a)(b)", "(ab)", "(a&b)"];
    let valids = ["ab", "aEb"];
    let invalids = ["", "a", "b", "ba", "abb", "aab"];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["a1b2", "a&1&b&2", "(a1)(b2)"];
    let valids = ["a1b2"];
    let invalids = ["", "a1", "a1b", "a1b22"];
    run_tests!(&exprs, &valids, &invalids);
}
