#[allow(unused_macros)]

macro_rules! run_tests {
    ($automaton:expr, $valids:expr, $invalids:expr) => {{
        let original = $automaton;
        let mut dfa = original.clone();
        dfa.convert_to_dfa();
        let mut minimal = original.clone();
        minimal.minimize();

        for (name, a) in [("original", &original), ("dfa", &dfa), ("minimal", &minimal)].iter() {
            $valids.iter().for_each(|s| {
                assert!(a.accepts(s), r#"{} automaton failed to accept "{}""#, name, s);
            });
            $invalids.iter().for_each(|s| {
                assert_eq!(
                    a.accepts(s),
                    false,
                    r#"{} automaton accepted "{}""#,
                    name,
                    s
                );
            });
        }
    }};
}
