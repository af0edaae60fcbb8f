use fsa_automata::{Automaton, Symbol};

include!("macros.rs");

/// Words over `{a, b}` that end in `abb`, as the textbook NFA.
fn ends_in_abb() -> Automaton {
    "4 1\n3\n5\n0 a 0\n0 b 0\n0 a 1\n1 b 2\n2 b 3\n".parse().unwrap()
}

fn assert_complete(a: &Automaton) {
    let letters = a.alphabet().count();
    assert!(a.is_deterministic());
    assert_eq!(a.states() * letters, a.transitions().count());
    assert!(a.transitions().all(|t| t.label() != Symbol::Epsilon));
    for s in 0..a.states() {
        for c in a.alphabet() {
            let count = a
                .transitions()
                .filter(|t| t.from() == s && t.label() == Symbol::Letter(c))
                .count();
            assert_eq!(1, count, "state {} has {} transitions on {}", s, count, c);
        }
    }
}

#[test]
fn test_convert_to_dfa() {
    let mut a = ends_in_abb();
    assert!(!a.is_deterministic());

    a.convert_to_dfa();
    assert_complete(&a);
    assert_eq!(4, a.states());

    run_tests!(a, ["abb", "aabb", "babb", "ababb"], ["", "ab", "abba", "bbb"]);
}

#[test]
fn test_convert_to_dfa_adds_sink() {
    let mut a = Automaton::symbol(Symbol::Letter('a'));
    a.convert_to_dfa();

    assert_complete(&a);
    // {0}, {1} and the empty set.
    assert_eq!(3, a.states());
    assert_eq!(vec![1], a.final_states().collect::<Vec<_>>());
    run_tests!(a, ["a"], ["", "aa", "aaa"]);
}

#[test]
fn test_convert_to_dfa_follows_epsilon() {
    let mut a: Automaton = "3 1\n2\n3\n0 E 1\n1 a 2\n2 E 0\n".parse().unwrap();
    a.convert_to_dfa();

    assert_complete(&a);
    run_tests!(a, ["a", "aa", "aaa"], [""]);
}

#[test]
fn test_convert_to_dfa_noop_on_dfa() {
    let mut a: Automaton = "2 1\n1\n2\n0 a 1\n1 a 0\n".parse().unwrap();
    let before = a.clone();
    a.convert_to_dfa();
    assert_eq!(before, a);
}

#[test]
fn test_convert_to_dfa_without_letters() {
    let mut a = Automaton::symbol(Symbol::Epsilon);
    a.convert_to_dfa();

    assert_eq!(1, a.states());
    assert_eq!(0, a.transitions().count());
    assert!(a.is_deterministic());
    run_tests!(a, [""], ["a"]);
}

#[test]
fn test_minimize_merges_dead_states() {
    // States 2 and 3 are both non-accepting traps.
    let mut a: Automaton =
        "4 1\n1\n8\n0 a 1\n0 b 2\n1 a 1\n1 b 3\n2 a 2\n2 b 3\n3 a 3\n3 b 2\n"
            .parse()
            .unwrap();
    assert!(a.is_deterministic());

    a.minimize();
    assert_eq!(3, a.states());
    assert_complete(&a);
    run_tests!(a, ["a", "aa", "aaa"], ["", "b", "ab", "ba"]);
}

#[test]
fn test_minimize_textbook() {
    let mut a = ends_in_abb();
    a.minimize();

    assert_eq!(4, a.states());
    assert_complete(&a);
    run_tests!(a, ["abb", "aabb", "bbabb"], ["", "ab", "abab"]);
}

#[test]
fn test_minimize_drops_unreachable() {
    // State 1 is unreachable and state 2 is final.
    let mut a: Automaton =
        "3 2\n1 2\n6\n0 a 2\n0 b 0\n1 a 1\n1 b 1\n2 a 2\n2 b 2\n".parse().unwrap();
    a.minimize();

    assert_eq!(2, a.states());
    assert_eq!(vec![1], a.final_states().collect::<Vec<_>>());
    run_tests!(a, ["a", "ba", "bab"], ["", "b", "bb"]);
}

#[test]
fn test_minimize_without_final_state() {
    let mut a: Automaton = "2 1\n1\n2\n0 a 0\n1 a 1\n".parse().unwrap();
    a.minimize();

    assert_eq!(Automaton::empty(), a);
    assert_eq!(0, a.alphabet().count());
    assert!(a.is_deterministic());
    assert!(a.accepts_empty_lang());

    let star = a.kleene_star();
    assert_eq!(1, star.states());
    assert!(star.is_deterministic());
    run_tests!(star, ["", "E"], ["a", "aa"]);
}

#[test]
fn test_minimize_is_idempotent() {
    let mut once = Automaton::symbol(Symbol::Letter('a'))
        .union(&Automaton::symbol(Symbol::Letter('b')))
        .kleene_star();
    once.minimize();

    let mut twice = once.clone();
    twice.minimize();

    assert_eq!(once, twice);
    assert_eq!(1, once.states());
}

#[test]
fn test_minimize_keeps_start_state() {
    let mut a: Automaton = "3 1\n0\n3\n0 a 1\n1 a 2\n2 a 0\n".parse().unwrap();
    a.minimize();

    assert_eq!(3, a.states());
    assert!(a.is_final(0));
    run_tests!(a, ["", "aaa", "aaaaaa"], ["a", "aa", "aaaa"]);
}
