use crate::limits::{MAX_PATTERNS, MAX_TRANSITIONS_PER_VERTEX, MAX_VERTICES};
use crate::{Automaton, Capacity, Match, MatchLog, PatternError};

fn built(patterns: &[&'static str]) -> Automaton<'static, MatchLog> {
    let mut ac = Automaton::new(MatchLog::new());
    for p in patterns {
        ac.add_pattern(p).unwrap();
    }
    ac.build();
    ac
}

#[test]
fn test_ushers_reports_all_overlaps_in_order() {
    // The classic scenario: "she" and "he" both end at position 3, with the
    // longer match reported first, then "hers" at 5.
    let mut ac = built(&["he", "she", "his", "hers"]);
    ac.search(b"ushers");
    assert_eq!(
        ac.sink().matches(),
        &[(1, 3), (0, 3), (3, 5)],
        "expected she@3, he@3, hers@5"
    );
}

#[test]
fn test_shared_prefixes_share_vertices() {
    let ac = built(&["he", "she", "his", "hers"]);
    // root + h,he,hi,his,her,hers,s,sh,she
    assert_eq!(ac.vertex_count(), 10);
    assert_eq!(ac.pattern_count(), 4);
}

#[test]
fn test_unmapped_byte_breaks_match() {
    let mut ac = built(&["abc"]);
    ac.search(b"ab1c");
    assert!(
        ac.sink().is_empty(),
        "the '1' must reset the cursor and break the match"
    );
}

#[test]
fn test_case_insensitive_match() {
    let mut ac = built(&["virus"]);
    ac.search(b"a VIRUS is here");
    // The final 'S' of VIRUS sits at index 6.
    assert_eq!(ac.sink().matches(), &[(0, 6)]);
}

#[test]
fn test_upper_and_lower_patterns_match_identically() {
    let mut upper = built(&["VIRUS"]);
    let mut lower = built(&["virus"]);
    let text = b"Virus vIrUs VIRUS virus";
    upper.search(text);
    lower.search(text);
    assert_eq!(upper.sink().matches(), lower.sink().matches());
    assert_eq!(upper.sink().len(), 4);
}

#[test]
fn test_single_letter_pattern_every_occurrence() {
    let mut ac = built(&["a"]);
    ac.search(b"banana");
    assert_eq!(ac.sink().matches(), &[(0, 1), (0, 3), (0, 5)]);
}

#[test]
fn test_overlapping_matches_outer_first() {
    let mut ac = built(&["aba", "ba"]);
    ac.search(b"ababa");
    assert_eq!(ac.sink().matches(), &[(0, 2), (1, 2), (0, 4), (1, 4)]);
}

#[test]
fn test_search_is_deterministic() {
    let mut ac = built(&["he", "she", "his", "hers"]);
    ac.search(b"ushers say hershey");
    let first: Vec<_> = ac.sink().matches().to_vec();

    ac.sink_mut().clear();
    ac.search(b"ushers say hershey");
    assert_eq!(ac.sink().matches(), first.as_slice());
}

#[test]
fn test_build_twice_reproduces_links() {
    let mut ac = built(&["he", "she", "his", "hers"]);
    ac.search(b"ushers");
    let first: Vec<_> = ac.sink().matches().to_vec();

    ac.build();
    ac.sink_mut().clear();
    ac.search(b"ushers");
    assert_eq!(ac.sink().matches(), first.as_slice());
}

#[test]
fn test_each_search_starts_at_root() {
    let mut ac = built(&["hers"]);
    // A match split across two calls must not be reported: each call is an
    // independent stream.
    ac.search(b"he");
    ac.search(b"rs");
    assert!(ac.sink().is_empty());

    ac.search(b"hers");
    assert_eq!(ac.sink().matches(), &[(0, 3)]);
}

#[test]
fn test_search_with_zero_patterns() {
    let mut ac = Automaton::new(MatchLog::new());
    ac.build();
    ac.search(b"anything at all");
    assert!(ac.sink().is_empty());
}

#[test]
fn test_search_empty_input() {
    let mut ac = built(&["abc"]);
    ac.search(b"");
    assert!(ac.sink().is_empty());
}

#[test]
fn test_empty_pattern_rejected() {
    let mut ac = Automaton::new(MatchLog::new());
    assert_eq!(ac.add_pattern(""), Err(PatternError::EmptyPattern));
    assert_eq!(ac.pattern_count(), 0);
}

#[test]
fn test_match_carries_pattern_text_and_index() {
    let mut reported: Vec<(String, usize, usize)> = Vec::new();
    {
        let mut ac =
            Automaton::new(|m: Match<'_>| reported.push((m.pattern.to_string(), m.pattern_index, m.end)));
        ac.add_pattern("she").unwrap();
        ac.add_pattern("he").unwrap();
        ac.build();
        ac.search(b"she");
    }
    assert_eq!(
        reported,
        vec![("she".to_string(), 0, 2), ("he".to_string(), 1, 2)]
    );
}

// --- the skip-on-insert / reset-on-search asymmetry, pinned ---------------

#[test]
fn test_insertion_skips_unmapped_bytes() {
    // "ab1c" is stored as if it were "abc", so clean "abc" input matches it
    // while the literal "ab1c" input does not (the '1' resets the cursor).
    let mut ac = built(&["ab1c"]);
    ac.search(b"abc");
    assert_eq!(ac.sink().matches(), &[(0, 2)]);

    ac.sink_mut().clear();
    ac.search(b"ab1c");
    assert!(ac.sink().is_empty());
}

#[test]
fn test_pattern_of_only_unmapped_bytes_never_matches() {
    let mut ac = Automaton::new(MatchLog::new());
    ac.add_pattern("123").unwrap();
    ac.build();
    assert_eq!(ac.vertex_count(), 1, "no trie edge should be created");

    ac.search(b"123");
    ac.search(b"abc 123 abc");
    assert!(ac.sink().is_empty(), "a root-parked pattern is unreachable");
}

#[test]
fn test_delimiter_inside_would_be_match() {
    let mut ac = built(&["virus"]);
    ac.search(b"vir us");
    assert!(ac.sink().is_empty());
}

// --- capacity enforcement -------------------------------------------------

#[test]
fn test_pattern_table_capacity() {
    // Two-letter patterns with bounded fan-out: 8 first letters x 10 second
    // letters = 80 patterns, well inside the vertex budget.
    let mut patterns = Vec::new();
    for a in 0..8u8 {
        for b in 0..10u8 {
            patterns.push(format!(
                "{}{}",
                (b'a' + a) as char,
                (b'a' + b) as char
            ));
        }
    }
    assert_eq!(patterns.len(), MAX_PATTERNS);

    let mut ac = Automaton::new(MatchLog::new());
    for p in &patterns {
        ac.add_pattern(p).unwrap();
    }
    assert_eq!(ac.pattern_count(), MAX_PATTERNS);
    let vertices_before = ac.vertex_count();

    assert_eq!(
        ac.add_pattern("zz"),
        Err(PatternError::CapacityExceeded(Capacity::Patterns))
    );
    assert_eq!(ac.pattern_count(), MAX_PATTERNS);
    assert_eq!(ac.vertex_count(), vertices_before);

    // The loaded automaton still works.
    ac.build();
    ac.search(b"ab");
    assert_eq!(ac.sink().matches(), &[(1, 1)]);
}

#[test]
fn test_vertex_store_capacity() {
    // One pattern long enough to need more vertices than exist.
    let long = "a".repeat(MAX_VERTICES + 40);
    let mut ac = Automaton::new(MatchLog::new());
    assert_eq!(
        ac.add_pattern(&long),
        Err(PatternError::CapacityExceeded(Capacity::Vertices))
    );
    // Vertices created before the failure are not rolled back; the pattern
    // itself is not registered.
    assert_eq!(ac.vertex_count(), MAX_VERTICES);
    assert_eq!(ac.pattern_count(), 0);
}

#[test]
fn test_vertex_transition_capacity() {
    let singles: Vec<String> = (0..MAX_TRANSITIONS_PER_VERTEX as u8)
        .map(|i| ((b'a' + i) as char).to_string())
        .collect();

    let mut ac = Automaton::new(MatchLog::new());
    for p in &singles {
        ac.add_pattern(p).unwrap();
    }
    let vertices_before = ac.vertex_count();

    // A 13th distinct first letter needs a 13th edge out of the root.
    assert_eq!(
        ac.add_pattern("z"),
        Err(PatternError::CapacityExceeded(Capacity::VertexTransitions))
    );
    assert_eq!(ac.vertex_count(), vertices_before);
    assert_eq!(ac.pattern_count(), MAX_TRANSITIONS_PER_VERTEX);
}

#[test]
fn test_vertex_pattern_ref_capacity() {
    // Identical post-mapping patterns share a terminal vertex; the third
    // occupant exceeds the per-vertex reference list.
    let mut ac = Automaton::new(MatchLog::new());
    ac.add_pattern("dup").unwrap();
    ac.add_pattern("DUP").unwrap();
    assert_eq!(
        ac.add_pattern("d-u-p"),
        Err(PatternError::CapacityExceeded(Capacity::VertexPatternRefs))
    );
    assert_eq!(ac.pattern_count(), 2);

    // Both residents are reported at the shared end position.
    ac.build();
    ac.search(b"dup");
    assert_eq!(ac.sink().matches(), &[(0, 2), (1, 2)]);
}

// --- lifecycle ------------------------------------------------------------

#[test]
fn test_reset_returns_to_root_only() {
    let mut ac = built(&["he", "she"]);
    ac.search(b"she");
    assert!(!ac.sink().is_empty());

    ac.sink_mut().clear();
    ac.reset();
    assert_eq!(ac.vertex_count(), 1);
    assert_eq!(ac.pattern_count(), 0);

    ac.search(b"she");
    assert!(ac.sink().is_empty());

    // The automaton is fully reusable after a reset.
    ac.add_pattern("hers").unwrap();
    ac.build();
    ac.search(b"ushers");
    assert_eq!(ac.sink().matches(), &[(0, 5)]);
}

#[test]
fn test_patterns_accessor_keeps_insertion_order() {
    let ac = built(&["he", "she", "his"]);
    assert_eq!(ac.patterns(), &["he", "she", "his"]);
}

#[test]
fn test_threat_pattern_sampler() {
    // A slice of the packet-filter deployment this engine was sized for.
    let mut ac = built(&["shell", "payload", "exploit", "wget", "nmap"]);
    ac.search(b"GET /download?f=payload.bin HTTP - shellcode inside");
    let hits = ac.sink().matches();
    assert!(
        hits.contains(&(1, 22)),
        "payload ends at 22 in {:?}",
        hits
    );
    assert!(hits.contains(&(0, 39)), "shell ends at 39 in {:?}", hits);
}
