//! Priority reduction and winner selection over filtered candidates.

use crate::airport::StandDefinition;

/// Keep only candidates at the lowest declared priority.
///
/// When no candidate declares a priority the set is left unchanged;
/// otherwise candidates without one are dropped as well.
pub fn reduce_by_priority(candidates: &mut Vec<&StandDefinition>) {
    let Some(lowest) = candidates.iter().filter_map(|s| s.priority).min() else {
        return;
    };
    candidates.retain(|s| s.priority == Some(lowest));
}

/// Pick the winning stand.
///
/// The candidate whose `Code` has the smallest highest character wins, so
/// narrowly scoped stands are used before general ones. Candidates without a
/// code do not compete. With no code at all the first candidate wins; ties
/// go to the earlier candidate.
pub fn select_winner<'a>(candidates: &[&'a StandDefinition]) -> Option<&'a StandDefinition> {
    let first = candidates.first().copied()?;
    let best = candidates
        .iter()
        .copied()
        .filter_map(|s| s.code_ceiling().map(|ceiling| (ceiling, s)))
        .min_by_key(|(ceiling, _)| *ceiling);
    Some(best.map_or(first, |(_, stand)| stand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names<'a>(stands: &[&'a StandDefinition]) -> Vec<&'a str> {
        stands.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_priority_reduction_drops_undeclared() {
        let stands = vec![
            StandDefinition::new("P3").with_priority(3),
            StandDefinition::new("P1a").with_priority(1),
            StandDefinition::new("P1b").with_priority(1),
            StandDefinition::new("P5").with_priority(5),
            StandDefinition::new("none"),
        ];
        let mut candidates: Vec<_> = stands.iter().collect();
        reduce_by_priority(&mut candidates);

        assert_eq!(names(&candidates), vec!["P1a", "P1b"]);
    }

    #[test]
    fn test_priority_reduction_without_declarations() {
        let stands = vec![StandDefinition::new("A"), StandDefinition::new("B")];
        let mut candidates: Vec<_> = stands.iter().collect();
        reduce_by_priority(&mut candidates);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_negative_priority_is_lowest() {
        let stands = vec![
            StandDefinition::new("A").with_priority(0),
            StandDefinition::new("B").with_priority(-2),
        ];
        let mut candidates: Vec<_> = stands.iter().collect();
        reduce_by_priority(&mut candidates);
        assert_eq!(names(&candidates), vec!["B"]);
    }

    #[test]
    fn test_smallest_code_ceiling_wins() {
        let stands = vec![
            StandDefinition::new("wide").with_code("CD"),
            StandDefinition::new("narrow").with_code("AB"),
        ];
        let candidates: Vec<_> = stands.iter().collect();
        assert_eq!(select_winner(&candidates).unwrap().name, "narrow");
    }

    #[test]
    fn test_uncoded_candidates_do_not_compete() {
        let stands = vec![
            StandDefinition::new("open"),
            StandDefinition::new("empty").with_code(""),
            StandDefinition::new("coded").with_code("EF"),
        ];
        let candidates: Vec<_> = stands.iter().collect();
        assert_eq!(select_winner(&candidates).unwrap().name, "coded");
    }

    #[test]
    fn test_first_wins_without_codes_or_on_tie() {
        let stands = vec![StandDefinition::new("first"), StandDefinition::new("second")];
        let candidates: Vec<_> = stands.iter().collect();
        assert_eq!(select_winner(&candidates).unwrap().name, "first");

        let tied = vec![
            StandDefinition::new("x").with_code("BC"),
            StandDefinition::new("y").with_code("AC"),
        ];
        let candidates: Vec<_> = tied.iter().collect();
        assert_eq!(select_winner(&candidates).unwrap().name, "x");
    }

    #[test]
    fn test_empty_has_no_winner() {
        assert!(select_winner(&[]).is_none());
    }

    proptest! {
        #[test]
        fn prop_winner_has_minimal_ceiling(codes in prop::collection::vec(prop::option::of("[A-F]{0,3}"), 1..8)) {
            let stands: Vec<StandDefinition> = codes
                .iter()
                .enumerate()
                .map(|(i, code)| {
                    let stand = StandDefinition::new(i.to_string());
                    match code {
                        Some(code) => stand.with_code(code.clone()),
                        None => stand,
                    }
                })
                .collect();
            let candidates: Vec<_> = stands.iter().collect();
            let winner = select_winner(&candidates).unwrap();

            match stands.iter().filter_map(StandDefinition::code_ceiling).min() {
                Some(min) => prop_assert_eq!(winner.code_ceiling(), Some(min)),
                None => prop_assert_eq!(&winner.name, "0"),
            }
        }
    }
}
