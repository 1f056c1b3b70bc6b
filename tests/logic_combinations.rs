//! Every AND/OR/NOT combination over the same fixtures

use pruf::{tuple, AndOp, DiscreteFuzzyRelation, Logic, NotOp, OrOp, Schema, Tuple};

const EPSILON: f64 = 1e-12;

fn rel(names: &[&str], pairs: Vec<(Tuple, f64)>) -> DiscreteFuzzyRelation {
    DiscreteFuzzyRelation::from_pairs(Schema::new(names.iter().copied()).unwrap(), pairs).unwrap()
}

fn a() -> DiscreteFuzzyRelation {
    rel(
        &["D1", "D2"],
        vec![(tuple![1, "v2"], 0.3), (tuple!["v1", 3.4], 0.6), (tuple![2, "v2"], 0.9)],
    )
}

fn b() -> DiscreteFuzzyRelation {
    rel(
        &["D1", "D2"],
        vec![(tuple![2, "v4"], 0.1), (tuple!["v3", 4.4], 0.5), (tuple!["v1", 3.4], 0.7), (tuple![2, "v2"], 1.)],
    )
}

fn empty() -> DiscreteFuzzyRelation {
    rel(&["D1", "D2"], vec![])
}

fn same(left: &DiscreteFuzzyRelation, right: &DiscreteFuzzyRelation) -> bool {
    left.schema() == right.schema()
        && left
            .elements()
            .chain(right.elements())
            .all(|tuple| (left.membership(tuple) - right.membership(tuple)).abs() <= EPSILON)
}

fn supported(relation: &DiscreteFuzzyRelation) -> bool {
    relation
        .iter()
        .all(|(tuple, mu)| tuple.len() == relation.schema().len() && mu > 0. && mu <= 1.)
}

#[test]
fn test_there_are_thirty_two_logics() {
    let logics: Vec<Logic> = Logic::all().collect();

    assert_eq!(logics.len(), 32);
    assert_eq!(logics[0], Logic::default());
    assert_eq!(logics.iter().filter(|logic| logic.and_op() == AndOp::Lukasiewicz).count(), 8);
}

#[test]
fn test_union_and_intersection_commute() {
    for logic in Logic::all() {
        let (a, b) = (a(), b());

        assert!(same(&a.union(&b, &logic).unwrap(), &b.union(&a, &logic).unwrap()), "{logic:?}");
        assert!(
            same(&a.intersection(&b, &logic).unwrap(), &b.intersection(&a, &logic).unwrap()),
            "{logic:?}"
        );
    }
}

#[test]
fn test_identity_and_annihilator() {
    for logic in Logic::all() {
        let a = a();

        assert!(same(&a.union(&empty(), &logic).unwrap(), &a), "{logic:?}");
        assert!(a.intersection(&empty(), &logic).unwrap().is_empty(), "{logic:?}");
        assert!(same(&a.difference(&empty(), &logic).unwrap(), &a), "{logic:?}");
    }
}

#[test]
fn test_results_keep_the_support_invariant() {
    let c = rel(&["D6", "D3"], vec![(tuple![1, "v2"], 0.3), (tuple!["x", 0.], 0.8)]);

    for logic in Logic::all() {
        let (a, b) = (a(), b());
        let results = [
            a.union(&b, &logic).unwrap(),
            a.intersection(&b, &logic).unwrap(),
            a.difference(&b, &logic).unwrap(),
            a.negate(&logic).unwrap(),
            a.cartesian_product(&c, &logic).unwrap(),
            a.projection(&["D2"], logic.or_op()).unwrap(),
            a.projection(&["D2"], logic.and_op()).unwrap(),
        ];

        for result in &results {
            assert!(supported(result), "{logic:?}: {result}");
        }
    }
}

#[test]
fn test_join_on_equal_schemas_is_intersection() {
    for logic in Logic::all() {
        let (a, b) = (a(), b());

        assert!(
            same(&a.natural_join(&b, &logic).unwrap(), &a.intersection(&b, &logic).unwrap()),
            "{logic:?}"
        );
    }
}

#[test]
fn test_cardinality_is_additive_over_disjoint_unions() {
    let left = rel(&["x"], vec![(tuple![1], 0.2), (tuple![2], 0.7)]);
    let right = rel(&["x"], vec![(tuple![3], 0.4), (tuple![4], 1.)]);

    for logic in Logic::all() {
        let union = left.union(&right, &logic).unwrap();

        assert!(
            (union.cardinality() - (left.cardinality() + right.cardinality())).abs() <= EPSILON,
            "{logic:?}"
        );
    }
}

#[test]
fn test_cartesian_schema_and_overlap() {
    let c = rel(&["D6", "D3"], vec![(tuple![1, "v2"], 0.3)]);

    for logic in Logic::all() {
        let product = a().cartesian_product(&c, &logic).unwrap();

        assert_eq!(product.schema().names(), ["D1", "D2", "D6", "D3"]);
        assert!(a().cartesian_product(&b(), &logic).is_err());
    }
}

#[test]
fn test_idempotence_holds_only_for_min_and_max() {
    for logic in Logic::all() {
        let a = a();
        let union = a.union(&a, &logic).unwrap();
        let meet = a.intersection(&a, &logic).unwrap();

        if logic.or_op() == OrOp::Max {
            assert!(same(&union, &a), "{logic:?}");
        } else {
            assert!(!same(&union, &a), "{logic:?}");
        }
        if logic.and_op() == AndOp::Min {
            assert!(same(&meet, &a), "{logic:?}");
        } else {
            assert!(!same(&meet, &a), "{logic:?}");
        }
    }
}

#[test]
fn test_negation_choice_changes_difference() {
    let (a, b) = (a(), b());
    let standard = Logic::default();
    let cosine = Logic::default().with_not(NotOp::Cosine);

    let with_standard = a.difference(&b, &standard).unwrap();
    let with_cosine = a.difference(&b, &cosine).unwrap();

    // 1 - 0.7 = 0.3 versus (1 + cos 0.7π) / 2 ≈ 0.206
    assert!((with_standard.membership(&tuple!["v1", 3.4]) - 0.3).abs() <= EPSILON);
    assert!(with_cosine.membership(&tuple!["v1", 3.4]) < 0.21);
    // μB = 1 leaves nothing of (2, 'v2') under either negation
    assert!(!with_standard.contains(&tuple![2, "v2"]));
    assert!(!with_cosine.contains(&tuple![2, "v2"]));
}
