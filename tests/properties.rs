//! Property tests for the deferred acceptance solver.
//!
//! Every test draws its instances from a seeded ChaCha8 stream, so failures
//! are reproducible from the seed printed in the assertion message.

use hospital_resident::generator::{generate, generate_with_rng};
use hospital_resident::{
    DeferredAcceptance, HospitalId, Instance, Matching, ProposalOrder, ResidentId,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Random instance with random capacities and truncated resident lists.
fn random_instance(rng: &mut ChaCha8Rng, max_residents: usize, max_hospitals: usize) -> Instance {
    let num_residents = rng.gen_range(1..=max_residents);
    let num_hospitals = rng.gen_range(1..=max_hospitals);

    let mut instance = generate_with_rng(rng, num_residents, num_hospitals).unwrap();

    let capacities = (0..num_hospitals).map(|_| rng.gen_range(1..=3)).collect();
    instance.set_capacity_vector(capacities).unwrap();

    let limit = rng.gen_range(0..=num_hospitals);
    instance.truncate_resident_preferences(limit);
    instance
}

/// Position of `h` in `r`'s list; unmatched ranks after every listed hospital.
fn resident_rank(instance: &Instance, r: ResidentId, h: Option<HospitalId>) -> usize {
    let prefs = instance.resident_preferences(r);
    h.and_then(|h| prefs.iter().position(|&x| x == h))
        .unwrap_or(prefs.len())
}

/// Every stable matching of a (small) instance, by exhaustive enumeration.
fn all_stable_matchings(instance: &Instance) -> Vec<Matching> {
    let n = instance.num_residents();
    let options: Vec<Vec<Option<HospitalId>>> = (0..n)
        .map(|r| {
            std::iter::once(None)
                .chain(instance.resident_preferences(r).iter().map(|&h| Some(h)))
                .collect()
        })
        .collect();

    let mut stable = Vec::new();
    let mut choice = vec![0usize; n];
    loop {
        let assignments = (0..n).map(|r| options[r][choice[r]]).collect();
        if let Ok(matching) = Matching::from_assignments(instance, assignments) {
            if matching.is_stable(instance) {
                stable.push(matching);
            }
        }

        // Odometer increment over all combinations
        let mut i = 0;
        loop {
            if i == n {
                return stable;
            }
            choice[i] += 1;
            if choice[i] < options[i].len() {
                break;
            }
            choice[i] = 0;
            i += 1;
        }
    }
}

fn assert_consistent(instance: &Instance, matching: &Matching, seed: u64) {
    for r in 0..instance.num_residents() {
        match matching.hospital_of(r) {
            Some(h) => assert!(
                matching.roster(h).contains(&r),
                "seed {seed}: resident {r} assigned to {h} but missing from its roster"
            ),
            None => assert!(
                matching.rosters().iter().all(|roster| !roster.contains(&r)),
                "seed {seed}: unmatched resident {r} appears in a roster"
            ),
        }
    }
    for h in 0..instance.num_hospitals() {
        let roster = matching.roster(h);
        assert!(
            roster.len() <= instance.capacity(h),
            "seed {seed}: hospital {h} over capacity"
        );
        assert!(
            roster.windows(2).all(|w| instance.prefers(h, w[0], w[1])),
            "seed {seed}: roster of hospital {h} not in rank order"
        );
        for &r in roster {
            assert_eq!(matching.hospital_of(r), Some(h), "seed {seed}");
        }
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn matching_is_consistent_and_within_capacity() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for seed in 0..200u64 {
        let instance = random_instance(&mut rng, 40, 8);
        let matching = DeferredAcceptance::new().solve(&instance);
        assert_consistent(&instance, &matching, seed);
    }
}

#[test]
fn matching_has_no_blocking_pairs() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for seed in 0..200u64 {
        let instance = random_instance(&mut rng, 40, 8);
        let matching = DeferredAcceptance::new().solve(&instance);
        let pairs = matching.blocking_pairs(&instance);
        assert!(pairs.is_empty(), "seed {seed}: blocking pairs {pairs:?}");
    }
}

#[test]
fn processing_order_never_changes_the_result() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for seed in 0..200u64 {
        let instance = random_instance(&mut rng, 40, 8);
        let reference = DeferredAcceptance::new().solve(&instance);

        let orders = [
            ProposalOrder::Lifo,
            ProposalOrder::Shuffled(seed),
            ProposalOrder::Shuffled(seed.wrapping_mul(31).wrapping_add(7)),
        ];
        for order in orders {
            let (matching, receipt) =
                DeferredAcceptance::with_order(order).solve_with_receipt(&instance);
            assert_eq!(matching, reference, "seed {seed}, order {order:?}");
            assert_eq!(receipt.matching_root, reference.digest());
        }
    }
}

#[test]
fn matching_is_resident_optimal_among_all_stable_matchings() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for seed in 0..150u64 {
        let instance = random_instance(&mut rng, 5, 3);
        let ours = DeferredAcceptance::new().solve(&instance);
        let stable = all_stable_matchings(&instance);

        assert!(
            stable.contains(&ours),
            "seed {seed}: solver result not among the enumerated stable matchings"
        );
        for other in &stable {
            for r in 0..instance.num_residents() {
                assert!(
                    resident_rank(&instance, r, ours.hospital_of(r))
                        <= resident_rank(&instance, r, other.hospital_of(r)),
                    "seed {seed}: resident {r} does better in another stable matching"
                );
            }
        }
    }
}

#[test]
fn solve_is_deterministic_for_a_seed() {
    for seed in [1u64, 42, 12345678] {
        let a = DeferredAcceptance::new().solve(&generate(80, 6, Some(seed)).unwrap());
        let b = DeferredAcceptance::new().solve(&generate(80, 6, Some(seed)).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.digest_hex(), b.digest_hex());
    }
}

#[test]
fn truncation_keeps_matches_within_top_k() {
    for seed in 0..50u64 {
        let original = generate(30, 6, Some(seed)).unwrap();
        for k in 0..=6 {
            let truncated = original.clone().with_preference_limit(k);
            let matching = DeferredAcceptance::new().solve(&truncated);

            for r in 0..truncated.num_residents() {
                if let Some(h) = matching.hospital_of(r) {
                    assert!(
                        original.resident_preferences(r)[..k].contains(&h),
                        "seed {seed}, k {k}: resident {r} matched outside its top {k}"
                    );
                }
            }
            if k == 0 {
                assert_eq!(matching.unmatched_count(), 30);
            }
        }
    }
}

#[test]
fn enough_seats_and_full_lists_match_everyone() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..50 {
        let num_residents = rng.gen_range(1..60);
        let num_hospitals = rng.gen_range(1..8);
        let instance = generate_with_rng(&mut rng, num_residents, num_hospitals).unwrap();

        let matching = DeferredAcceptance::new().solve(&instance);
        assert_eq!(matching.unmatched_count(), 0);
    }
}

#[test]
fn proposals_bounded_by_total_list_length() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    for _ in 0..100 {
        let instance = random_instance(&mut rng, 40, 8);
        let total: usize = instance
            .all_resident_preferences()
            .iter()
            .map(Vec::len)
            .sum();

        let (matching, receipt) = DeferredAcceptance::new().solve_with_receipt(&instance);
        assert!(receipt.proposals as usize <= total);
        assert_eq!(
            receipt.proposals - receipt.evictions,
            matching.matched_count() as u64
        );
    }
}
