//! Split computation.
//!
//! Amounts are divided in integer minor units. Inexact divisions are floored
//! and the leftover units handed out one at a time, in participant input
//! order, so the shares always add up to the expense amount and identical
//! input always yields identical shares.

use std::collections::{HashMap, HashSet};

use tabsplit_core::{Money, Percentage, UserId};

use crate::error::{Mismatch, SplitError, SplitResult};
use crate::expense::{ExpenseSplit, NewExpense, Share};
use crate::method::SplitMethod;

/// Accepted distance of a percentage total from 100%, in basis points (0.01%).
pub const PERCENTAGE_TOLERANCE_BP: i64 = 1;

/// Applies the expense's split method and returns a reconciled split.
///
/// Pure function of its input: reads and writes nothing.
pub fn compute_split(expense: &NewExpense) -> SplitResult<ExpenseSplit> {
    let amount = expense.amount;
    if !amount.is_positive() {
        return Err(SplitError::InvalidAmount(amount));
    }

    let participants = expense.participants.as_slice();
    if participants.is_empty() {
        return Err(SplitError::EmptyParticipants);
    }

    let mut members = HashSet::with_capacity(participants.len());
    for &user in participants {
        if !members.insert(user) {
            return Err(SplitError::DuplicateParticipant(user));
        }
    }

    let minor_amounts = match &expense.method {
        SplitMethod::Equal => distribute(amount.minor_units(), &vec![1; participants.len()]),
        SplitMethod::Exact(entries) => {
            let supplied = align(participants, &members, entries)?;
            reject_negative(participants, &supplied, |m| m.is_negative())?;

            let actual = supplied
                .iter()
                .try_fold(Money::ZERO, |acc, &m| acc.checked_add(m))
                .ok_or(SplitError::ShareOverflow)?;
            if actual != amount {
                return Err(SplitError::SplitMismatch(Mismatch::Amount {
                    expected: amount,
                    actual,
                }));
            }
            supplied.iter().map(|m| m.minor_units()).collect()
        }
        SplitMethod::Percentage(entries) => {
            let supplied = align(participants, &members, entries)?;
            reject_negative(participants, &supplied, |p| p.is_negative())?;

            let actual = supplied
                .iter()
                .try_fold(Percentage::ZERO, |acc, &p| acc.checked_add(p))
                .ok_or(SplitError::ShareOverflow)?;
            let drift = actual.basis_points() - Percentage::FULL.basis_points();
            if drift.abs() > PERCENTAGE_TOLERANCE_BP {
                return Err(SplitError::SplitMismatch(Mismatch::Percentage {
                    expected: Percentage::FULL,
                    actual,
                }));
            }
            let weights: Vec<i64> = supplied.iter().map(|p| p.basis_points()).collect();
            distribute(amount.minor_units(), &weights)
        }
    };

    let shares: Vec<Share> = participants
        .iter()
        .zip(minor_amounts)
        .map(|(&user_id, minor)| Share {
            user_id,
            amount: Money::new(minor),
        })
        .collect();

    let split = ExpenseSplit::new(expense.id, expense.method.kind(), shares);

    let actual = split.total().ok_or(SplitError::ShareOverflow)?;
    if actual != amount {
        tracing::warn!(
            expense_id = %expense.id,
            expected = %amount,
            actual = %actual,
            "computed split failed reconciliation"
        );
        return Err(SplitError::Reconciliation {
            expected: amount,
            actual,
        });
    }

    tracing::debug!(
        expense_id = %expense.id,
        payer = %expense.payer,
        method = %split.method(),
        participants = participants.len(),
        "expense split computed"
    );

    Ok(split)
}

/// Orders per-user parameters by participant position.
fn align<T: Copy>(
    participants: &[UserId],
    members: &HashSet<UserId>,
    entries: &[(UserId, T)],
) -> SplitResult<Vec<T>> {
    let mut by_user: HashMap<UserId, T> = HashMap::with_capacity(entries.len());
    for &(user, value) in entries {
        if !members.contains(&user) {
            return Err(SplitError::UnknownParticipant(user));
        }
        if by_user.insert(user, value).is_some() {
            return Err(SplitError::DuplicateParticipant(user));
        }
    }

    participants
        .iter()
        .map(|user| {
            by_user
                .get(user)
                .copied()
                .ok_or(SplitError::MissingShare(*user))
        })
        .collect()
}

fn reject_negative<T>(
    participants: &[UserId],
    supplied: &[T],
    is_negative: impl Fn(&T) -> bool,
) -> SplitResult<()> {
    match supplied.iter().position(is_negative) {
        Some(idx) => Err(SplitError::NegativeShare(participants[idx])),
        None => Ok(()),
    }
}

/// Divides `amount` proportionally to `weights`.
///
/// Each part is floored; the leftover units go one each to positive-weight
/// entries in order. Weights must be non-negative with a positive total.
fn distribute(amount: i64, weights: &[i64]) -> Vec<i64> {
    let total_weight: i128 = weights.iter().map(|&w| i128::from(w)).sum();

    let mut parts: Vec<i64> = weights
        .iter()
        .map(|&w| (i128::from(amount) * i128::from(w) / total_weight) as i64)
        .collect();

    let mut remainder = amount - parts.iter().sum::<i64>();
    for (part, &weight) in parts.iter_mut().zip(weights) {
        if remainder == 0 {
            break;
        }
        if weight > 0 {
            *part += 1;
            remainder -= 1;
        }
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::SplitMethodKind;
    use proptest::prelude::*;
    use tabsplit_core::ExpenseId;

    fn users(n: usize) -> Vec<UserId> {
        (0..n).map(|_| UserId::new()).collect()
    }

    fn expense(amount: i64, participants: Vec<UserId>, method: SplitMethod) -> NewExpense {
        NewExpense {
            id: ExpenseId::new(),
            amount: Money::new(amount),
            description: "Dinner".to_string(),
            payer: participants.first().copied().unwrap_or_default(),
            participants,
            method,
        }
    }

    fn amounts(split: &ExpenseSplit) -> Vec<i64> {
        split.shares().iter().map(|s| s.amount.minor_units()).collect()
    }

    fn pct(s: &str) -> Percentage {
        s.parse().unwrap()
    }

    #[test]
    fn equal_split_gives_leftover_cent_to_first_participant() {
        let p = users(3);
        let split = compute_split(&expense(10_000, p.clone(), SplitMethod::Equal)).unwrap();

        assert_eq!(amounts(&split), vec![3334, 3333, 3333]);
        assert_eq!(split.share_of(p[0]), Some("33.34".parse().unwrap()));
        assert_eq!(split.total(), Some(Money::new(10_000)));
        assert_eq!(split.method(), SplitMethodKind::Equal);
    }

    #[test]
    fn equal_split_is_deterministic_for_same_order() {
        let p = users(7);
        let input = expense(100_003, p, SplitMethod::Equal);

        let first = compute_split(&input).unwrap();
        let second = compute_split(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn equal_split_of_one_cent_among_many() {
        let p = users(4);
        let split = compute_split(&expense(1, p, SplitMethod::Equal)).unwrap();
        assert_eq!(amounts(&split), vec![1, 0, 0, 0]);
    }

    #[test]
    fn payer_need_not_participate() {
        let p = users(2);
        let mut input = expense(500, p, SplitMethod::Equal);
        input.payer = UserId::new();

        let split = compute_split(&input).unwrap();
        assert!(!split.involves(input.payer));
        assert_eq!(amounts(&split), vec![250, 250]);
    }

    #[test]
    fn exact_split_keeps_supplied_amounts() {
        let p = users(2);
        let method = SplitMethod::Exact(vec![(p[1], Money::new(3000)), (p[0], Money::new(2000))]);

        let split = compute_split(&expense(5000, p.clone(), method)).unwrap();
        assert_eq!(split.share_of(p[0]), Some(Money::new(2000)));
        assert_eq!(split.share_of(p[1]), Some(Money::new(3000)));
        // Shares follow participant order, not parameter order.
        assert_eq!(split.shares()[0].user_id, p[0]);
    }

    #[test]
    fn exact_split_one_cent_short_is_rejected() {
        let p = users(2);
        let method = SplitMethod::Exact(vec![(p[0], Money::new(2000)), (p[1], Money::new(2999))]);

        let err = compute_split(&expense(5000, p, method)).unwrap_err();
        assert_eq!(
            err,
            SplitError::SplitMismatch(Mismatch::Amount {
                expected: Money::new(5000),
                actual: Money::new(4999),
            })
        );
        assert!(err.to_string().contains("49.99"));
    }

    #[test]
    fn percentage_split_summing_to_99_is_rejected() {
        let p = users(2);
        let method = SplitMethod::Percentage(vec![(p[0], pct("50")), (p[1], pct("49"))]);

        let err = compute_split(&expense(10_000, p, method)).unwrap_err();
        assert_eq!(
            err,
            SplitError::SplitMismatch(Mismatch::Percentage {
                expected: Percentage::FULL,
                actual: pct("99"),
            })
        );
    }

    #[test]
    fn percentage_halves_reconcile_on_odd_amounts() {
        let p = users(2);
        let halves = SplitMethod::Percentage(vec![(p[0], pct("50")), (p[1], pct("50"))]);

        let split = compute_split(&expense(9900, p.clone(), halves.clone())).unwrap();
        assert_eq!(amounts(&split), vec![4950, 4950]);

        let split = compute_split(&expense(99, p, halves)).unwrap();
        assert_eq!(amounts(&split), vec![50, 49]);
        assert_eq!(split.total(), Some(Money::new(99)));
    }

    #[test]
    fn percentage_within_tolerance_is_accepted_and_reconciles() {
        let p = users(3);
        let thirds = SplitMethod::Percentage(p.iter().map(|&u| (u, pct("33.33"))).collect());

        let split = compute_split(&expense(10_000, p, thirds)).unwrap();
        assert_eq!(amounts(&split), vec![3334, 3333, 3333]);
    }

    #[test]
    fn zero_percent_participant_never_receives_leftover() {
        let p = users(3);
        let method = SplitMethod::Percentage(vec![
            (p[0], pct("0")),
            (p[1], pct("50")),
            (p[2], pct("50")),
        ]);

        let split = compute_split(&expense(101, p, method)).unwrap();
        assert_eq!(amounts(&split), vec![0, 51, 50]);
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let p = users(1);
        assert_eq!(
            compute_split(&expense(0, p.clone(), SplitMethod::Equal)).unwrap_err(),
            SplitError::InvalidAmount(Money::ZERO)
        );
        assert_eq!(
            compute_split(&expense(-100, p, SplitMethod::Equal)).unwrap_err(),
            SplitError::InvalidAmount(Money::new(-100))
        );
    }

    #[test]
    fn empty_participants_are_rejected() {
        let input = expense(100, Vec::new(), SplitMethod::Equal);
        assert_eq!(compute_split(&input).unwrap_err(), SplitError::EmptyParticipants);
    }

    #[test]
    fn parameters_for_outsider_are_rejected() {
        let p = users(2);
        let outsider = UserId::new();
        let method = SplitMethod::Exact(vec![
            (p[0], Money::new(50)),
            (p[1], Money::new(25)),
            (outsider, Money::new(25)),
        ]);

        let err = compute_split(&expense(100, p, method)).unwrap_err();
        assert_eq!(err, SplitError::UnknownParticipant(outsider));
    }

    #[test]
    fn missing_parameter_is_rejected() {
        let p = users(2);
        let method = SplitMethod::Percentage(vec![(p[0], Percentage::FULL)]);

        let err = compute_split(&expense(100, p.clone(), method)).unwrap_err();
        assert_eq!(err, SplitError::MissingShare(p[1]));
    }

    #[test]
    fn duplicates_are_rejected() {
        let p = users(2);
        let twice = vec![p[0], p[1], p[0]];
        let err = compute_split(&expense(100, twice, SplitMethod::Equal)).unwrap_err();
        assert_eq!(err, SplitError::DuplicateParticipant(p[0]));

        let method = SplitMethod::Exact(vec![
            (p[0], Money::new(50)),
            (p[0], Money::new(50)),
            (p[1], Money::new(0)),
        ]);
        let err = compute_split(&expense(100, p.clone(), method)).unwrap_err();
        assert_eq!(err, SplitError::DuplicateParticipant(p[0]));
    }

    #[test]
    fn negative_shares_are_rejected() {
        let p = users(2);
        let method = SplitMethod::Exact(vec![(p[0], Money::new(150)), (p[1], Money::new(-50))]);

        let err = compute_split(&expense(100, p.clone(), method)).unwrap_err();
        assert_eq!(err, SplitError::NegativeShare(p[1]));
    }

    #[test]
    fn exact_shares_past_i64_range_are_rejected() {
        let p = users(2);
        let huge: Money = "92233720368547758.07".parse().unwrap();
        assert_eq!(huge, Money::new(i64::MAX));

        let method = SplitMethod::Exact(vec![(p[0], huge), (p[1], "1.00".parse().unwrap())]);
        let err = compute_split(&expense(100, p, method)).unwrap_err();
        assert_eq!(err, SplitError::ShareOverflow);
    }

    #[test]
    fn exact_shares_cannot_wrap_around_to_the_amount() {
        // i64::MAX + i64::MAX + 102 wraps to 100 in two's complement.
        let p = users(3);
        let method = SplitMethod::Exact(vec![
            (p[0], Money::new(i64::MAX)),
            (p[1], Money::new(i64::MAX)),
            (p[2], Money::new(102)),
        ]);

        let err = compute_split(&expense(100, p, method)).unwrap_err();
        assert_eq!(err, SplitError::ShareOverflow);
    }

    #[test]
    fn huge_percentages_are_rejected() {
        let p = users(3);
        let method = SplitMethod::Percentage(vec![
            (p[0], Percentage::from_basis_points(i64::MAX)),
            (p[1], Percentage::from_basis_points(i64::MAX)),
            (p[2], Percentage::from_basis_points(10_002)),
        ]);

        let err = compute_split(&expense(100, p.clone(), method)).unwrap_err();
        assert_eq!(err, SplitError::ShareOverflow);

        let method = SplitMethod::Percentage(vec![
            (p[0], Percentage::from_basis_points(i64::MAX)),
            (p[1], Percentage::ZERO),
            (p[2], Percentage::ZERO),
        ]);
        let err = compute_split(&expense(100, p, method)).unwrap_err();
        assert!(matches!(err, SplitError::SplitMismatch(Mismatch::Percentage { .. })));
    }

    #[test]
    fn largest_amount_splits_without_overflow() {
        let p = users(3);
        let split = compute_split(&expense(i64::MAX, p.clone(), SplitMethod::Equal)).unwrap();
        assert_eq!(split.total(), Some(Money::new(i64::MAX)));

        let method = SplitMethod::Percentage(vec![
            (p[0], pct("33.33")),
            (p[1], pct("33.33")),
            (p[2], pct("33.34")),
        ]);
        let split = compute_split(&expense(i64::MAX, p, method)).unwrap();
        assert_eq!(split.total(), Some(Money::new(i64::MAX)));
    }

    #[test]
    fn into_parts_records_method_kind() {
        let p = users(2);
        let method = SplitMethod::Exact(vec![(p[0], Money::new(2000)), (p[1], Money::new(3000))]);
        let input = expense(5000, p, method);
        let id = input.id;

        let (expense, split) = input.into_parts().unwrap();
        assert_eq!(expense.id, id);
        assert_eq!(expense.method, SplitMethodKind::Exact);
        assert_eq!(split.expense_id(), id);
        assert_eq!(split.total(), Some(expense.amount));
    }

    /// Percentages in basis points that sum to exactly 100%.
    fn full_percentages(raw: &[i64]) -> Vec<i64> {
        let raw_total: i64 = raw.iter().sum();
        let mut bps: Vec<i64> = raw.iter().map(|w| w * 10_000 / raw_total).collect();
        let assigned: i64 = bps.iter().sum();
        if let Some(last) = bps.last_mut() {
            *last += 10_000 - assigned;
        }
        bps
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: equal splits reconcile exactly, never go negative, and
        /// differ by at most one minor unit.
        #[test]
        fn equal_split_reconciles(amount in 1i64..10_000_000, n in 1usize..25) {
            let split = compute_split(&expense(amount, users(n), SplitMethod::Equal)).unwrap();
            let parts = amounts(&split);

            prop_assert_eq!(parts.iter().sum::<i64>(), amount);
            prop_assert!(parts.iter().all(|&p| p >= 0));
            let max = parts.iter().max().copied().unwrap_or(0);
            let min = parts.iter().min().copied().unwrap_or(0);
            prop_assert!(max - min <= 1);
        }

        /// Property: exact splits of a consistent breakdown are returned verbatim.
        #[test]
        fn exact_split_reconciles(parts in prop::collection::vec(0i64..1_000_000, 1..20)) {
            let amount: i64 = parts.iter().sum();
            prop_assume!(amount > 0);
            let p = users(parts.len());
            let method = SplitMethod::Exact(
                p.iter().zip(&parts).map(|(&u, &m)| (u, Money::new(m))).collect(),
            );

            let split = compute_split(&expense(amount, p, method)).unwrap();
            prop_assert_eq!(amounts(&split), parts);
            prop_assert_eq!(split.total(), Some(Money::new(amount)));
        }

        /// Property: percentage splits reconcile exactly and stay non-negative.
        #[test]
        fn percentage_split_reconciles(
            amount in 1i64..10_000_000,
            raw in prop::collection::vec(1i64..1_000, 1..20),
        ) {
            let bps = full_percentages(&raw);
            let p = users(bps.len());
            let method = SplitMethod::Percentage(
                p.iter()
                    .zip(&bps)
                    .map(|(&u, &b)| (u, Percentage::from_basis_points(b)))
                    .collect(),
            );

            let split = compute_split(&expense(amount, p, method)).unwrap();
            let parts = amounts(&split);
            prop_assert_eq!(parts.iter().sum::<i64>(), amount);
            prop_assert!(parts.iter().all(|&p| p >= 0));
        }

        /// Property: arbitrary exact shares over the whole non-negative range
        /// are either rejected or reconcile to the expense amount.
        #[test]
        fn extreme_exact_shares_never_panic(
            amount in 1i64..=i64::MAX,
            parts in prop::collection::vec(0i64..=i64::MAX, 1..6),
        ) {
            let p = users(parts.len());
            let method = SplitMethod::Exact(
                p.iter().zip(&parts).map(|(&u, &m)| (u, Money::new(m))).collect(),
            );

            match compute_split(&expense(amount, p, method)) {
                Ok(split) => prop_assert_eq!(split.total(), Some(Money::new(amount))),
                Err(err) => prop_assert!(matches!(
                    err,
                    SplitError::ShareOverflow | SplitError::SplitMismatch(_)
                )),
            }
        }

        /// Property: arbitrary percentages over the whole non-negative range
        /// are either rejected or reconcile to the expense amount.
        #[test]
        fn extreme_percentages_never_panic(
            amount in 1i64..=i64::MAX,
            bps in prop::collection::vec(0i64..=i64::MAX, 1..6),
        ) {
            let p = users(bps.len());
            let method = SplitMethod::Percentage(
                p.iter()
                    .zip(&bps)
                    .map(|(&u, &b)| (u, Percentage::from_basis_points(b)))
                    .collect(),
            );

            match compute_split(&expense(amount, p, method)) {
                Ok(split) => prop_assert_eq!(split.total(), Some(Money::new(amount))),
                Err(err) => prop_assert!(matches!(
                    err,
                    SplitError::ShareOverflow | SplitError::SplitMismatch(_)
                )),
            }
        }
    }
}
