use super::cost_field::CostField;
use super::search::PathSearch;
use super::types::Point;
use crate::common::NavResult;

/// Order `targets` by the search cost of reaching each one from `origin`.
///
/// This is a greedy nearest-first ordering from a single origin, not a tour
/// optimisation: the cost of later legs is never considered. Unreachable
/// targets keep their relative order and go last so the caller surfaces the
/// failure when it actually tries to reach them.
pub fn order_targets(
    search: &mut PathSearch,
    field: &CostField,
    origin: Point,
    targets: &[Point],
) -> NavResult<Vec<Point>> {
    let mut keyed = Vec::with_capacity(targets.len());
    for &target in targets {
        let cost = match search.find(field, origin, target) {
            Ok(outcome) => outcome.cost_to(target).unwrap_or(u32::MAX),
            Err(e) if e.is_recoverable() => {
                tracing::warn!("Target {} is unreachable from {}: {}", target, origin, e);
                u32::MAX
            }
            Err(e) => return Err(e),
        };
        keyed.push((cost, target));
    }
    keyed.sort_by_key(|(cost, _)| *cost);
    Ok(keyed.into_iter().map(|(_, target)| target).collect())
}
