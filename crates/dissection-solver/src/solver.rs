//! Bounded branch-and-bound search for the shortest exchange sequence.
//!
//! Every branch works on its own copy of the arrangement, so siblings never
//! see each other's exchanges. There is no memoization: the same arrangement
//! may be explored many times along different paths. The search is fully
//! deterministic, and ties between equally short solutions are broken by
//! enumeration order alone.

use std::time::Instant;

use crate::state::{State, SwapStep, SLOT_COUNT};

/// An ordered sequence of exchanges
pub type Solution = Vec<SwapStep>;

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Deepest recursion level that may still branch. A solution holds at
    /// most `max_depth + 1` steps.
    pub max_depth: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_depth: 5 }
    }
}

/// Counters gathered while searching
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub nodes_explored: usize,
}

/// Result of a solver run
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Shortest solution found, `None` if the target is out of reach
    pub solution: Option<Solution>,
    /// Number of search nodes visited
    pub nodes_explored: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

/// Search for the shortest exchange sequence turning `current` into `target`.
pub fn solve(current: &State, target: &State, config: &SolverConfig) -> SolverResult {
    let start_time = Instant::now();
    let mut stats = SearchStats::default();

    let solution = search(current.clone(), target, 0, config.max_depth, &mut stats);

    let time_elapsed_ms = start_time.elapsed().as_millis() as u64;
    tracing::debug!(
        max_depth = config.max_depth,
        nodes = stats.nodes_explored,
        steps = solution.as_ref().map(Vec::len),
        time_elapsed_ms,
        "search finished"
    );

    SolverResult {
        solution,
        nodes_explored: stats.nodes_explored,
        time_elapsed_ms,
    }
}

/// Recursive search from `current` at the given depth.
///
/// Returns an empty solution if `current` already matches, `None` if no
/// sequence within the depth bound reaches `target`.
pub fn search(
    current: State,
    target: &State,
    depth: usize,
    max_depth: usize,
    stats: &mut SearchStats,
) -> Option<Solution> {
    stats.nodes_explored += 1;

    if current == *target {
        return Some(Vec::new());
    }
    if depth > max_depth {
        return None;
    }

    let mut best: Option<Solution> = None;

    for i in 0..SLOT_COUNT {
        for j in (i + 1)..SLOT_COUNT {
            for k in current.slot(i).kinds() {
                for l in current.slot(j).kinds() {
                    if k == l {
                        continue;
                    }

                    let step = SwapStep::new(i, k, j, l);
                    // both kinds were just read from the slots
                    let Some(next) = current.apply(&step) else {
                        continue;
                    };

                    // nothing beats a single exchange from here
                    if next == *target {
                        return Some(vec![step]);
                    }

                    let Some(rest) = search(next, target, depth + 1, max_depth, stats) else {
                        continue;
                    };
                    // `rest` excludes this step while `recorded` includes its own,
                    // so a later branch of equal total length replaces it
                    let improves = best
                        .as_ref()
                        .map_or(true, |recorded| rest.len() < recorded.len());
                    if improves {
                        tracing::trace!(depth, steps = rest.len() + 1, "recorded solution");
                        let mut candidate = Vec::with_capacity(rest.len() + 1);
                        candidate.push(step);
                        candidate.extend(rest);
                        best = Some(candidate);
                    }
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PieceKind, SolidKind};

    fn states(current: [SolidKind; 3], target: [SolidKind; 3]) -> (State, State) {
        (State::from_solids(&current), State::from_solids(&target))
    }

    #[test]
    fn test_already_solved() {
        let (current, target) = states(
            [SolidKind::Cylinder, SolidKind::Cone, SolidKind::Prism],
            [SolidKind::Cylinder, SolidKind::Cone, SolidKind::Prism],
        );

        let result = solve(&current, &target, &SolverConfig::default());
        assert_eq!(result.solution, Some(Vec::new()));
        assert_eq!(result.nodes_explored, 1);
    }

    #[test]
    fn test_single_exchange_is_minimal() {
        let (current, target) = states(
            [SolidKind::Cylinder, SolidKind::Cone, SolidKind::Prism],
            [SolidKind::Cylinder, SolidKind::Prism, SolidKind::Cone],
        );

        let solution = solve(&current, &target, &SolverConfig::default())
            .solution
            .unwrap();
        assert_eq!(
            solution,
            vec![SwapStep::new(1, PieceKind::Circle, 2, PieceKind::Square)]
        );
    }

    #[test]
    fn test_pure_solids_to_mixed_targets() {
        let (current, target) = states(
            [SolidKind::Sphere, SolidKind::Cube, SolidKind::Pyramid],
            [SolidKind::Cylinder, SolidKind::Cone, SolidKind::Prism],
        );

        let solution = solve(&current, &target, &SolverConfig::default())
            .solution
            .unwrap();
        assert_eq!(
            solution,
            vec![
                SwapStep::new(1, PieceKind::Square, 2, PieceKind::Triangle),
                SwapStep::new(0, PieceKind::Circle, 1, PieceKind::Square),
            ]
        );
        assert_eq!(current.apply_all(&solution), Some(target));
    }

    #[test]
    fn test_depth_bound_gives_no_solution() {
        let (current, target) = states(
            [SolidKind::Sphere, SolidKind::Cube, SolidKind::Pyramid],
            [SolidKind::Cylinder, SolidKind::Cone, SolidKind::Prism],
        );

        let result = solve(&current, &target, &SolverConfig { max_depth: 0 });
        assert!(result.solution.is_none());
        assert!(result.nodes_explored > 1);

        let result = solve(&current, &target, &SolverConfig { max_depth: 1 });
        assert_eq!(result.solution.map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_search_is_deterministic() {
        let (current, target) = states(
            [SolidKind::Cube, SolidKind::Sphere, SolidKind::Pyramid],
            [SolidKind::Prism, SolidKind::Cone, SolidKind::Cylinder],
        );
        let config = SolverConfig::default();

        let first = solve(&current, &target, &config);
        let second = solve(&current, &target, &config);
        assert_eq!(first.solution, second.solution);
        assert_eq!(first.nodes_explored, second.nodes_explored);
        assert_eq!(
            first.solution.unwrap(),
            vec![
                SwapStep::new(1, PieceKind::Circle, 2, PieceKind::Triangle),
                SwapStep::new(0, PieceKind::Square, 2, PieceKind::Triangle),
            ]
        );
    }

    #[test]
    fn test_later_branch_of_equal_length_replaces_earlier() {
        // several first exchanges lead to two-step solutions; the last one
        // enumerated is kept
        let (current, target) = states(
            [SolidKind::Cylinder, SolidKind::Cylinder, SolidKind::Pyramid],
            [SolidKind::Cone, SolidKind::Prism, SolidKind::Cylinder],
        );

        let solution = solve(&current, &target, &SolverConfig::default())
            .solution
            .unwrap();
        assert_eq!(
            solution,
            vec![
                SwapStep::new(1, PieceKind::Circle, 2, PieceKind::Triangle),
                SwapStep::new(0, PieceKind::Square, 2, PieceKind::Triangle),
            ]
        );
        assert_eq!(current.apply_all(&solution), Some(target));
    }

    #[test]
    fn test_unreachable_target() {
        // Slot totals differ, so no sequence of exchanges can match
        let current = State::from_solids(&[SolidKind::Sphere, SolidKind::Cube, SolidKind::Pyramid]);
        let mut target = current.clone();
        target.slots[0].add(PieceKind::Circle);

        let result = solve(&current, &target, &SolverConfig { max_depth: 2 });
        assert!(result.solution.is_none());
    }
}
