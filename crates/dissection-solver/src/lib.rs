//! Dissection puzzle solver library.
//!
//! Three solids, each made of two flat pieces, are turned into three target
//! solids by exchanging pieces pairwise between them. This crate validates a
//! request, builds the current and target arrangements, and searches for the
//! shortest sequence of exchanges.

pub mod catalog;
pub mod solver;
pub mod state;
pub mod validate;

use thiserror::Error;

// Re-export main types
pub use catalog::{PieceKind, SolidKind};
pub use solver::{search, solve, SearchStats, Solution, SolverConfig, SolverResult};
pub use state::{render_solution, SlotState, State, SwapStep};
pub use validate::{validate, Request, ValidationError};

/// Terminal failure of a dissection request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DissectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no dissections found")]
    NoSolution,
}

/// Reply for a request whose solids already match their targets
pub const ALREADY_ARRANGED: &str = "Already arranged, no dissections needed";

/// A solved request together with search statistics
#[derive(Debug, Clone)]
pub struct Dissection {
    pub steps: Solution,
    pub nodes_explored: usize,
    pub time_elapsed_ms: u64,
}

/// Solve a request with the default search depth.
pub fn dissect<S: AsRef<str>>(letters: &str, solids: &[S]) -> Result<Solution, DissectError> {
    dissect_with(letters, solids, &SolverConfig::default()).map(|dissection| dissection.steps)
}

/// Solve a request with an explicit configuration.
pub fn dissect_with<S: AsRef<str>>(
    letters: &str,
    solids: &[S],
    config: &SolverConfig,
) -> Result<Dissection, DissectError> {
    let request = validate(letters, solids)?;
    let (current, target) = request.build_states();

    let SolverResult {
        solution,
        nodes_explored,
        time_elapsed_ms,
    } = solve(&current, &target, config);

    match solution {
        Some(steps) => Ok(Dissection {
            steps,
            nodes_explored,
            time_elapsed_ms,
        }),
        None => {
            tracing::info!(letters, nodes = nodes_explored, "no dissections found");
            Err(DissectError::NoSolution)
        }
    }
}

/// Text entry point taking four positional strings: the target letters and
/// three current solid names.
///
/// Returns the numbered instructions, `ALREADY_ARRANGED` when no exchange is
/// needed, or the error message on failure.
pub fn dissect_text(letters: &str, first: &str, second: &str, third: &str) -> String {
    match dissect(letters, &[first, second, third]) {
        Ok(solution) if solution.is_empty() => ALREADY_ARRANGED.to_string(),
        Ok(solution) => render_solution(&solution),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dissect_text_end_to_end() {
        let text = dissect_text("TSC", "sphere", "cube", "pyramid");
        assert_eq!(
            text,
            "1. Dissect square on middle and dissect triangle on right\n\
             2. Dissect circle on left and dissect square on middle\n"
        );
    }

    #[test]
    fn test_dissect_text_already_arranged() {
        assert_eq!(dissect_text("TSC", "cylinder", "cone", "prism"), ALREADY_ARRANGED);
        assert_eq!(dissect_text("cts", "prism", "cylinder", "cone"), ALREADY_ARRANGED);
        assert_eq!(dissect("TSC", &["cylinder", "cone", "prism"]), Ok(Vec::new()));
    }

    #[test]
    fn test_dissect_text_reports_errors() {
        assert_eq!(
            dissect_text("TTC", "sphere", "cube", "pyramid"),
            "the solo callout letters must contain exactly one T, one S, and one C"
        );
        assert_eq!(
            dissect_text("TSC", "sphere", "sphere", "sphere"),
            "the selected objects must add up to exactly 2 circles, 2 squares, and 2 triangles"
        );
        assert_eq!(
            dissect_text("TSC", "sphere", "cube", "Pyramid"),
            "the 3D object Pyramid is not valid"
        );
    }

    #[test]
    fn test_dissect_no_solution_within_depth() {
        let err = dissect_with("TSC", &["sphere", "cube", "pyramid"], &SolverConfig { max_depth: 0 })
            .unwrap_err();
        assert_eq!(err, DissectError::NoSolution);
        assert_eq!(err.to_string(), "no dissections found");
    }

    #[test]
    fn test_dissect_validation_error_wrapped() {
        let err = dissect("TSC", &["sphere", "cube"]).unwrap_err();
        assert_eq!(err, DissectError::Validation(ValidationError::SolidCount(2)));
    }

    #[test]
    fn test_every_valid_request_is_solved() {
        let letter_orders = ["TSC", "TCS", "STC", "SCT", "CTS", "CST"];
        let mut checked = 0;

        for a in SolidKind::ALL {
            for b in SolidKind::ALL {
                for c in SolidKind::ALL {
                    let names = [a.name(), b.name(), c.name()];
                    for letters in letter_orders {
                        let Ok(request) = validate(letters, &names) else {
                            continue;
                        };
                        let (current, target) = request.build_states();
                        let solution = dissect(letters, &names).unwrap();

                        assert!(solution.len() <= 5);
                        let mut state = current.clone();
                        for step in &solution {
                            state = state.apply(step).unwrap();
                            assert_eq!(state.total(), 6);
                            assert!(state.slots.iter().all(|slot| slot.total() == 2));
                        }
                        assert_eq!(state, target, "{letters} {names:?}");
                        checked += 1;
                    }
                }
            }
        }

        // 21 balanced solid triples, 6 letter orders each
        assert_eq!(checked, 126);
    }

    #[test]
    fn test_single_exchange_found_when_available() {
        for letters in ["TSC", "TCS", "STC", "SCT", "CTS", "CST"] {
            let request = validate(letters, &["cylinder", "cone", "prism"]).unwrap();
            let (current, target) = request.build_states();

            let one_step = (0..3).any(|i| {
                (i + 1..3).any(|j| {
                    current.slot(i).kinds().any(|k| {
                        current.slot(j).kinds().any(|l| {
                            k != l && current.apply(&SwapStep::new(i, k, j, l)).as_ref() == Some(&target)
                        })
                    })
                })
            });

            let solution = dissect(letters, &["cylinder", "cone", "prism"]).unwrap();
            if one_step {
                assert_eq!(solution.len(), 1, "{letters}");
            }
        }
    }
}
