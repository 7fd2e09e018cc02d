//! Static checks over a machine definition using Validation.

use crate::machine::StateMachine;
use crate::validation::issues::ValidationIssue;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ValidationIssue>>;

fn check(ok: bool, issue: impl FnOnce() -> ValidationIssue) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(issue())
    }
}

/// Check a machine definition, accumulating ALL issues.
///
/// Returns `Validation::Success(())` when every state's outcomes resolve.
/// Execution never depends on this: an unvalidated machine reports the
/// same problems as errors when it reaches them.
pub fn validate(machine: &StateMachine) -> Validation<(), NonEmptyVec<ValidationIssue>> {
    let mut checks: Vec<Check> = Vec::new();

    checks.push(check(machine.states().next().is_some(), || {
        ValidationIssue::NoStates
    }));

    if let Some(start) = machine.start_state() {
        checks.push(check(machine.contains_state(start), || {
            ValidationIssue::MissingStartState(start.to_string())
        }));
    }

    let outcomes = machine.outcomes();
    for (name, transitions) in machine.states() {
        let Some(state) = machine.state(name) else {
            continue;
        };
        let declared = state.outcomes();

        for (outcome, target) in transitions.iter() {
            checks.push(check(declared.contains(outcome), || {
                ValidationIssue::UnknownTransitionKey {
                    state: name.to_string(),
                    outcome: outcome.to_string(),
                }
            }));

            let is_outcome = outcomes.contains(target);
            let is_state = machine.contains_state(target);
            checks.push(check(is_outcome || is_state, || {
                ValidationIssue::DanglingTarget {
                    state: name.to_string(),
                    outcome: outcome.to_string(),
                    target: target.to_string(),
                }
            }));
            checks.push(check(!(is_outcome && is_state), || {
                ValidationIssue::AmbiguousTarget {
                    state: name.to_string(),
                    outcome: outcome.to_string(),
                    target: target.to_string(),
                }
            }));
        }

        for outcome in declared.iter() {
            if transitions.get(outcome).is_some() {
                continue;
            }
            // Untranslated outcomes resolve by their own label.
            let is_outcome = outcomes.contains(outcome);
            let is_state = machine.contains_state(outcome);
            checks.push(check(is_outcome || is_state, || {
                ValidationIssue::UnhandledOutcome {
                    state: name.to_string(),
                    outcome: outcome.to_string(),
                }
            }));
            checks.push(check(!(is_outcome && is_state), || {
                ValidationIssue::AmbiguousTarget {
                    state: name.to_string(),
                    outcome: outcome.to_string(),
                    target: outcome.to_string(),
                }
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
