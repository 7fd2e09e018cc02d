//! Macros for ergonomic state machine construction.

/// Build a [`TransitionTable`](crate::machine::TransitionTable) from
/// `outcome => target` pairs.
///
/// # Example
///
/// ```
/// use jugglebot_fsm::transitions;
///
/// let table = transitions! {
///     "done" => "EXIT",
///     "retry" => "THROW",
/// };
/// assert_eq!(table.get("retry"), Some("THROW"));
///
/// let empty = transitions! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! transitions {
    () => {
        $crate::machine::TransitionTable::new()
    };
    ($($outcome:expr => $target:expr),+ $(,)?) => {
        $crate::machine::TransitionTable::new()
            $(.with($outcome, $target))+
    };
}
