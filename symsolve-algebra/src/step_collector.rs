/// A type that records the rewrites an algorithm performs.
///
/// Implemented for `()`, which discards every step, and for [`Vec<S>`], which keeps them in the
/// order they were taken.
pub trait StepCollector<S> {
    /// Records a step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
