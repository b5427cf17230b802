//! Collection of the steps taken by the simplifier.

use std::fmt::Debug;

/// A type that collects the steps of an algorithm.
///
/// [`StepCollector`] is implemented for the unit type `()`, which discards every step, and for
/// [`Vec`], which keeps them in order.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        self.push(step);
    }
}

/// Wraps another collector, logging each step at the `trace` level before handing it on.
#[derive(Debug, Default)]
pub struct Traced<C>(pub C);

impl<S: Debug, C: StepCollector<S>> StepCollector<S> for Traced<C> {
    fn push(&mut self, step: S) {
        log::trace!("applied {:?}", step);
        self.0.push(step);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn traced_forwards_steps() {
        let mut collector = Traced(Vec::<i32>::new());
        StepCollector::push(&mut collector, 1);
        StepCollector::push(&mut collector, 2);
        assert_eq!(collector.0, vec![1, 2]);
    }
}
