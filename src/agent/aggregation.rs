//! Aggregation of per-action expected values.
//!
//! Every agent variant runs the same backward induction; they differ only in
//! how the expected values of the candidate actions are folded together.

/// How candidate actions are folded into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Greatest value; the first action to reach it wins.
    Max,
    /// Least value; the first action to reach it wins.
    Min,
    /// Greatest value, keeping every action that reaches it.
    Ties,
}

/// Outcome of aggregating over a set of actions.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<A> {
    /// The aggregated value.
    pub value: f64,
    /// The selected action, or every tied action for `Aggregation::Ties`.
    pub actions: Vec<A>,
}

/// Incremental fold over `(action, value)` pairs in action order.
#[derive(Debug)]
pub(crate) struct Aggregator<A> {
    aggregation: Aggregation,
    best: Option<f64>,
    actions: Vec<A>,
}

impl<A> Aggregator<A> {
    pub(crate) fn new(aggregation: Aggregation) -> Self {
        Self {
            aggregation,
            best: None,
            actions: Vec::new(),
        }
    }

    pub(crate) fn offer(&mut self, action: A, value: f64) {
        let Some(best) = self.best else {
            self.best = Some(value);
            self.actions.push(action);
            return;
        };

        match self.aggregation {
            Aggregation::Max if value > best => self.replace(action, value),
            Aggregation::Min if value < best => self.replace(action, value),
            Aggregation::Ties if value > best => self.replace(action, value),
            #[allow(clippy::float_cmp)]
            Aggregation::Ties if value == best => self.actions.push(action),
            _ => {}
        }
    }

    fn replace(&mut self, action: A, value: f64) {
        self.best = Some(value);
        self.actions.clear();
        self.actions.push(action);
    }

    /// `None` when no action was offered.
    pub(crate) fn finish(self) -> Option<Evaluation<A>> {
        self.best.map(|value| Evaluation {
            value,
            actions: self.actions,
        })
    }
}
