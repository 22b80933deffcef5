//! Featured item selection for the list view.
//!
//! The list view highlights one item picked at random. The pick is tied to
//! the ordered id sequence it was made for: it is redrawn exactly when that
//! sequence changes, and survives content-only changes such as toggling.

use crate::container::TodoEnvironment;
use crate::types::{TodoAction, TodoId, TodoItem, TodoState, ids};
use todo_view_core::environment::RandomSource;
use todo_view_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Featured index plus the id sequence it was drawn for
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeaturedSelector {
    index: Option<usize>,
    rendered_ids: Vec<TodoId>,
    active: bool,
}

impl FeaturedSelector {
    /// Creates an inactive selector with nothing featured
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin selecting for `items`
    ///
    /// Draws the first pick unless `items` is empty.
    pub fn start(&mut self, items: &[TodoItem], random: &dyn RandomSource) {
        self.active = true;
        self.rendered_ids = ids(items);
        self.index = draw(items.len(), random);
        tracing::debug!(featured = ?self.index, len = items.len(), "Featured selection started");
    }

    /// Redraw if `current` differs from `previous`
    ///
    /// Comparison is order-sensitive. Returns whether a redraw happened.
    pub fn on_inputs_changed(
        &mut self,
        previous: &[TodoId],
        current: &[TodoId],
        random: &dyn RandomSource,
    ) -> bool {
        if previous == current {
            return false;
        }

        self.rendered_ids = current.to_vec();
        self.index = draw(current.len(), random);
        tracing::debug!(featured = ?self.index, len = current.len(), "Featured item redrawn");
        true
    }

    /// Compare `items` with the last rendered sequence and redraw if needed
    ///
    /// Does nothing while inactive. Returns whether a redraw happened.
    pub fn reconcile(&mut self, items: &[TodoItem], random: &dyn RandomSource) -> bool {
        if !self.active {
            return false;
        }

        let previous = std::mem::take(&mut self.rendered_ids);
        let current = ids(items);
        let changed = self.on_inputs_changed(&previous, &current, random);
        if !changed {
            self.rendered_ids = previous;
        }
        changed
    }

    /// End selection and forget the pick
    pub fn stop(&mut self) {
        self.active = false;
        self.index = None;
        self.rendered_ids.clear();
    }

    /// Whether the selector is between `start` and `stop`
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Index of the featured item, `None` when there is nothing to feature
    #[must_use]
    pub const fn featured_index(&self) -> Option<usize> {
        self.index
    }

    /// The featured item within `items`
    #[must_use]
    pub fn featured<'a>(&self, items: &'a [TodoItem]) -> Option<&'a TodoItem> {
        self.index.and_then(|index| items.get(index))
    }
}

fn draw(len: usize, random: &dyn RandomSource) -> Option<usize> {
    (len > 0).then(|| random.pick_index(len))
}

/// Keeps [`TodoState::featured`] in step with [`TodoState::todos`]
///
/// Meant to run after the list container in a combined reducer, so it sees
/// the collection the container just produced.
#[derive(Clone, Debug, Default)]
pub struct FeaturedReducer;

impl FeaturedReducer {
    /// Creates a new `FeaturedReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for FeaturedReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::Stop => state.featured.stop(),
            TodoAction::Start if !state.featured.is_active() => {
                state.featured.start(&state.todos, env.random.as_ref());
            },
            _ => {
                state.featured.reconcile(&state.todos, env.random.as_ref());
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_view_testing::{FixedRandom, SequenceRandom};

    fn items(ids: &[i64]) -> Vec<TodoItem> {
        ids.iter().map(|&id| TodoItem::new(id, format!("item {id}"))).collect()
    }

    #[test]
    fn empty_start_features_nothing_and_draws_nothing() {
        let random = SequenceRandom::default();
        let mut selector = FeaturedSelector::new();

        selector.start(&[], &random);

        assert!(selector.is_active());
        assert_eq!(selector.featured_index(), None);
        assert!(selector.featured(&[]).is_none());
        assert_eq!(random.pick_count(), 0);
    }

    #[test]
    fn first_population_draws() {
        let random = SequenceRandom::new([1]);
        let mut selector = FeaturedSelector::new();
        selector.start(&[], &random);

        let list = items(&[1, 2]);
        assert!(selector.reconcile(&list, &random));

        assert_eq!(selector.featured_index(), Some(1));
        assert_eq!(selector.featured(&list).map(|t| &t.id), Some(&TodoId::from(2)));
        assert_eq!(random.picks(), vec![2]);
    }

    #[test]
    fn content_change_keeps_the_pick() {
        let random = SequenceRandom::new([0, 1]);
        let mut selector = FeaturedSelector::new();
        let list = items(&[1, 2]);
        selector.start(&list, &random);

        let toggled = crate::types::toggle(&list, &TodoId::from(1));
        assert!(!selector.reconcile(&toggled, &random));

        assert_eq!(selector.featured_index(), Some(0));
        assert_eq!(random.pick_count(), 1);
    }

    #[test]
    fn reorder_redraws() {
        let random = SequenceRandom::new([0, 0]);
        let mut selector = FeaturedSelector::new();
        selector.start(&items(&[1, 2]), &random);

        assert!(selector.reconcile(&items(&[2, 1]), &random));
        assert_eq!(random.pick_count(), 2);
    }

    #[test]
    fn shrinking_redraws_within_the_new_range() {
        let random = SequenceRandom::new([2, 5]);
        let mut selector = FeaturedSelector::new();
        selector.start(&items(&[1, 2, 3]), &random);
        assert_eq!(selector.featured_index(), Some(2));

        assert!(selector.reconcile(&items(&[1]), &random));
        assert_eq!(selector.featured_index(), Some(0));
    }

    #[test]
    fn becoming_empty_clears_the_pick() {
        let random = FixedRandom::new(0);
        let mut selector = FeaturedSelector::new();
        selector.start(&items(&[1]), &random);

        assert!(selector.reconcile(&[], &random));
        assert_eq!(selector.featured_index(), None);
    }

    #[test]
    fn on_inputs_changed_compares_sequences() {
        let random = SequenceRandom::new([0]);
        let mut selector = FeaturedSelector::new();
        let a = vec![TodoId::from(1), TodoId::from(2)];

        assert!(!selector.on_inputs_changed(&a, &a.clone(), &random));
        assert_eq!(random.pick_count(), 0);
        assert!(selector.on_inputs_changed(&a, &a[..1], &random));
        assert_eq!(random.pick_count(), 1);
    }

    #[test]
    fn inactive_selector_ignores_changes() {
        let random = SequenceRandom::default();
        let mut selector = FeaturedSelector::new();

        assert!(!selector.reconcile(&items(&[1, 2]), &random));
        assert_eq!(selector.featured_index(), None);
        assert_eq!(random.pick_count(), 0);
    }

    #[test]
    fn stop_forgets_the_pick() {
        let random = FixedRandom::new(0);
        let mut selector = FeaturedSelector::new();
        selector.start(&items(&[1]), &random);

        selector.stop();

        assert!(!selector.is_active());
        assert_eq!(selector.featured_index(), None);
    }
}
