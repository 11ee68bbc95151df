//! Ordered precedence lookups.
//!
//! Every cascade in the engine (override prices, competitor names, index
//! targets) has the same shape: try sources from most to least specific and
//! keep the first one that yields a value. Sources are evaluated lazily, so
//! a hit at an early level never touches the later ones.

/// First `Some` of an ordered sequence of lookups.
pub fn first_present<T, I>(sources: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    sources.into_iter().flatten().next()
}

/// A named, ordered list of levels. Resolving reports which level answered,
/// which the annotators use for debug logging.
#[derive(Debug, Clone, Copy)]
pub struct Cascade<L: 'static> {
    levels: &'static [L],
}

impl<L: Copy> Cascade<L> {
    pub const fn new(levels: &'static [L]) -> Self {
        Self { levels }
    }

    pub fn resolve<T>(&self, mut lookup: impl FnMut(L) -> Option<T>) -> Option<(L, T)> {
        first_present(
            self.levels
                .iter()
                .map(|&level| lookup(level).map(|value| (level, value))),
        )
    }

    pub fn value<T>(&self, lookup: impl FnMut(L) -> Option<T>) -> Option<T> {
        self.resolve(lookup).map(|(_, value)| value)
    }
}
