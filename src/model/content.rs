//! Song data shown by the views, and request bookkeeping for it

use super::song::Song;
use super::types::ViewState;

/// Result slots filled by the oracle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchSlot {
    Featured,
    Search,
    Recommendations,
}

/// Identifies one issued fetch; a response is applied only if its ticket is still current
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub slot: FetchSlot,
    pub generation: u64,
}

#[derive(Clone, Copy, Debug, Default)]
struct Generations {
    featured: u64,
    search: u64,
    recommendations: u64,
}

impl Generations {
    fn slot_mut(&mut self, slot: FetchSlot) -> &mut u64 {
        match slot {
            FetchSlot::Featured => &mut self.featured,
            FetchSlot::Search => &mut self.search,
            FetchSlot::Recommendations => &mut self.recommendations,
        }
    }
}

/// Where "back" leads from the detail view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReturnPoint {
    pub view: ViewState,
    pub selected_index: usize,
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ViewState,
    pub featured_song: Option<Song>,
    pub search_results: Vec<Song>,
    pub selected_song: Option<Song>,
    pub recommendations: Vec<Song>,
    pub is_loading: bool,
    pub detail_return: Option<ReturnPoint>,
    generations: Generations,
    in_flight: usize,
}

impl ContentState {
    /// Registers a new fetch for `slot`, superseding any earlier one
    pub fn begin_fetch(&mut self, slot: FetchSlot) -> FetchTicket {
        let generation = self.generations.slot_mut(slot);
        *generation += 1;
        let ticket = FetchTicket { slot, generation: *generation };
        self.in_flight += 1;
        self.is_loading = true;
        ticket
    }

    /// Marks a fetch as resolved. Returns `false` if a newer fetch for the
    /// same slot was issued meanwhile, in which case the caller drops its response.
    pub fn finish_fetch(&mut self, ticket: FetchTicket) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.is_loading = self.in_flight > 0;
        *self.generations.slot_mut(ticket.slot) == ticket.generation
    }

    #[cfg(test)]
    pub fn with_view(view: ViewState) -> Self {
        Self {
            view,
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Songs listed by the current view
    pub fn visible_songs<'a>(&'a self, saved: &'a [Song]) -> &'a [Song] {
        match self.view {
            ViewState::Main => &[],
            ViewState::Search => &self.search_results,
            ViewState::Detail => &self.recommendations,
            ViewState::Saved => saved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_ticket_is_rejected() {
        let mut state = ContentState::default();
        let first = state.begin_fetch(FetchSlot::Search);
        let second = state.begin_fetch(FetchSlot::Search);
        assert!(state.is_loading);

        assert!(state.finish_fetch(second));
        assert!(state.is_loading, "first search still outstanding");
        assert!(!state.finish_fetch(first));
        assert!(!state.is_loading);
        assert_eq!(state.in_flight(), 0);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut state = ContentState::default();
        let featured = state.begin_fetch(FetchSlot::Featured);
        let search = state.begin_fetch(FetchSlot::Search);
        assert!(state.finish_fetch(search));
        assert!(state.finish_fetch(featured));
        assert!(!state.is_loading);
    }
}
