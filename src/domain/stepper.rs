//! Linear navigation over a fixed-length list of lesson items.

/// Outcome of advancing a [`Stepper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(usize),
    /// Advanced past the last item for the first time.
    Finished,
    AlreadyFinished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub struct Stepper {
    index: usize,
    len: usize,
    finished: bool,
}

impl Stepper {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            finished: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn next(&mut self) -> Advance {
        if !self.is_last() {
            self.index += 1;
            return Advance::Moved(self.index);
        }
        self.finish()
    }

    /// Marks the list as done without moving, e.g. an explicit "complete" button.
    pub fn finish(&mut self) -> Advance {
        if self.finished {
            Advance::AlreadyFinished
        } else {
            self.finished = true;
            Advance::Finished
        }
    }

    /// Returns true if the position changed.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jumps to `index`, clamped to the last item.
    pub fn select(&mut self, index: usize) -> usize {
        self.index = index.min(self.len.saturating_sub(1));
        self.index
    }

    /// Percentage of the list reached, counting the current item.
    pub fn progress_percent(&self) -> f64 {
        if self.len == 0 {
            return 100.0;
        }
        (self.index + 1) as f64 / self.len as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_moves_until_last() {
        let mut s = Stepper::new(3);
        assert_eq!(s.next(), Advance::Moved(1));
        assert_eq!(s.next(), Advance::Moved(2));
        assert!(s.is_last());
    }

    #[test]
    fn advancing_past_last_finishes_once() {
        let mut s = Stepper::new(2);
        s.next();
        assert_eq!(s.next(), Advance::Finished);
        assert_eq!(s.next(), Advance::AlreadyFinished);
        assert_eq!(s.next(), Advance::AlreadyFinished);
        assert_eq!(s.index(), 1);
        assert!(s.is_finished());
    }

    #[test]
    fn explicit_finish_counts_as_the_one_completion() {
        let mut s = Stepper::new(3);
        assert_eq!(s.finish(), Advance::Finished);
        s.select(2);
        assert_eq!(s.next(), Advance::AlreadyFinished);
    }

    #[test]
    fn previous_stops_at_first() {
        let mut s = Stepper::new(3);
        assert!(!s.previous());
        s.next();
        assert!(s.previous());
        assert!(s.is_first());
    }

    #[test]
    fn select_clamps_to_bounds() {
        let mut s = Stepper::new(4);
        assert_eq!(s.select(2), 2);
        assert_eq!(s.select(99), 3);
    }

    #[test]
    fn progress_counts_current_item() {
        let mut s = Stepper::new(4);
        assert!((s.progress_percent() - 25.0).abs() < 1e-9);
        s.select(3);
        assert!((s.progress_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_list_finishes_immediately() {
        let mut s = Stepper::new(0);
        assert!(s.is_empty());
        assert_eq!(s.select(5), 0);
        assert_eq!(s.next(), Advance::Finished);
    }
}
