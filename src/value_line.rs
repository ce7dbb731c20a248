//! A sparse, time-ordered list of value changes with a default. The tempo map keeps one line for
//! tempo and one for the time signature.

/// A value that takes effect at `time` and stays in effect until the next change.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ValueChange<V> {
    time: u64,
    value: V,
}

impl<V: Copy> ValueChange<V> {
    pub fn new(time: u64, value: V) -> Self {
        Self { time, value }
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn value(&self) -> V {
        self.value
    }
}

/// Changes are kept sorted by time, with at most one change per time. No change ever repeats the
/// value that is already in effect, so two lines describing the same values over time are equal.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ValueLine<V> {
    default: V,
    changes: Vec<ValueChange<V>>,
}

impl<V: Copy + PartialEq> ValueLine<V> {
    pub fn new(default: V) -> Self {
        Self {
            default,
            changes: Vec::new(),
        }
    }

    /// The value in effect before the first change.
    pub fn default_value(&self) -> V {
        self.default
    }

    /// The value of the latest change at or before `time`, or the default.
    pub fn value_at(&self, time: u64) -> V {
        let after = self.changes.partition_point(|c| c.time <= time);
        match after.checked_sub(1) {
            Some(ix) => self.changes[ix].value,
            None => self.default,
        }
    }

    /// Sets `value` at exactly `time`, overwriting a change already there. Returns `false` if the
    /// line is unchanged, which is the case when `value` is already in effect at `time`.
    pub fn set_value(&mut self, time: u64, value: V) -> bool {
        match self.changes.binary_search_by_key(&time, |c| c.time) {
            Ok(ix) => {
                if self.changes[ix].value == value {
                    return false;
                }
                self.changes[ix].value = value;
            }
            Err(ix) => {
                let current = match ix.checked_sub(1) {
                    Some(prev) => self.changes[prev].value,
                    None => self.default,
                };
                if current == value {
                    return false;
                }
                self.changes.insert(ix, ValueChange::new(time, value));
            }
        }
        self.normalize();
        true
    }

    /// Removes every change at or after `start`.
    pub fn delete_values_from(&mut self, start: u64) -> bool {
        let keep = self.changes.partition_point(|c| c.time < start);
        let changed = keep < self.changes.len();
        self.changes.truncate(keep);
        changed
    }

    /// Removes every change in `start..end`.
    pub fn delete_values(&mut self, start: u64, end: u64) -> bool {
        let before = self.changes.len();
        self.changes.retain(|c| c.time < start || c.time >= end);
        if self.changes.len() == before {
            return false;
        }
        self.normalize();
        true
    }

    /// Removes all changes. The default remains.
    pub fn clear(&mut self) -> bool {
        let changed = !self.changes.is_empty();
        self.changes.clear();
        changed
    }

    /// Makes this line a copy of `other`.
    pub fn replace_values(&mut self, other: &ValueLine<V>) {
        self.default = other.default;
        self.changes = other.changes.clone();
    }

    pub fn changes(&self) -> impl Iterator<Item = &ValueChange<V>> {
        self.changes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    fn normalize(&mut self) {
        let mut current = self.default;
        self.changes.retain(|c| {
            if c.value == current {
                false
            } else {
                current = c.value;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(line: &ValueLine<u32>) -> Vec<(u64, u32)> {
        line.changes().map(|c| (c.time(), c.value())).collect()
    }

    #[test]
    fn value_at_uses_latest_change() {
        let mut line = ValueLine::new(1u32);
        line.set_value(10, 2);
        line.set_value(20, 3);
        assert_eq!(1, line.value_at(0));
        assert_eq!(1, line.value_at(9));
        assert_eq!(2, line.value_at(10));
        assert_eq!(2, line.value_at(19));
        assert_eq!(3, line.value_at(1000));
    }

    #[test]
    fn redundant_values_are_not_stored() {
        let mut line = ValueLine::new(1u32);
        assert!(!line.set_value(0, 1));
        assert!(line.is_empty());
        assert!(line.set_value(5, 2));
        assert!(!line.set_value(8, 2));
        assert!(!line.set_value(5, 2));
        assert_eq!(vec![(5, 2)], pairs(&line));
    }

    #[test]
    fn overwrite_and_normalize() {
        let mut line = ValueLine::new(1u32);
        line.set_value(2, 10);
        line.set_value(4, 20);
        line.set_value(6, 10);
        assert_eq!(vec![(2, 10), (4, 20), (6, 10)], pairs(&line));
        // the change at 6 becomes redundant
        assert!(line.set_value(4, 10));
        assert_eq!(vec![(2, 10)], pairs(&line));
        // inserting before a change with the same value makes that change redundant
        let mut line = ValueLine::new(1u32);
        line.set_value(10, 2);
        line.set_value(5, 2);
        assert_eq!(vec![(5, 2)], pairs(&line));
    }

    #[test]
    fn delete_ranges() {
        let mut line = ValueLine::new(0u32);
        line.set_value(10, 1);
        line.set_value(20, 2);
        line.set_value(30, 1);
        assert!(line.delete_values(20, 30));
        assert_eq!(vec![(10, 1)], pairs(&line));
        assert!(!line.delete_values(20, 30));
        line.set_value(40, 5);
        assert!(line.delete_values_from(40));
        assert!(!line.delete_values_from(40));
        assert_eq!(vec![(10, 1)], pairs(&line));
        assert!(line.clear());
        assert!(!line.clear());
    }

    #[test]
    fn replace_values_copies() {
        let mut a = ValueLine::new(0u32);
        let mut b = ValueLine::new(0u32);
        b.set_value(3, 3);
        a.set_value(1, 1);
        a.replace_values(&b);
        assert_eq!(a, b);
    }
}
