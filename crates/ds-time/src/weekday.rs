//! `Weekday` — day-of-week enum, plus the fixed-size weekday collections
//! used by the facility and forecast code.
//!
//! Two numberings are in play:
//! * the ordinal (Monday = 1 … Sunday = 7), used by date arithmetic;
//! * the wire index (Sunday = 0 … Saturday = 6), used by every entity record
//!   the CRUD layer supplies (`regularHolidays`, `patternDays`, …).

/// Day of the week.
///
/// Variants are numbered 1–7 (Monday = 1, Sunday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

impl Weekday {
    /// All seven days in wire order (Sunday first).
    pub const SUNDAY_FIRST: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Construct from the ordinal (1 = Monday … 7 = Sunday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            7 => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Construct from the wire index (0 = Sunday … 6 = Saturday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_index(n: u8) -> Option<Self> {
        Self::SUNDAY_FIRST.get(n as usize).copied()
    }

    /// Return the ordinal (1 = Monday … 7 = Sunday).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Return the wire index (0 = Sunday … 6 = Saturday).
    pub fn index(&self) -> u8 {
        self.ordinal() % 7
    }

    /// Return `true` if this is Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// One-character Japanese label (`日`, `月`, … `土`).
    pub fn short_ja(&self) -> &'static str {
        match self {
            Weekday::Sunday => "日",
            Weekday::Monday => "月",
            Weekday::Tuesday => "火",
            Weekday::Wednesday => "水",
            Weekday::Thursday => "木",
            Weekday::Friday => "金",
            Weekday::Saturday => "土",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

// ── WeekdaySet ────────────────────────────────────────────────────────────────

/// A set of weekdays stored as a 7-bit mask (bit `i` = wire index `i`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// Create an empty set.
    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Add a weekday. Returns `true` if it was not already present.
    pub fn insert(&mut self, day: Weekday) -> bool {
        let had = self.contains(day);
        self.0 |= Self::bit(day);
        !had
    }

    /// Remove a weekday. Returns `true` if it was present.
    pub fn remove(&mut self, day: Weekday) -> bool {
        let had = self.contains(day);
        self.0 &= !Self::bit(day);
        had
    }

    /// Return `true` if `day` is in the set.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Return `true` if no weekday is in the set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of weekdays in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the members in wire order (Sunday first).
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::SUNDAY_FIRST
            .into_iter()
            .filter(move |d| self.contains(*d))
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.index()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl std::fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// ── WeekdayTable ──────────────────────────────────────────────────────────────

/// A fixed table holding one `T` per weekday.
///
/// Stored Sunday first, so iteration order matches the wire index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeekdayTable<T>([T; 7]);

impl<T> WeekdayTable<T> {
    /// Build a table by evaluating `f` for every weekday.
    pub fn from_fn(mut f: impl FnMut(Weekday) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Weekday::SUNDAY_FIRST[i])))
    }

    /// Iterate over `(weekday, value)` pairs, Sunday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &T)> {
        Weekday::SUNDAY_FIRST.into_iter().zip(self.0.iter())
    }

    /// Iterate over the values, Sunday first.
    pub fn values(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Apply `f` to every entry, producing a new table.
    pub fn map<U>(&self, mut f: impl FnMut(Weekday, &T) -> U) -> WeekdayTable<U> {
        WeekdayTable::from_fn(|day| f(day, &self[day]))
    }
}

impl<T> std::ops::Index<Weekday> for WeekdayTable<T> {
    type Output = T;
    fn index(&self, day: Weekday) -> &T {
        &self.0[day.index() as usize]
    }
}

impl<T> std::ops::IndexMut<Weekday> for WeekdayTable<T> {
    fn index_mut(&mut self, day: Weekday) -> &mut T {
        &mut self.0[day.index() as usize]
    }
}

// ── serde ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{Weekday, WeekdaySet};
    use serde::de::{self, Deserializer, SeqAccess, Visitor};
    use serde::ser::{SerializeSeq, Serializer};
    use serde::{Deserialize, Serialize};

    impl Serialize for Weekday {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_u8(self.index())
        }
    }

    impl<'de> Deserialize<'de> for Weekday {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let n = u8::deserialize(deserializer)?;
            Weekday::from_index(n)
                .ok_or_else(|| de::Error::custom(format!("weekday index {n} out of range [0, 6]")))
        }
    }

    impl Serialize for WeekdaySet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for day in self.iter() {
                seq.serialize_element(&day)?;
            }
            seq.end()
        }
    }

    struct WeekdaySetVisitor;

    impl<'de> Visitor<'de> for WeekdaySetVisitor {
        type Value = WeekdaySet;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a list of weekday indices (0 = Sunday … 6 = Saturday)")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<WeekdaySet, A::Error> {
            let mut set = WeekdaySet::new();
            while let Some(day) = seq.next_element::<Weekday>()? {
                set.insert(day);
            }
            Ok(set)
        }
    }

    impl<'de> Deserialize<'de> for WeekdaySet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_seq(WeekdaySetVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_index_roundtrip() {
        for n in 0..7u8 {
            let day = Weekday::from_index(n).unwrap();
            assert_eq!(day.index(), n);
        }
        assert_eq!(Weekday::from_index(0), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_index(6), Some(Weekday::Saturday));
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn ordinal_and_index_disagree_only_on_sunday() {
        assert_eq!(Weekday::Sunday.ordinal(), 7);
        assert_eq!(Weekday::Sunday.index(), 0);
        assert_eq!(Weekday::Wednesday.ordinal(), Weekday::Wednesday.index());
    }

    #[test]
    fn set_operations() {
        let mut set: WeekdaySet = [Weekday::Monday, Weekday::Wednesday].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Weekday::Monday));
        assert!(!set.contains(Weekday::Sunday));
        assert!(!set.insert(Weekday::Monday));
        assert!(set.insert(Weekday::Sunday));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Weekday::Sunday, Weekday::Monday, Weekday::Wednesday]
        );
        assert!(set.remove(Weekday::Sunday));
        assert!(!set.remove(Weekday::Sunday));
        assert!(WeekdaySet::EMPTY.is_empty());
    }

    #[test]
    fn table_indexing() {
        let mut table: WeekdayTable<u32> = WeekdayTable::default();
        table[Weekday::Saturday] += 3;
        table[Weekday::Sunday] += 1;
        let values: Vec<u32> = table.values().copied().collect();
        assert_eq!(values, vec![1, 0, 0, 0, 0, 0, 3]);
        let labels = WeekdayTable::from_fn(|d| d.short_ja());
        assert_eq!(labels[Weekday::Monday], "月");
        let doubled = table.map(|_, v| v * 2);
        assert_eq!(doubled[Weekday::Saturday], 6);
    }
}
