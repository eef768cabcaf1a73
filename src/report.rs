use crate::location::Location;
use crate::var::Var;
use serde::Serialize;
use std::slice;
use std::vec;

/// Logical time of a read, a write or a loop entry. Only used for ordering.
pub type LogicalTime = u64;

/// A write that was never read afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Assignment {
    pub var: Var,
    /// `"<var> = <expr>"`, empty for the end of program flush.
    pub representation: String,
    pub time: LogicalTime,
    #[serde(rename = "line")]
    pub location: Location,
}

/// Dead stores of one program in the order their assignments appear.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DeadStoreReport {
    stores: Vec<Assignment>,
}

impl DeadStoreReport {
    pub(crate) fn from_detected(mut stores: Vec<Assignment>) -> Self {
        stores.sort_by_key(|store| store.time);
        Self { stores }
    }

    pub fn stores(&self) -> &[Assignment] {
        &self.stores
    }

    /// Output lines, one per dead store.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stores.iter().map(|store| store.representation.as_str())
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl IntoIterator for DeadStoreReport {
    type Item = Assignment;
    type IntoIter = vec::IntoIter<Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.stores.into_iter()
    }
}

impl<'a> IntoIterator for &'a DeadStoreReport {
    type Item = &'a Assignment;
    type IntoIter = slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.stores.iter()
    }
}

#[test]
fn sorted_by_time() {
    use pretty_assertions::assert_eq;

    let store = |name, time| Assignment {
        var: Var::from_char(name).unwrap(),
        representation: format!("{} = {}", name, time),
        time,
        location: Location::default(),
    };

    let report = DeadStoreReport::from_detected(vec![store('b', 7), store('a', 2), store('c', 4)]);

    assert_eq!(report.lines().collect::<Vec<_>>(), &["a = 2", "c = 4", "b = 7"]);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!([
            { "var": "a", "representation": "a = 2", "time": 2, "line": 1 },
            { "var": "c", "representation": "c = 4", "time": 4, "line": 1 },
            { "var": "b", "representation": "b = 7", "time": 7, "line": 1 },
        ])
    );
}
