use crate::{State, Value};
use fxhash::FxHasher;
use std::fmt::{Display, Error, Formatter};
use std::hash::Hasher;

impl State {
    pub fn new() -> State {
        State::default()
    }

    /// Value of the given node, or `None` if the node has no value in this state.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }

    /// Boolean interpretation of the value of the given node.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).map(|it| it.as_bool())
    }

    /// Write a node value, overwriting any previous value.
    pub fn set(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
        } else {
            self.values.insert(name.to_string(), value);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The number of nodes that have a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Node names and values, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Names of all nodes with a value, ordered by name.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|it| it.as_str())
    }

    /// A hash of the full content of this state.
    ///
    /// Equal states have equal fingerprints. Triples are hashed by their exact bit
    /// patterns, so `0.0` and `-0.0` are distinguished.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for (name, value) in &self.values {
            hasher.write(name.as_bytes());
            hasher.write_u8(0xff);
            match value {
                Value::Bool(value) => hasher.write_u8(u8::from(*value)),
                Value::Triple(triple) => {
                    hasher.write_u8(2);
                    hasher.write_u64(triple.concentration.to_bits());
                    hasher.write_u64(triple.decay.to_bits());
                    hasher.write_u64(triple.threshold.to_bits());
                }
            }
        }
        hasher.finish()
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "State(")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use crate::{State, Triple, Value};

    #[test]
    fn state_read_write() {
        let mut state = State::new();
        assert!(state.is_empty());
        state.set("B", Value::Bool(false));
        state.set("A", Value::Bool(true));
        state.set("B", Value::Bool(true));
        assert_eq!(2, state.len());
        assert_eq!(Some(true), state.get_bool("B"));
        assert_eq!(None, state.get("C"));
        assert_eq!(vec!["A", "B"], state.nodes().collect::<Vec<_>>());
        assert_eq!("State(A=True, B=True)", state.to_string());
    }

    #[test]
    fn state_clone_is_independent() {
        let mut first = State::new();
        first.set("A", Value::Bool(true));
        let mut second = first.clone();
        second.set("A", Value::Bool(false));
        assert_eq!(Some(true), first.get_bool("A"));
        assert_eq!(Some(false), second.get_bool("A"));
        assert_ne!(first, second);
        assert_ne!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn state_fingerprint() {
        let mut first = State::new();
        first.set("A", Value::Triple(Triple::new(0.5, 1.0, 0.5)));
        first.set("B", Value::Bool(true));
        let mut second = State::new();
        second.set("B", Value::Bool(true));
        second.set("A", Value::Triple(Triple::new(0.5, 1.0, 0.5)));
        assert_eq!(first, second);
        assert_eq!(first.fingerprint(), second.fingerprint());
    }
}
