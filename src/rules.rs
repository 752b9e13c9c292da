//! Replaceable evaluation hooks used by the grammar.
//!
//! Every operator and every state access performed while evaluating a line goes through
//! a `RuleTable`. Substituting a hook changes the execution semantics without touching
//! the grammar. This is how the continuous mode works on `(concentration, decay,
//! threshold)` triples instead of plain Booleans.
//!
//! ```rust
//! use biodivine_lib_booleannet::rules::RuleTable;
//! use biodivine_lib_booleannet::{Model, Mode, Triple, Value};
//! use rand::SeedableRng;
//!
//! // Fuzzy conjunction: the triple with the smaller concentration wins.
//! let rules = RuleTable::continuous().with_and(|a, b| {
//!     let (a, b) = (a.to_triple(), b.to_triple());
//!     Value::Triple(if a.concentration <= b.concentration { a } else { b })
//! });
//! let text = "A = (0.7, 1, 0.5)\nB = (0.2, 1, 0.5)\nC = False\nC* = A and B";
//! let rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut model = Model::with_rules(Mode::Plde, text, rules, rng).unwrap();
//! model.initialize().unwrap();
//! model.iterate_shuffled(1).unwrap();
//! assert_eq!(Some(Value::Triple(Triple::new(0.2, 1.0, 0.5))), model.last().unwrap().get("C"));
//! ```

use crate::{State, Value};

pub type BinaryRule = Box<dyn Fn(Value, Value) -> Value>;
pub type UnaryRule = Box<dyn Fn(Value) -> Value>;
pub type GetValueRule = Box<dyn Fn(&State, &str) -> Option<Value>>;
pub type SetValueRule = Box<dyn Fn(&mut State, &str, Value) -> Value>;
pub type StartIterationRule = Box<dyn FnMut(usize, &mut State)>;

/// The hooks invoked by the semantic actions of the grammar.
///
/// A table is built once per run. Hooks can only be replaced through the `with_*`
/// methods; the grammar itself never modifies the table.
pub struct RuleTable {
    and: BinaryRule,
    or: BinaryRule,
    not: UnaryRule,
    get_value: GetValueRule,
    set_value: SetValueRule,
    start_iteration: StartIterationRule,
}

impl RuleTable {
    /// Plain Boolean semantics.
    pub fn standard() -> RuleTable {
        RuleTable {
            and: Box::new(|a, b| Value::Bool(a.as_bool() && b.as_bool())),
            or: Box::new(|a, b| Value::Bool(a.as_bool() || b.as_bool())),
            not: Box::new(|a| Value::Bool(!a.as_bool())),
            get_value: Box::new(|state, name| state.get(name)),
            set_value: Box::new(|state, name, value| {
                state.set(name, value);
                value
            }),
            start_iteration: Box::new(|_, _| {}),
        }
    }

    /// Semantics of the continuous (`plde`) mode.
    ///
    /// Every stored value is a triple. The default operators compute the Boolean
    /// result of the operands' threshold interpretation and return its canonical triple.
    /// Substitute them with `with_and`, `with_or` and `with_not` to use a proper fuzzy
    /// combination.
    pub fn continuous() -> RuleTable {
        RuleTable {
            and: Box::new(|a, b| Value::Triple((a.as_bool() && b.as_bool()).into())),
            or: Box::new(|a, b| Value::Triple((a.as_bool() || b.as_bool()).into())),
            not: Box::new(|a| Value::Triple((!a.as_bool()).into())),
            get_value: Box::new(|state, name| state.get(name)),
            set_value: Box::new(|state, name, value| {
                let value = Value::Triple(value.to_triple());
                state.set(name, value);
                value
            }),
            start_iteration: Box::new(|_, _| {}),
        }
    }

    pub fn with_and<F: Fn(Value, Value) -> Value + 'static>(mut self, rule: F) -> RuleTable {
        self.and = Box::new(rule);
        self
    }

    pub fn with_or<F: Fn(Value, Value) -> Value + 'static>(mut self, rule: F) -> RuleTable {
        self.or = Box::new(rule);
        self
    }

    pub fn with_not<F: Fn(Value) -> Value + 'static>(mut self, rule: F) -> RuleTable {
        self.not = Box::new(rule);
        self
    }

    pub fn with_get_value<F>(mut self, rule: F) -> RuleTable
    where
        F: Fn(&State, &str) -> Option<Value> + 'static,
    {
        self.get_value = Box::new(rule);
        self
    }

    pub fn with_set_value<F>(mut self, rule: F) -> RuleTable
    where
        F: Fn(&mut State, &str, Value) -> Value + 'static,
    {
        self.set_value = Box::new(rule);
        self
    }

    /// Replace the hook which runs before every simulation round. It receives the
    /// round index and the state that the round is about to update.
    pub fn with_start_iteration<F>(mut self, rule: F) -> RuleTable
    where
        F: FnMut(usize, &mut State) + 'static,
    {
        self.start_iteration = Box::new(rule);
        self
    }

    pub fn and(&self, a: Value, b: Value) -> Value {
        (self.and)(a, b)
    }

    pub fn or(&self, a: Value, b: Value) -> Value {
        (self.or)(a, b)
    }

    pub fn not(&self, a: Value) -> Value {
        (self.not)(a)
    }

    pub fn get_value(&self, state: &State, name: &str) -> Option<Value> {
        (self.get_value)(state, name)
    }

    /// Write `value` into `state` and return the value that was actually stored.
    pub fn set_value(&self, state: &mut State, name: &str, value: Value) -> Value {
        (self.set_value)(state, name, value)
    }

    pub fn start_iteration(&mut self, index: usize, state: &mut State) {
        (self.start_iteration)(index, state)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        RuleTable::standard()
    }
}
