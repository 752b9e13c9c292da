use crate::{Triple, Value};
use std::fmt::{Display, Error, Formatter};

impl Triple {
    pub fn new(concentration: f64, decay: f64, threshold: f64) -> Triple {
        Triple {
            concentration,
            decay,
            threshold,
        }
    }

    /// Boolean interpretation of this triple: `concentration > threshold / decay`.
    pub fn as_bool(&self) -> bool {
        self.concentration > self.threshold / self.decay
    }
}

impl From<bool> for Triple {
    /// `true` maps to `(1.0, 1.0, 0.5)` and `false` to `(0.0, 1.0, 0.5)`.
    fn from(value: bool) -> Self {
        if value {
            Triple::new(1.0, 1.0, 0.5)
        } else {
            Triple::new(0.0, 1.0, 0.5)
        }
    }
}

impl Value {
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(value) => *value,
            Value::Triple(triple) => triple.as_bool(),
        }
    }

    /// Convert to a triple. Triples are returned unchanged, Booleans are mapped
    /// to their canonical triple.
    pub fn to_triple(&self) -> Triple {
        match self {
            Value::Bool(value) => Triple::from(*value),
            Value::Triple(triple) => *triple,
        }
    }

    pub fn is_triple(&self) -> bool {
        matches!(self, Value::Triple(_))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Triple> for Value {
    fn from(value: Triple) -> Self {
        Value::Triple(value)
    }
}

impl Display for Triple {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "({}, {}, {})",
            self.concentration, self.decay, self.threshold
        )
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Triple(triple) => write!(f, "{}", triple),
        }
    }
}
