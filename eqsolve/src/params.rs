use crate::{Error, Label, Vars, vector::Vector};

/// Ordered, named collection of the scalar unknowns being solved for.
///
/// The store is also the binding context expressions are evaluated against:
/// its order fixes the Jacobian's columns and the layout of the solution vector,
/// and because both views are the same map they can never drift apart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterStore {
    vars: Vars,
}

impl ParameterStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new parameter with its initial value.
    pub fn add(&mut self, name: impl Into<Label>, value: f64) -> Result<(), Error> {
        let name = name.into();
        if self.vars.contains_key(&name) {
            return Err(Error::DuplicateParameter(name));
        }
        self.vars.insert(name, value);
        Ok(())
    }

    /// Current value of the named parameter.
    pub fn get(&self, name: &str) -> Result<f64, Error> {
        self.vars
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownParameter(name.to_owned()))
    }

    /// Overwrite the value of an existing parameter.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), Error> {
        let slot = self
            .vars
            .get_mut(name)
            .ok_or_else(|| Error::UnknownParameter(name.to_owned()))?;
        *slot = value;
        Ok(())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Are there no parameters?
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.vars.iter().map(|(name, &value)| (name.as_str(), value))
    }

    /// Borrow the store as bindings for [`crate::Expr::evaluate`].
    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    /// Current values, in declaration order.
    pub fn as_vector(&self) -> Vector {
        self.vars.values().copied().collect()
    }

    /// Overwrite every value, in declaration order.
    /// `values` must have exactly one entry per parameter.
    pub fn apply_vector(&mut self, values: &Vector) -> Result<(), Error> {
        if values.len() != self.len() {
            return Err(Error::DimensionMismatch {
                expected: self.len(),
                actual: values.len(),
            });
        }
        for (slot, &value) in self.vars.values_mut().zip(values.iter()) {
            *slot = value;
        }
        Ok(())
    }
}

/// One `name: value` line per parameter.
impl std::fmt::Display for ParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, value) in &self.vars {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Expr;

    fn abc() -> ParameterStore {
        let mut p = ParameterStore::new();
        p.add("A", 1.0).unwrap();
        p.add("B", 2.0).unwrap();
        p.add("C", 3.0).unwrap();
        p
    }

    #[test]
    fn added_params_are_bound() {
        let mut p = ParameterStore::new();
        p.add("A", 1.0).unwrap();
        assert_eq!(p.vars()["A"], 1.0);
        assert_eq!(Expr::parameter("A").evaluate(p.vars()).unwrap(), 1.0);
    }

    #[test]
    fn duplicate_rejected() {
        let mut p = abc();
        assert_eq!(
            p.add("B", 9.0),
            Err(Error::DuplicateParameter("B".to_owned()))
        );
        assert_eq!(p.get("B").unwrap(), 2.0);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn get_and_set() {
        let mut p = abc();
        assert_eq!(p.get("C").unwrap(), 3.0);
        p.set("C", 30.0).unwrap();
        assert_eq!(p.get("C").unwrap(), 30.0);
        assert_eq!(p.get("D"), Err(Error::UnknownParameter("D".to_owned())));
        assert_eq!(
            p.set("D", 1.0),
            Err(Error::UnknownParameter("D".to_owned()))
        );
    }

    #[test]
    fn as_vector_keeps_order() {
        assert_eq!(abc().as_vector(), Vector::from([1.0, 2.0, 3.0]));
        assert_eq!(abc().names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn apply_vector() {
        let mut p = abc();
        p.apply_vector(&Vector::from([4.0, 5.0, 6.0])).unwrap();
        assert_eq!(p.get("A").unwrap(), 4.0);
        assert_eq!(p.get("B").unwrap(), 5.0);
        assert_eq!(p.get("C").unwrap(), 6.0);
        assert_eq!(Expr::parameter("C").evaluate(p.vars()).unwrap(), 6.0);
    }

    #[test]
    fn apply_vector_wrong_length() {
        let mut p = abc();
        assert_eq!(
            p.apply_vector(&Vector::from([4.0, 5.0])),
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(p.as_vector(), Vector::from([1.0, 2.0, 3.0]));
    }

    #[test]
    fn display() {
        let mut p = ParameterStore::new();
        p.add("Ax", 5.0).unwrap();
        p.add("Ay", 4.5).unwrap();
        assert_eq!(p.to_string(), "Ax: 5\nAy: 4.5\n");
    }
}
