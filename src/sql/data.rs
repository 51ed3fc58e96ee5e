use crate::types::RowValues;

/// Field → value payload for INSERT and UPDATE.
///
/// Keeps insertion order; setting a field twice replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowData {
    fields: Vec<(String, RowValues)>,
}

impl RowData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RowValues>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, RowValues)> {
        self.fields.iter()
    }

    pub(crate) fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|(f, _)| f.clone()).collect()
    }

    pub(crate) fn values(&self) -> Vec<RowValues> {
        self.fields.iter().map(|(_, v)| v.clone()).collect()
    }
}

impl<S: Into<String>, V: Into<RowValues>> FromIterator<(S, V)> for RowData {
    fn from_iter<T: IntoIterator<Item = (S, V)>>(iter: T) -> Self {
        let mut data = RowData::new();
        for (field, value) in iter {
            data.insert(field, value);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_set_replaces_in_place() {
        let data = RowData::new().set("a", 1).set("b", "x").set("a", 2);
        let pairs: Vec<_> = data.iter().cloned().collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), RowValues::Int(2)),
                ("b".to_string(), RowValues::Text("x".into())),
            ]
        );
    }
}
