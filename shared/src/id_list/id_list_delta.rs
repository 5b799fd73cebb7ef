use crate::IdListError;

/// A single record of an id list delta.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdListOp {
    Add(String),
    Remove(String),
}

impl IdListOp {
    pub fn id(&self) -> &str {
        match self {
            IdListOp::Add(id) | IdListOp::Remove(id) => id,
        }
    }
}

/// Parsed body of one byte-range download: newline separated `+id` / `-id`
/// records, kept in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdListDelta {
    ops: Vec<IdListOp>,
}

impl IdListDelta {
    /// Parses a delta body for the list named `list_name`.
    ///
    /// The body as a whole must start with `+` or `-`, anything else is
    /// reported as corruption. Past that check, records shorter than two
    /// characters and records with an unknown operator are skipped.
    pub fn parse(list_name: &str, body: &str) -> Result<Self, IdListError> {
        match body.chars().next() {
            Some('+') | Some('-') => {}
            found => {
                return Err(IdListError::CorruptedPayload {
                    name: list_name.to_string(),
                    found,
                });
            }
        }

        let mut ops = Vec::new();
        for line in body.lines() {
            let mut chars = line.trim().chars();
            let Some(operator) = chars.next() else {
                continue;
            };
            let id = chars.as_str();
            if id.is_empty() {
                continue;
            }
            match operator {
                '+' => ops.push(IdListOp::Add(id.to_string())),
                '-' => ops.push(IdListOp::Remove(id.to_string())),
                _ => {
                    log::trace!("Skipping id list record with operator {:?} in '{}'", operator, list_name);
                }
            }
        }

        Ok(Self { ops })
    }

    pub fn ops(&self) -> &[IdListOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl<'a> IntoIterator for &'a IdListDelta {
    type Item = &'a IdListOp;
    type IntoIter = std::slice::Iter<'a, IdListOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
