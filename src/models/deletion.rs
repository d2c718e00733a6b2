use chrono::{DateTime, Utc};

/// Soft-deletion state of a row, read from its nullable `deleted_at` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deletion {
    #[default]
    Active,
    Deleted { at: DateTime<Utc> },
}

impl Deletion {
    pub fn from_column(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Deletion::Deleted { at },
            None => Deletion::Active,
        }
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Deletion::Active => None,
            Deletion::Deleted { at } => Some(*at),
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Deletion::Deleted { .. })
    }
}

/// Which side of the soft-delete partition a listing reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Active,
    Deleted,
}

impl Liveness {
    pub fn predicate(&self) -> &'static str {
        match self {
            Liveness::Active => "deleted_at IS NULL",
            Liveness::Deleted => "deleted_at IS NOT NULL",
        }
    }

    pub fn matches(&self, deletion: &Deletion) -> bool {
        match self {
            Liveness::Active => !deletion.is_deleted(),
            Liveness::Deleted => deletion.is_deleted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_round_trip() {
        let now = Utc::now();
        assert_eq!(Deletion::from_column(None), Deletion::Active);
        assert_eq!(Deletion::from_column(Some(now)).deleted_at(), Some(now));
    }

    #[test]
    fn predicates_partition_states() {
        let states = [Deletion::Active, Deletion::Deleted { at: Utc::now() }];
        for state in states {
            assert_ne!(Liveness::Active.matches(&state), Liveness::Deleted.matches(&state));
        }
    }
}
