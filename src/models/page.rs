/// LIMIT/OFFSET window derived from a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Page {
    /// `offset = limit * (page - 1)`; page 0 reads as page 1.
    pub fn new(page: u64, limit: u64) -> Self {
        Page {
            limit,
            offset: limit.saturating_mul(page.saturating_sub(1)),
        }
    }

    /// `None` when the listing is unbounded (`limit == 0`).
    pub fn bounds(&self) -> Option<(i64, i64)> {
        if self.limit == 0 {
            return None;
        }
        Some((clamp(self.limit), clamp(self.offset)))
    }

    pub fn slice<T: Clone>(&self, rows: &[T]) -> Vec<T> {
        match self.bounds() {
            None => rows.to_vec(),
            Some((limit, offset)) => rows
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect(),
        }
    }
}

fn clamp(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_follows_page() {
        assert_eq!(Page::new(1, 10), Page { limit: 10, offset: 0 });
        assert_eq!(Page::new(3, 10), Page { limit: 10, offset: 20 });
        assert_eq!(Page::new(0, 10).offset, 0);
    }

    #[test]
    fn zero_limit_is_unbounded() {
        let rows: Vec<u32> = (0..5).collect();
        assert_eq!(Page::new(2, 0).bounds(), None);
        assert_eq!(Page::new(2, 0).slice(&rows), rows);
        assert_eq!(Page::new(2, 2).slice(&rows), vec![2, 3]);
    }
}
