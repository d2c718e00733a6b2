use sqlx::{Postgres, QueryBuilder};

use crate::models::page::Page;

mod client;
mod job;

pub use client::PgClientRepository;
pub use job::PgJobRepository;

fn push_page(query: &mut QueryBuilder<'_, Postgres>, page: Page) {
    if let Some((limit, offset)) = page.bounds() {
        query.push(" LIMIT ").push_bind(limit);
        query.push(" OFFSET ").push_bind(offset);
    }
}
