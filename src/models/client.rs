use chrono::{DateTime, Utc};

use super::deletion::Deletion;

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    pub phone_number: String,
    pub address: String,
    pub email: String,
    /// Argon2 PHC string, never the plain password.
    pub password: String,
    pub status: bool,
    pub refresh: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deletion: Deletion,
}

/// Caller-supplied client fields. Updates rewrite everything except
/// `password` and `refresh`, which have their own operations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientInput {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    pub phone_number: String,
    pub address: String,
    pub email: String,
    pub password: String,
    pub status: bool,
    pub refresh: String,
}

impl Client {
    pub fn new(id: String, input: ClientInput, now: DateTime<Utc>) -> Self {
        Client {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            age: input.age,
            gender: input.gender,
            phone_number: input.phone_number,
            address: input.address,
            email: input.email,
            password: input.password,
            status: input.status,
            refresh: input.refresh,
            created_at: now,
            updated_at: now,
            deletion: Deletion::Active,
        }
    }

    pub fn apply(&mut self, input: &ClientInput, now: DateTime<Utc>) {
        self.first_name = input.first_name.clone();
        self.last_name = input.last_name.clone();
        self.age = input.age;
        self.gender = input.gender.clone();
        self.phone_number = input.phone_number.clone();
        self.address = input.address.clone();
        self.email = input.email.clone();
        self.status = input.status;
        self.updated_at = now;
    }
}

#[derive(sqlx::FromRow, Debug)]
pub struct ClientRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub email: String,
    pub password: String,
    pub status: bool,
    pub refresh: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            age: row.age.and_then(|age| u32::try_from(age).ok()).unwrap_or_default(),
            gender: row.gender.unwrap_or_default(),
            phone_number: row.phone_number.unwrap_or_default(),
            address: row.address.unwrap_or_default(),
            email: row.email,
            password: row.password,
            status: row.status,
            refresh: row.refresh,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deletion: Deletion::from_column(row.deleted_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_columns_default_to_zero_values() {
        let now = Utc::now();
        let client = Client::from(ClientRow {
            id: "c1".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            age: None,
            gender: None,
            phone_number: None,
            address: None,
            email: "ada@x.com".into(),
            password: "hash".into(),
            status: true,
            refresh: String::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        });
        assert_eq!(client.age, 0);
        assert_eq!(client.gender, "");
        assert_eq!(client.address, "");
        assert_eq!(client.deletion, Deletion::Active);
    }

    #[test]
    fn apply_keeps_credentials() {
        let now = Utc::now();
        let mut client = Client::new(
            "c1".into(),
            ClientInput { password: "hash".into(), refresh: "r".into(), ..Default::default() },
            now,
        );
        client.apply(&ClientInput { first_name: "New".into(), password: "other".into(), ..Default::default() }, now);
        assert_eq!(client.first_name, "New");
        assert_eq!(client.password, "hash");
        assert_eq!(client.refresh, "r");
    }
}
