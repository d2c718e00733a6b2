use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::before_create;
use crate::errors::AppError;
use crate::models::client::{Client, ClientInput};
use crate::models::deletion::Liveness;
use crate::models::page::Page;
use crate::repository::ClientRepository;
use crate::utils::password::hash_password;
use crate::utils::timeout::within;

#[derive(Clone)]
pub struct ClientUseCase {
    repo: Arc<dyn ClientRepository>,
    ctx_timeout: Duration,
}

impl ClientUseCase {
    pub fn new(ctx_timeout: Duration, repo: Arc<dyn ClientRepository>) -> Self {
        ClientUseCase { repo, ctx_timeout }
    }

    pub async fn create_client(&self, input: ClientInput) -> Result<Client, AppError> {
        within(self.ctx_timeout, "CreateClient", async {
            let (id, now) = before_create();
            let password = hash_password(&input.password)?;
            let client = Client::new(id, ClientInput { password, ..input }, now);
            self.repo.create_client(&client).await?;
            Ok(client)
        })
        .await
    }

    pub async fn update_client(&self, id: &str, input: ClientInput) -> Result<Client, AppError> {
        within(self.ctx_timeout, "UpdateClient", self.repo.update_client(id, &input, Utc::now())).await
    }

    pub async fn delete_client(&self, id: &str) -> Result<(), AppError> {
        within(self.ctx_timeout, "DeleteClient", self.repo.delete_client(id, Utc::now())).await
    }

    pub async fn get_client(&self, id: &str) -> Result<Client, AppError> {
        within(self.ctx_timeout, "GetClient", self.repo.get_client(id)).await
    }

    pub async fn get_all_clients(&self, page: Page) -> Result<Vec<Client>, AppError> {
        within(self.ctx_timeout, "ListClients", self.repo.list_clients(Liveness::Active, page)).await
    }

    pub async fn get_all_deleted_clients(&self, page: Page) -> Result<Vec<Client>, AppError> {
        within(
            self.ctx_timeout,
            "ListDeletedClients",
            self.repo.list_clients(Liveness::Deleted, page),
        )
        .await
    }

    pub async fn get_all_hidden_clients(&self, page: Page) -> Result<Vec<Client>, AppError> {
        within(self.ctx_timeout, "ListHiddenClients", self.repo.list_hidden_clients(page)).await
    }

    pub async fn unique_email(&self, email: &str) -> Result<bool, AppError> {
        within(self.ctx_timeout, "UniqueEmail", self.repo.email_in_use(email)).await
    }

    pub async fn update_refresh(&self, id: &str, refresh: &str) -> Result<bool, AppError> {
        within(
            self.ctx_timeout,
            "UpdateRefresh",
            self.repo.update_refresh(id, refresh, Utc::now()),
        )
        .await
    }

    pub async fn update_password(&self, id: &str, new_password: &str) -> Result<bool, AppError> {
        within(self.ctx_timeout, "UpdatePassword", async {
            let hash = hash_password(new_password)?;
            self.repo.update_password(id, &hash, Utc::now()).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryClientRepository;
    use crate::utils::password::verify_password;

    fn use_case() -> (ClientUseCase, Arc<MemoryClientRepository>) {
        let repo = Arc::new(MemoryClientRepository::new());
        (ClientUseCase::new(Duration::from_secs(5), repo.clone()), repo)
    }

    fn input(email: &str) -> ClientInput {
        ClientInput {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            age: 30,
            gender: "female".into(),
            phone_number: "+998901234567".into(),
            address: "Tashkent".into(),
            email: email.into(),
            password: "s3cret-pass".into(),
            status: true,
            refresh: "refresh-1".into(),
        }
    }

    #[tokio::test]
    async fn created_client_reads_back_with_input_fields() {
        let (use_case, _) = use_case();
        let created = use_case.create_client(input("a@x.com")).await.unwrap();
        let fetched = use_case.get_client(&created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.first_name, "Ada");
        assert_eq!(fetched.age, 30);
        assert_eq!(fetched.email, "a@x.com");
        assert_eq!(fetched.refresh, "refresh-1");
        assert!(fetched.status);
        assert!(verify_password("s3cret-pass", &fetched.password));
    }

    #[tokio::test]
    async fn update_of_missing_or_deleted_client_fails() {
        let (use_case, _) = use_case();
        let missing = use_case.update_client("nope", input("a@x.com")).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let created = use_case.create_client(input("a@x.com")).await.unwrap();
        use_case.delete_client(&created.id).await.unwrap();
        let deleted = use_case.update_client(&created.id, input("b@x.com")).await;
        assert!(matches!(deleted, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_returns_stored_record() {
        let (use_case, _) = use_case();
        let created = use_case.create_client(input("a@x.com")).await.unwrap();
        let mut changes = input("new@x.com");
        changes.age = 31;
        changes.password = "ignored".into();

        let updated = use_case.update_client(&created.id, changes).await.unwrap();
        assert_eq!(updated.email, "new@x.com");
        assert_eq!(updated.age, 31);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.password, created.password);
    }

    #[tokio::test]
    async fn second_delete_is_detected() {
        let (use_case, _) = use_case();
        let created = use_case.create_client(input("a@x.com")).await.unwrap();
        use_case.delete_client(&created.id).await.unwrap();

        let again = use_case.delete_client(&created.id).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
        assert!(use_case.get_client(&created.id).await.is_err());
    }

    #[tokio::test]
    async fn active_and_deleted_listings_partition_rows() {
        let (use_case, repo) = use_case();
        let mut ids = Vec::new();
        for i in 0..6 {
            let client = use_case.create_client(input(&format!("{}@x.com", i))).await.unwrap();
            ids.push(client.id);
        }
        for id in ids.iter().step_by(2) {
            use_case.delete_client(id).await.unwrap();
        }

        let unbounded = Page::new(1, 0);
        let active = use_case.get_all_clients(unbounded).await.unwrap();
        let deleted = use_case.get_all_deleted_clients(unbounded).await.unwrap();

        assert_eq!(active.len() + deleted.len(), repo.all().len());
        assert!(active.iter().all(|c| !deleted.iter().any(|d| d.id == c.id)));
        assert!(deleted.iter().all(|c| c.deletion.is_deleted()));
    }

    #[tokio::test]
    async fn listing_respects_page_window() {
        let (use_case, _) = use_case();
        for i in 0..15 {
            use_case.create_client(input(&format!("{}@x.com", i))).await.unwrap();
        }
        let first = use_case.get_all_clients(Page::new(1, 10)).await.unwrap();
        let second = use_case.get_all_clients(Page::new(2, 10)).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 5);
        assert_eq!(first[0].email, "0@x.com");
        assert_eq!(second[0].email, "10@x.com");
    }

    #[tokio::test]
    async fn hidden_ignores_deletion_state() {
        let (use_case, _) = use_case();
        let mut hidden = input("h@x.com");
        hidden.status = false;
        let hidden = use_case.create_client(hidden).await.unwrap();
        use_case.create_client(input("v@x.com")).await.unwrap();
        use_case.delete_client(&hidden.id).await.unwrap();

        let listed = use_case.get_all_hidden_clients(Page::new(1, 10)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, hidden.id);
    }

    #[tokio::test]
    async fn unique_email_only_counts_live_clients() {
        let (use_case, _) = use_case();
        assert!(!use_case.unique_email("a@x.com").await.unwrap());

        let created = use_case.create_client(input("a@x.com")).await.unwrap();
        assert!(use_case.unique_email("a@x.com").await.unwrap());
        assert!(!use_case.unique_email("A@x.com").await.unwrap());

        use_case.delete_client(&created.id).await.unwrap();
        assert!(!use_case.unique_email("a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn refresh_and_password_updates_need_a_live_client() {
        let (use_case, _) = use_case();
        let created = use_case.create_client(input("a@x.com")).await.unwrap();

        assert!(use_case.update_refresh(&created.id, "refresh-2").await.unwrap());
        assert!(use_case.update_password(&created.id, "another-pass").await.unwrap());
        let fetched = use_case.get_client(&created.id).await.unwrap();
        assert_eq!(fetched.refresh, "refresh-2");
        assert!(verify_password("another-pass", &fetched.password));

        assert!(matches!(
            use_case.update_refresh("missing", "x").await,
            Err(AppError::NotFound(_))
        ));
        use_case.delete_client(&created.id).await.unwrap();
        assert!(use_case.update_password(&created.id, "x").await.is_err());
    }
}
