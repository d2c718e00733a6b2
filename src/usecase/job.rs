use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::before_create;
use crate::errors::AppError;
use crate::models::client_job::ClientJob;
use crate::models::deletion::Liveness;
use crate::models::job::{Job, JobInput};
use crate::models::page::Page;
use crate::repository::JobRepository;
use crate::utils::timeout::within;

#[derive(Clone)]
pub struct JobUseCase {
    repo: Arc<dyn JobRepository>,
    ctx_timeout: Duration,
}

impl JobUseCase {
    pub fn new(ctx_timeout: Duration, repo: Arc<dyn JobRepository>) -> Self {
        JobUseCase { repo, ctx_timeout }
    }

    pub async fn create_job(&self, input: JobInput) -> Result<Job, AppError> {
        within(self.ctx_timeout, "CreateJob", async {
            let (id, now) = before_create();
            let job = Job::new(id, input, now);
            self.repo.create_job(&job).await?;
            Ok(job)
        })
        .await
    }

    pub async fn update_job(&self, id: &str, input: JobInput) -> Result<Job, AppError> {
        within(self.ctx_timeout, "UpdateJob", self.repo.update_job(id, &input, Utc::now())).await
    }

    pub async fn delete_job(&self, id: &str) -> Result<(), AppError> {
        within(self.ctx_timeout, "DeleteJob", self.repo.delete_job(id, Utc::now())).await
    }

    pub async fn get_job(&self, id: &str) -> Result<Job, AppError> {
        within(self.ctx_timeout, "GetJob", self.repo.get_job(id)).await
    }

    pub async fn get_all_jobs(&self, page: Page) -> Result<Vec<Job>, AppError> {
        within(self.ctx_timeout, "ListJobs", self.repo.list_jobs(Liveness::Active, page)).await
    }

    pub async fn get_all_deleted_jobs(&self, page: Page) -> Result<Vec<Job>, AppError> {
        within(self.ctx_timeout, "ListDeletedJobs", self.repo.list_jobs(Liveness::Deleted, page)).await
    }

    pub async fn add_client_job(
        &self,
        client_id: &str,
        job_id: &str,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<bool, AppError> {
        within(self.ctx_timeout, "AddClientJob", async {
            let client_job = ClientJob::new(
                client_id.to_string(),
                job_id.to_string(),
                start_date,
                end_date,
                Utc::now(),
            );
            self.repo.add_client_job(&client_job).await
        })
        .await
    }

    pub async fn delete_client_job(&self, client_id: &str, job_id: &str) -> Result<(), AppError> {
        within(
            self.ctx_timeout,
            "DeleteClientJob",
            self.repo.delete_client_job(client_id, job_id, Utc::now()),
        )
        .await
    }

    pub async fn get_client_jobs(&self, client_id: &str, page: Page) -> Result<Vec<ClientJob>, AppError> {
        within(self.ctx_timeout, "GetClientJobs", self.repo.client_jobs(client_id, page)).await
    }

    pub async fn get_job_clients(&self, job_id: &str, page: Page) -> Result<Vec<ClientJob>, AppError> {
        within(self.ctx_timeout, "GetJobClients", self.repo.job_clients(job_id, page)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryJobRepository;
    use chrono::TimeZone;

    fn use_case() -> (JobUseCase, Arc<MemoryJobRepository>) {
        let repo = Arc::new(MemoryJobRepository::new());
        (JobUseCase::new(Duration::from_secs(5), repo.clone()), repo)
    }

    fn input(name: &str) -> JobInput {
        JobInput {
            name: name.into(),
            salary: 1000.0,
            level: "middle".into(),
            location_type: "remote".into(),
            employment_type: "full-time".into(),
            address: "Tashkent".into(),
            company: "Acme".into(),
        }
    }

    fn date(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn job_crud_follows_soft_delete_rules() {
        let (use_case, _) = use_case();
        let job = use_case.create_job(input("Engineer")).await.unwrap();
        assert_eq!(use_case.get_job(&job.id).await.unwrap(), job);

        let mut changes = input("Senior Engineer");
        changes.salary = 2500.5;
        let updated = use_case.update_job(&job.id, changes).await.unwrap();
        assert_eq!(updated.name, "Senior Engineer");
        assert_eq!(updated.salary, 2500.5);

        use_case.delete_job(&job.id).await.unwrap();
        assert!(matches!(use_case.delete_job(&job.id).await, Err(AppError::NotFound(_))));
        assert!(use_case.update_job(&job.id, input("x")).await.is_err());
        assert!(use_case.get_job(&job.id).await.is_err());

        let deleted = use_case.get_all_deleted_jobs(Page::new(1, 10)).await.unwrap();
        assert_eq!(deleted.len(), 1);
        assert!(use_case.get_all_jobs(Page::new(1, 10)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn association_lifecycle() {
        let (use_case, repo) = use_case();
        assert!(use_case.add_client_job("c1", "j1", date(2023), None).await.unwrap());
        use_case.add_client_job("c1", "j2", date(2021), Some(date(2022))).await.unwrap();
        use_case.add_client_job("c2", "j1", date(2020), None).await.unwrap();

        let of_client = use_case.get_client_jobs("c1", Page::new(1, 10)).await.unwrap();
        assert_eq!(of_client.len(), 2);
        assert_eq!(of_client[0].end_date, None);
        assert_eq!(of_client[1].end_date, Some(date(2022)));

        let of_job = use_case.get_job_clients("j1", Page::new(1, 10)).await.unwrap();
        assert_eq!(of_job.iter().map(|r| r.client_id.as_str()).collect::<Vec<_>>(), ["c1", "c2"]);

        use_case.delete_client_job("c1", "j1").await.unwrap();
        assert_eq!(use_case.get_client_jobs("c1", Page::new(1, 10)).await.unwrap().len(), 1);
        assert!(matches!(
            use_case.delete_client_job("c1", "j1").await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(repo.all_client_jobs().len(), 3);
    }

    #[tokio::test]
    async fn live_pair_is_unique_but_can_be_relinked() {
        let (use_case, _) = use_case();
        use_case.add_client_job("c1", "j1", date(2020), None).await.unwrap();
        assert!(matches!(
            use_case.add_client_job("c1", "j1", date(2021), None).await,
            Err(AppError::Conflict(_))
        ));

        use_case.delete_client_job("c1", "j1").await.unwrap();
        use_case.add_client_job("c1", "j1", date(2022), None).await.unwrap();
        let rows = use_case.get_client_jobs("c1", Page::new(1, 10)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start_date, date(2022));
    }
}
