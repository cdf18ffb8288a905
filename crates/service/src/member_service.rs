use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use models::member::{validate_address, validate_name};

use crate::domain::{Member, MemberUpdate, NewMember, UpdateOutcome};
use crate::errors::ServiceError;
use crate::repository::MemberRepository;

/// Member registry: create, list, update name/address, delete.
pub struct MemberService<R: MemberRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: MemberRepository + ?Sized> MemberService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Add a member after validating name and address.
    ///
    /// # Examples
    /// ```
    /// use service::{MemberService, repository::mock::InMemoryRepository};
    /// use service::domain::NewMember;
    /// use std::sync::Arc;
    /// let svc = MemberService::new(Arc::new(InMemoryRepository::default()));
    /// let m = tokio_test::block_on(svc.add_member(NewMember { name: "Rahim".into(), address: "Room 2".into() })).unwrap();
    /// assert_eq!(m.name, "Rahim");
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_member(&self, input: NewMember) -> Result<Member, ServiceError> {
        validate_name(&input.name)?;
        validate_address(&input.address)?;
        let member = self.repo.insert_member(&input).await?;
        info!(member_id = %member.id, "member_added");
        Ok(member)
    }

    pub async fn list_members(&self) -> Result<Vec<Member>, ServiceError> {
        self.repo.list_members().await
    }

    /// Overwrite name and address only; reports not-found and no-change separately.
    #[instrument(skip(self, input), fields(member_id = %id))]
    pub async fn update_member(&self, id: Uuid, input: MemberUpdate) -> Result<UpdateOutcome, ServiceError> {
        validate_name(&input.name)?;
        validate_address(&input.address)?;
        let outcome = self.repo.update_member(id, &input).await?;
        info!(?outcome, "member_update");
        Ok(outcome)
    }

    /// Remove a member; meal entries that reference it are left in place.
    #[instrument(skip(self), fields(member_id = %id))]
    pub async fn delete_member(&self, id: Uuid) -> Result<u64, ServiceError> {
        let deleted = self.repo.delete_member(id).await?;
        info!(deleted, "member_deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::InMemoryRepository;

    fn svc() -> MemberService<InMemoryRepository> {
        MemberService::new(Arc::new(InMemoryRepository::default()))
    }

    fn new_member(name: &str, address: &str) -> NewMember {
        NewMember { name: name.into(), address: address.into() }
    }

    #[tokio::test]
    async fn added_member_is_listed_with_generated_id() {
        let svc = svc();
        let a = svc.add_member(new_member("Rahim", "Room 1")).await.unwrap();
        let b = svc.add_member(new_member("Karim", "Room 2")).await.unwrap();
        assert_ne!(a.id, b.id);
        let all = svc.list_members().await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn blank_name_is_a_validation_error() {
        let err = svc().add_member(new_member("  ", "x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_reports_updated_unchanged_and_not_found() {
        let svc = svc();
        let m = svc.add_member(new_member("Rahim", "Room 1")).await.unwrap();

        let same = MemberUpdate { name: "Rahim".into(), address: "Room 1".into() };
        assert_eq!(svc.update_member(m.id, same).await.unwrap(), UpdateOutcome::Unchanged);

        let moved = MemberUpdate { name: "Rahim".into(), address: "Room 9".into() };
        assert_eq!(svc.update_member(m.id, moved.clone()).await.unwrap(), UpdateOutcome::Updated);
        assert_eq!(svc.list_members().await.unwrap()[0].address, "Room 9");
        assert_eq!(svc.list_members().await.unwrap()[0].id, m.id);

        assert_eq!(svc.update_member(Uuid::new_v4(), moved).await.unwrap(), UpdateOutcome::NotFound);
    }

    #[tokio::test]
    async fn delete_removes_member_and_is_idempotent() {
        let svc = svc();
        let m = svc.add_member(new_member("Rahim", "")).await.unwrap();
        assert_eq!(svc.delete_member(m.id).await.unwrap(), 1);
        assert!(svc.list_members().await.unwrap().is_empty());
        assert_eq!(svc.delete_member(m.id).await.unwrap(), 0);
    }
}
