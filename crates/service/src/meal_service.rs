use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::meal::{validate_guest_meals, NewMeal};
use models::member::{validate_address, validate_name};

use crate::domain::{DateGroup, MealDraft, MealEntry, Member, MonthlyMemberSummary};
use crate::errors::ServiceError;
use crate::period::{Clock, Period};
use crate::repository::{MealRepository, MemberRepository};

/// Meal ledger: daily submissions, period views and monthly summaries.
pub struct MealService<R: MealRepository + MemberRepository + ?Sized> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: MealRepository + MemberRepository + ?Sized> MealService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self { Self { repo, clock } }

    /// Record today's meals for a batch of members.
    ///
    /// Members that already have an entry today are skipped; when nobody is
    /// left the call fails with [`ServiceError::AlreadyRecorded`]. Each row
    /// goes through an insert-if-absent on `(member_id, date)`, so concurrent
    /// submissions for the same member store one entry.
    ///
    /// # Examples
    /// ```
    /// use service::{MealService, repository::mock::InMemoryRepository, period::SystemClock};
    /// use service::domain::MealDraft;
    /// use std::sync::Arc;
    /// let svc = MealService::new(Arc::new(InMemoryRepository::default()), Arc::new(SystemClock));
    /// let draft = MealDraft { member_id: uuid::Uuid::new_v4(), member_name: None, member_address: None, guest_meals: None };
    /// let added = tokio_test::block_on(svc.add_meals(vec![draft.clone()])).unwrap();
    /// assert_eq!(added[0].guest_meals, 0);
    /// assert!(tokio_test::block_on(svc.add_meals(vec![draft])).is_err());
    /// ```
    #[instrument(skip(self, batch), fields(batch_len = batch.len()))]
    pub async fn add_meals(&self, batch: Vec<MealDraft>) -> Result<Vec<MealEntry>, ServiceError> {
        if batch.is_empty() {
            return Err(ServiceError::Validation("meal batch is empty".into()));
        }
        let today = self.clock.today();

        let mut seen = HashSet::new();
        let mut drafts = Vec::with_capacity(batch.len());
        for draft in batch {
            let meal = Self::prepare(draft, today)?;
            if seen.insert(meal.member_id) {
                drafts.push(meal);
            }
        }

        let ids: Vec<Uuid> = drafts.iter().map(|m| m.member_id).collect();
        let recorded: HashSet<Uuid> = self.repo.recorded_member_ids(&ids, today).await?.into_iter().collect();
        let pending: Vec<NewMeal> = drafts.into_iter().filter(|m| !recorded.contains(&m.member_id)).collect();
        if pending.is_empty() {
            debug!(%today, "all members already recorded");
            return Err(ServiceError::AlreadyRecorded);
        }

        let mut added = Vec::with_capacity(pending.len());
        for meal in pending {
            let member_id = meal.member_id;
            match self.repo.insert_meal_if_absent(meal).await? {
                Some(entry) => added.push(entry),
                None => debug!(%member_id, %today, "entry recorded concurrently; skipped"),
            }
        }
        if added.is_empty() {
            return Err(ServiceError::AlreadyRecorded);
        }
        info!(count = added.len(), skipped = recorded.len(), %today, "meals_added");
        Ok(added)
    }

    fn prepare(draft: MealDraft, today: NaiveDate) -> Result<NewMeal, ServiceError> {
        let guest_meals = draft.guest_meals.unwrap_or(0);
        validate_guest_meals(guest_meals)?;
        let member_name = non_blank(draft.member_name);
        let member_address = non_blank(draft.member_address);
        if let Some(name) = &member_name {
            validate_name(name)?;
        }
        if let Some(address) = &member_address {
            validate_address(address)?;
        }
        Ok(NewMeal { member_id: draft.member_id, member_name, member_address, meal_date: today, guest_meals })
    }

    /// Every entry, one group per date, oldest first.
    pub async fn list_grouped_by_date(&self) -> Result<Vec<DateGroup>, ServiceError> {
        let entries = self.repo.list_meals(None).await?;
        Ok(group_by_date(entries))
    }

    pub async fn list_for(&self, period: Period) -> Result<Vec<MealEntry>, ServiceError> {
        let range = period.range(self.clock.today());
        self.repo.list_meals(Some(range)).await
    }

    pub async fn list_meals_today(&self) -> Result<Vec<MealEntry>, ServiceError> { self.list_for(Period::Today).await }

    pub async fn list_meals_this_week(&self) -> Result<Vec<MealEntry>, ServiceError> { self.list_for(Period::Week).await }

    pub async fn list_meals_this_month(&self) -> Result<Vec<MealEntry>, ServiceError> { self.list_for(Period::Month).await }

    pub async fn sum_guest_meals_for(&self, period: Period) -> Result<i64, ServiceError> {
        let range = period.range(self.clock.today());
        self.repo.sum_guest_meals(range).await
    }

    pub async fn sum_guest_meals_today(&self) -> Result<i64, ServiceError> { self.sum_guest_meals_for(Period::Today).await }

    pub async fn sum_guest_meals_this_week(&self) -> Result<i64, ServiceError> { self.sum_guest_meals_for(Period::Week).await }

    pub async fn sum_guest_meals_this_month(&self) -> Result<i64, ServiceError> { self.sum_guest_meals_for(Period::Month).await }

    /// Per-member, per-month totals joined to the current registry.
    pub async fn monthly_by_member(&self) -> Result<Vec<MonthlyMemberSummary>, ServiceError> {
        let entries = self.repo.list_meals(None).await?;
        let members = self.repo.list_members().await?;
        Ok(summarize_monthly(&entries, &members))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Group entries by date; groups ascend by date and keep input order inside.
pub fn group_by_date(entries: Vec<MealEntry>) -> Vec<DateGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<MealEntry>> = BTreeMap::new();
    for entry in entries {
        by_date.entry(entry.meal_date).or_default().push(entry);
    }
    by_date
        .into_iter()
        .map(|(date, meals)| DateGroup { date, total_meals: meals.len(), meals })
        .collect()
}

#[derive(Default)]
struct MonthAcc {
    total_meals: u64,
    total_guest_meals: i64,
    dates: BTreeSet<NaiveDate>,
}

/// Sum entries per `(member, year, month)` and attach the member's current
/// name. Groups whose member no longer exists are dropped. Sorted by year and
/// month descending, then member name ascending.
pub fn summarize_monthly(entries: &[MealEntry], members: &[Member]) -> Vec<MonthlyMemberSummary> {
    let mut groups: HashMap<(Uuid, i32, u32), MonthAcc> = HashMap::new();
    for e in entries {
        let acc = groups.entry((e.member_id, e.meal_date.year(), e.meal_date.month())).or_default();
        acc.total_meals += 1;
        acc.total_guest_meals += i64::from(e.guest_meals);
        acc.dates.insert(e.meal_date);
    }

    let names: HashMap<Uuid, &str> = members.iter().map(|m| (m.id, m.name.as_str())).collect();
    let mut out: Vec<MonthlyMemberSummary> = groups
        .into_iter()
        .filter_map(|((member_id, year, month), acc)| {
            let name = names.get(&member_id)?;
            Some(MonthlyMemberSummary {
                member_id,
                member_name: (*name).to_string(),
                year,
                month,
                total_meals: acc.total_meals,
                total_guest_meals: acc.total_guest_meals,
                meal_dates: acc.dates.into_iter().collect(),
            })
        })
        .collect();

    out.sort_by(|a, b| {
        b.year
            .cmp(&a.year)
            .then(b.month.cmp(&a.month))
            .then_with(|| a.member_name.cmp(&b.member_name))
            .then_with(|| a.member_id.cmp(&b.member_id))
    });
    out
}
