use crate::domain::errors::DomainError;
use crate::domain::identity::Principal;
use crate::domain::ports::ReportRepository;
use crate::domain::report::{MostSoldProduct, RevenueDetail, UnpaidBill, DEFAULT_MOST_SOLD_LIMIT};

const MAX_MOST_SOLD_LIMIT: i64 = 100;

/// Admin-only sales reports.
pub struct ReportService<R> {
    repo: R,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn most_sold_products(
        &self,
        principal: &Principal,
        limit: Option<i64>,
    ) -> Result<Vec<MostSoldProduct>, DomainError> {
        principal.require_admin()?;
        let limit = limit
            .unwrap_or(DEFAULT_MOST_SOLD_LIMIT)
            .clamp(1, MAX_MOST_SOLD_LIMIT);
        self.repo.most_sold_products(limit)
    }

    pub fn unpaid_bills(&self, principal: &Principal) -> Result<Vec<UnpaidBill>, DomainError> {
        principal.require_admin()?;
        self.repo.unpaid_bills()
    }

    pub fn revenue_details(
        &self,
        principal: &Principal,
    ) -> Result<Vec<RevenueDetail>, DomainError> {
        principal.require_admin()?;
        self.repo.revenue_details()
    }
}
