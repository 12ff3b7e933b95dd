use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::errors::InternalError;
use crate::stores::contains_ignore_case;
use crate::types::db::dcf_log::{self, Entity as DcfLog};
use crate::types::internal::PageRequest;

/// DcfLogStore is the persistence gateway for the append-only analysis log.
pub struct DcfLogStore {}

impl DcfLogStore {
    pub fn new() -> Self {
        Self {}
    }

    /// One page of log entries, newest first
    pub async fn find_page(
        &self,
        conn: &impl ConnectionTrait,
        page: PageRequest,
    ) -> Result<(Vec<dcf_log::Model>, u64, u64), InternalError> {
        let paginator = DcfLog::find()
            .order_by_desc(dcf_log::Column::CreatedAt)
            .order_by_desc(dcf_log::Column::Id)
            .paginate(conn, page.size);

        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| InternalError::database("count_dcf_logs_page", e))?;
        let rows = paginator
            .fetch_page(page.page)
            .await
            .map_err(|e| InternalError::database("fetch_dcf_logs_page", e))?;

        Ok((rows, totals.number_of_items, totals.number_of_pages))
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        model: dcf_log::ActiveModel,
    ) -> Result<dcf_log::Model, InternalError> {
        model
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("insert_dcf_log", e))
    }

    pub async fn count(&self, conn: &impl ConnectionTrait) -> Result<u64, InternalError> {
        DcfLog::find()
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_dcf_logs", e))
    }

    /// Entries whose validation status contains the given term, case-insensitive
    pub async fn count_status_contains(
        &self,
        conn: &impl ConnectionTrait,
        term: &str,
    ) -> Result<u64, InternalError> {
        DcfLog::find()
            .filter(contains_ignore_case(dcf_log::Column::ValidationStatus, term))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_dcf_logs_by_status", e))
    }

    /// COUNT(DISTINCT company_name) over the whole log
    pub async fn count_distinct_companies(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<u64, InternalError> {
        let count: Option<i64> = DcfLog::find()
            .select_only()
            .column_as(
                Expr::expr(Func::count_distinct(Expr::col(dcf_log::Column::CompanyName))),
                "unique_companies",
            )
            .into_tuple()
            .one(conn)
            .await
            .map_err(|e| InternalError::database("count_distinct_companies", e))?;

        Ok(count.unwrap_or(0).max(0) as u64)
    }
}

impl Default for DcfLogStore {
    fn default() -> Self {
        Self::new()
    }
}
