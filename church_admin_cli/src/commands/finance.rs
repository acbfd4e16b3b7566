use anyhow::Result;
use clap::Args;
use church_admin_lib::types::{Expense, FundTransfer, Remittance, Resource, TopUp};
use church_admin_lib::{validation, Client, FinanceQuery, Pager, Query};

use super::paging::{list, with_local_status, PagingArgs};
use crate::output::{
    build_expense_rows, build_fund_rows, build_remittance_rows, build_top_up_rows, OutputFormat,
};

#[derive(Args)]
pub struct FinanceArgs {
    /// Filter by status: pending, approved, rejected, completed, cancelled
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by church ID
    #[arg(long)]
    pub church: Option<String>,

    /// Filter by zone ID
    #[arg(long)]
    pub zone: Option<String>,

    /// Earliest date, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,

    /// Search references and descriptions
    #[arg(long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub paging: PagingArgs,
}

pub async fn run(
    resource: Resource,
    args: &FinanceArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let (start, end) = validation::validate_date_range(args.from.as_deref(), args.to.as_deref())?;
    let start = start.map(|d| d.to_string());
    let end = end.map(|d| d.to_string());

    let mut query = FinanceQuery::default().with_date_range(start.as_deref(), end.as_deref());
    if let Some(church) = &args.church {
        query = query.with_church(church);
    }
    if let Some(zone) = &args.zone {
        query = query.with_zone(zone);
    }
    if let Some(search) = &args.search {
        query = query.with_search(&validation::validate_search(search)?);
    }

    // Endpoints without a status parameter get filtered page by page instead.
    let mut local_status = None;
    if let Some(status) = &args.status {
        let status = validation::validate_status(status)?;
        if resource.supports_status_filter() {
            query = query.with_status(&status);
        } else {
            local_status = Some(status);
        }
    }
    let query = args.paging.apply(query)?;

    let pages = client.pages().clone();
    let endpoint = client.endpoint(resource);
    match resource {
        Resource::FundTransfers => {
            let pager: Pager<FundTransfer, _> = Pager::new(pages, endpoint, query);
            list(with_local_status(pager, local_status), &args.paging, format, build_fund_rows).await
        }
        Resource::Remittances => {
            let pager: Pager<Remittance, _> = Pager::new(pages, endpoint, query);
            list(
                with_local_status(pager, local_status),
                &args.paging,
                format,
                build_remittance_rows,
            )
            .await
        }
        Resource::TopUps => {
            let pager: Pager<TopUp, _> = Pager::new(pages, endpoint, query);
            list(with_local_status(pager, local_status), &args.paging, format, build_top_up_rows).await
        }
        Resource::Expenses => {
            let pager: Pager<Expense, _> = Pager::new(pages, endpoint, query);
            list(with_local_status(pager, local_status), &args.paging, format, build_expense_rows).await
        }
        other => anyhow::bail!("{} is not a finance collection", other),
    }
}
