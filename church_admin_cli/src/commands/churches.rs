use anyhow::Result;
use clap::Args;
use church_admin_lib::types::{Church, Resource, Zone};
use church_admin_lib::{validation, ChurchQuery, Client, Pager, Query, SortDirection, ZoneQuery};

use super::paging::{list, with_local_status, PagingArgs};
use crate::output::{build_church_rows, build_zone_rows, OutputFormat};

#[derive(Args)]
pub struct ChurchesArgs {
    /// Search by church name
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by zone ID
    #[arg(long)]
    pub zone: Option<String>,

    /// Only show churches with this status (filtered on each fetched page)
    #[arg(long)]
    pub status: Option<String>,

    #[command(flatten)]
    pub paging: PagingArgs,
}

#[derive(Args)]
pub struct ZonesArgs {
    /// Search by zone name
    #[arg(long)]
    pub search: Option<String>,

    /// Sort by name descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    #[command(flatten)]
    pub paging: PagingArgs,
}

pub async fn run_churches(args: &ChurchesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = ChurchQuery::default();
    if let Some(search) = &args.search {
        query = query.with_search(&validation::validate_search(search)?);
    }
    if let Some(zone) = &args.zone {
        query = query.with_zone(zone);
    }
    let query = args.paging.apply(query)?;

    let status = args
        .status
        .as_deref()
        .map(validation::validate_status)
        .transpose()?;

    let pager: Pager<Church, _> = Pager::new(
        client.pages().clone(),
        client.endpoint(Resource::Churches),
        query,
    );
    list(with_local_status(pager, status), &args.paging, format, build_church_rows).await
}

pub async fn run_zones(args: &ZonesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let direction = if args.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let mut query = ZoneQuery::default().with_ordering("name", direction);
    if let Some(search) = &args.search {
        query = query.with_search(&validation::validate_search(search)?);
    }
    let query = args.paging.apply(query)?;

    let pager: Pager<Zone, _> = Pager::new(
        client.pages().clone(),
        client.endpoint(Resource::Zones),
        query,
    );
    list(pager, &args.paging, format, build_zone_rows).await
}
