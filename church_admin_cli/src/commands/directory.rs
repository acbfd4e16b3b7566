use anyhow::Result;
use clap::Args;
use church_admin_lib::types::{Resource, User};
use church_admin_lib::{validation, Client, Pager, Query, UserQuery};

use super::paging::{list, with_local_status, PagingArgs};
use crate::output::{build_user_rows, OutputFormat};

#[derive(Args)]
pub struct UsersArgs {
    /// Search by name, email or phone number
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by church ID
    #[arg(long)]
    pub church: Option<String>,

    /// Filter by role (e.g. pastor, treasurer, member)
    #[arg(long)]
    pub role: Option<String>,

    /// Only show active or inactive accounts (filtered on each fetched page)
    #[arg(long)]
    pub status: Option<String>,

    #[command(flatten)]
    pub paging: PagingArgs,
}

pub async fn run(args: &UsersArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = UserQuery::default();
    if let Some(search) = &args.search {
        query = query.with_search(&validation::validate_search(search)?);
    }
    if let Some(church) = &args.church {
        query = query.with_church(church);
    }
    if let Some(role) = &args.role {
        query = query.with_role(&validation::sanitize_text(role, validation::MAX_SEARCH_LENGTH)?);
    }
    let query = args.paging.apply(query)?;

    let status = args
        .status
        .as_deref()
        .map(validation::validate_status)
        .transpose()?;

    let pager: Pager<User, _> = Pager::new(
        client.pages().clone(),
        client.endpoint(Resource::Users),
        query,
    );
    list(with_local_status(pager, status), &args.paging, format, build_user_rows).await
}
