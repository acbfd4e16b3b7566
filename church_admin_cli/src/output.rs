use anyhow::Result;
use church_admin_lib::types::{
    Amount, Church, Expense, FundTransfer, Remittance, TopUp, User, Zone,
};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct FundRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Reference")]
    #[serde(rename = "Reference")]
    reference: String,
    #[tabled(rename = "From")]
    #[serde(rename = "From")]
    source: String,
    #[tabled(rename = "To")]
    #[serde(rename = "To")]
    destination: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Church")]
    #[serde(rename = "Church")]
    church: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
}

#[derive(Tabled, Serialize)]
pub struct RemittanceRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Reference")]
    #[serde(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Church")]
    #[serde(rename = "Church")]
    church: String,
    #[tabled(rename = "Period")]
    #[serde(rename = "Period")]
    period: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
}

#[derive(Tabled, Serialize)]
pub struct TopUpRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Reference")]
    #[serde(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Fund")]
    #[serde(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Church")]
    #[serde(rename = "Church")]
    church: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
}

#[derive(Tabled, Serialize)]
pub struct ExpenseRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Church")]
    #[serde(rename = "Church")]
    church: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
}

#[derive(Tabled, Serialize)]
pub struct UserRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    #[serde(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Role")]
    #[serde(rename = "Role")]
    role: String,
    #[tabled(rename = "Church")]
    #[serde(rename = "Church")]
    church: String,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: String,
}

#[derive(Tabled, Serialize)]
pub struct ChurchRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Zone")]
    #[serde(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Pastor")]
    #[serde(rename = "Pastor")]
    pastor: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
pub struct ZoneRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Coordinator")]
    #[serde(rename = "Coordinator")]
    coordinator: String,
    #[tabled(rename = "Churches")]
    #[serde(rename = "Churches")]
    churches: String,
}

// -- Row builders --

pub fn build_fund_rows(transfers: &[FundTransfer]) -> Vec<FundRow> {
    transfers
        .iter()
        .map(|t| FundRow {
            id: t.id.to_string(),
            reference: text(&t.reference),
            source: text(&t.source_fund),
            destination: text(&t.destination_fund),
            amount: format_amount(&t.amount),
            status: text(&t.status),
            church: text(&t.church_name),
            date: format_date(&t.created_at),
        })
        .collect()
}

pub fn build_remittance_rows(remittances: &[Remittance]) -> Vec<RemittanceRow> {
    remittances
        .iter()
        .map(|r| RemittanceRow {
            id: r.id.to_string(),
            reference: text(&r.reference),
            church: text(&r.church_name),
            period: text(&r.period),
            amount: format_amount(&r.amount),
            status: text(&r.status),
            date: format_date(&r.created_at),
        })
        .collect()
}

pub fn build_top_up_rows(top_ups: &[TopUp]) -> Vec<TopUpRow> {
    top_ups
        .iter()
        .map(|t| TopUpRow {
            id: t.id.to_string(),
            reference: text(&t.reference),
            fund: text(&t.fund),
            church: text(&t.church_name),
            amount: format_amount(&t.amount),
            status: text(&t.status),
            date: format_date(&t.created_at),
        })
        .collect()
}

pub fn build_expense_rows(expenses: &[Expense]) -> Vec<ExpenseRow> {
    expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.to_string(),
            description: text(&e.description),
            category: text(&e.category),
            church: text(&e.church_name),
            amount: format_amount(&e.amount),
            status: text(&e.status),
            date: format_date(&e.created_at),
        })
        .collect()
}

pub fn build_user_rows(users: &[User]) -> Vec<UserRow> {
    users
        .iter()
        .map(|u| UserRow {
            name: u.display_name(),
            email: text(&u.email),
            phone: text(&u.phone_number),
            role: text(&u.role),
            church: text(&u.church_name),
            active: match u.is_active {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => String::new(),
            },
        })
        .collect()
}

pub fn build_church_rows(churches: &[Church]) -> Vec<ChurchRow> {
    churches
        .iter()
        .map(|c| ChurchRow {
            id: c.id.to_string(),
            name: text(&c.name),
            zone: text(&c.zone_name),
            pastor: text(&c.pastor),
            status: text(&c.status),
        })
        .collect()
}

pub fn build_zone_rows(zones: &[Zone]) -> Vec<ZoneRow> {
    zones
        .iter()
        .map(|z| ZoneRow {
            id: z.id.to_string(),
            name: text(&z.name),
            coordinator: text(&z.coordinator),
            churches: z.church_count.map(|n| n.to_string()).unwrap_or_default(),
        })
        .collect()
}

// -- Rendering --

/// Prints `rows` in the requested format. Empty tables are not drawn; the
/// status line already says there is nothing to show.
pub fn render<R: Tabled + Serialize>(rows: &[R], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table if !rows.is_empty() => println!("{}", Table::new(rows)),
        OutputFormat::Markdown if !rows.is_empty() => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Table | OutputFormat::Markdown => {}
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Csv => print_csv(rows, std::io::stdout())?,
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn print_csv<R: Serialize, W: std::io::Write>(rows: &[R], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn format_amount(amount: &Option<Amount>) -> String {
    amount.as_ref().map(|a| a.to_string()).unwrap_or_default()
}

/// Date part of an ISO timestamp (`2024-03-01T09:15:00Z` -> `2024-03-01`).
fn format_date(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(|v| v.split('T').next().unwrap_or(v).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use church_admin_lib::types::Page;

    fn load_funds_fixture() -> Vec<FundTransfer> {
        let json_str = include_str!("../../church_admin_api/tests/fixtures/fund_transfers.json");
        let page: Page<FundTransfer> = serde_json::from_str(json_str).unwrap();
        page.into_items()
    }

    fn load_users_fixture() -> Vec<User> {
        let json_str = include_str!("../../church_admin_api/tests/fixtures/users.json");
        let page: Page<User> = serde_json::from_str(json_str).unwrap();
        page.into_items()
    }

    fn load_churches_fixture() -> Vec<Church> {
        let json_str = include_str!("../../church_admin_api/tests/fixtures/churches.json");
        let page: Page<Church> = serde_json::from_str(json_str).unwrap();
        page.into_items()
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("csv"), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("xml"), OutputFormat::Table);
    }

    #[test]
    fn test_format_date_strips_time() {
        assert_eq!(format_date(&Some("2024-03-01T09:15:00Z".to_string())), "2024-03-01");
        assert_eq!(format_date(&Some("2024-03-01".to_string())), "2024-03-01");
        assert_eq!(format_date(&None), "");
    }

    #[test]
    fn test_build_fund_rows_mapping() {
        let rows = build_fund_rows(&load_funds_fixture());
        assert_eq!(rows.len(), 3);

        let row = &rows[0];
        assert_eq!(row.id, "101");
        assert_eq!(row.reference, "FT-2024-0101");
        assert_eq!(row.source, "General Fund");
        assert_eq!(row.destination, "Building Fund");
        assert_eq!(row.amount, "150000.00");
        assert_eq!(row.status, "pending");
        assert_eq!(row.date, "2024-03-01");

        assert_eq!(rows[1].amount, "2500");
        assert_eq!(rows[2].church, "");
    }

    #[test]
    fn test_build_fund_rows_empty() {
        assert!(build_fund_rows(&[]).is_empty());
    }

    #[test]
    fn test_build_user_rows_mapping() {
        let rows = build_user_rows(&load_users_fixture());
        assert_eq!(rows[0].name, "Grace Adeyemi");
        assert_eq!(rows[0].active, "yes");
        assert_eq!(rows[1].name, "treasurer@example.org");
        assert_eq!(rows[1].active, "no");
        assert_eq!(rows[1].church, "");
    }

    #[test]
    fn test_build_church_rows_mapping() {
        let rows = build_church_rows(&load_churches_fixture());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Grace Assembly Ikeja");
        assert_eq!(rows[0].zone, "Lagos Mainland");
        assert_eq!(rows[0].status, "active");
    }

    #[test]
    fn test_build_zone_rows_count() {
        let zones = vec![Zone {
            name: Some("Lagos Mainland".to_string()),
            church_count: Some(14),
            ..Default::default()
        }];
        let rows = build_zone_rows(&zones);
        assert_eq!(rows[0].churches, "14");
        assert_eq!(rows[0].coordinator, "");
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let rows = build_church_rows(&load_churches_fixture());
        let mut out = Vec::new();
        print_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("ID,Name,Zone,Pastor,Status"));
        assert_eq!(
            lines.next(),
            Some("7,Grace Assembly Ikeja,Lagos Mainland,Grace Adeyemi,active")
        );
    }

    #[test]
    fn test_table_contains_values() {
        let rows = build_fund_rows(&load_funds_fixture());
        let table = Table::new(&rows).to_string();
        assert!(table.contains("FT-2024-0102"));
        assert!(table.contains("Welfare Fund"));
    }
}
