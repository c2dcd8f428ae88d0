use serde::Deserialize;

use crate::error::DashboardError;
use crate::models::Record;

/// The closed set of data domains the dashboard serves. Each module reads a
/// different JSON schema (the category field changes name) but normalizes
/// to the same `Record` shape, so the aggregation engine never branches on
/// the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Customer,
    Account,
    Acv,
    Team,
}

impl Module {
    pub const ALL: [Module; 4] = [Module::Customer, Module::Account, Module::Acv, Module::Team];

    pub fn parse(name: &str) -> Result<Module, DashboardError> {
        match name {
            "customer" => Ok(Module::Customer),
            "account" => Ok(Module::Account),
            "acv" => Ok(Module::Acv),
            "team" => Ok(Module::Team),
            other => Err(DashboardError::InvalidModule(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Module::Customer => "customer",
            Module::Account => "account",
            Module::Acv => "acv",
            Module::Team => "team",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Module::Customer => "customer_type.json",
            Module::Account => "account_industry.json",
            Module::Acv => "acv_range.json",
            Module::Team => "team.json",
        }
    }

    /// Parse one module's raw JSON array into normalized records.
    pub fn parse_records(self, raw: &str) -> serde_json::Result<Vec<Record>> {
        let records = match self {
            Module::Customer => rows_to_records(serde_json::from_str::<Vec<CustomerTypeRow>>(raw)?),
            Module::Account => rows_to_records(serde_json::from_str::<Vec<AccountIndustryRow>>(raw)?),
            Module::Acv => rows_to_records(serde_json::from_str::<Vec<AcvRangeRow>>(raw)?),
            Module::Team => rows_to_records(serde_json::from_str::<Vec<TeamRow>>(raw)?),
        };
        Ok(records)
    }
}

fn rows_to_records<R: Into<Record>>(rows: Vec<R>) -> Vec<Record> {
    rows.into_iter().map(Into::into).collect()
}

#[derive(Debug, Deserialize)]
struct CustomerTypeRow {
    count: u64,
    acv: f64,
    closed_fiscal_quarter: String,
    #[serde(rename = "Cust_Type")]
    cust_type: String,
}

impl From<CustomerTypeRow> for Record {
    fn from(row: CustomerTypeRow) -> Record {
        Record {
            count: row.count,
            acv: row.acv,
            quarter: row.closed_fiscal_quarter,
            category: row.cust_type,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccountIndustryRow {
    count: u64,
    acv: f64,
    closed_fiscal_quarter: String,
    #[serde(rename = "Acct_Industry")]
    acct_industry: String,
}

impl From<AccountIndustryRow> for Record {
    fn from(row: AccountIndustryRow) -> Record {
        Record {
            count: row.count,
            acv: row.acv,
            quarter: row.closed_fiscal_quarter,
            category: row.acct_industry,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AcvRangeRow {
    count: u64,
    acv: f64,
    closed_fiscal_quarter: String,
    #[serde(rename = "ACV_Range")]
    acv_range: String,
}

impl From<AcvRangeRow> for Record {
    fn from(row: AcvRangeRow) -> Record {
        Record {
            count: row.count,
            acv: row.acv,
            quarter: row.closed_fiscal_quarter,
            category: row.acv_range,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TeamRow {
    count: u64,
    acv: f64,
    closed_fiscal_quarter: String,
    #[serde(rename = "Team")]
    team: String,
}

impl From<TeamRow> for Record {
    fn from(row: TeamRow) -> Record {
        Record {
            count: row.count,
            acv: row.acv,
            quarter: row.closed_fiscal_quarter,
            category: row.team,
        }
    }
}
