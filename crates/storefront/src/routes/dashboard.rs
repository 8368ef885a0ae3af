//! Admin dashboard.
//!
//! All figures are fixed sample data. The revenue chart is an inline SVG
//! whose paths are computed here.


use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use nebula_core::Price;

use super::{Chrome, Section, whole_dollars};
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;

/// Revenue chart view box.
pub const CHART_WIDTH: f64 = 600.0;
pub const CHART_HEIGHT: f64 = 240.0;

/// Monthly revenue sample series.
pub const REVENUE: [(&str, u32); 6] = [
    ("Jan", 4000),
    ("Feb", 3000),
    ("Mar", 5000),
    ("Apr", 4500),
    ("May", 6000),
    ("Jun", 5500),
];

/// Headline revenue, in whole dollars.
pub const TOTAL_REVENUE_DOLLARS: u64 = 2_409_102;

/// Dashboard tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    Inventory,
    Orders,
    Customers,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::Overview, Self::Inventory, Self::Orders, Self::Customers];

    /// Unknown or missing values fall back to the overview.
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("inventory") => Self::Inventory,
            Some("orders") => Self::Orders,
            Some("customers") => Self::Customers,
            _ => Self::Overview,
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Inventory => "inventory",
            Self::Orders => "orders",
            Self::Customers => "customers",
        }
    }

    /// Sidebar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Intelligence",
            Self::Inventory => "Cargo Bay",
            Self::Orders => "Logistics",
            Self::Customers => "Entities",
        }
    }
}

/// A headline figure.
#[derive(Clone, Debug)]
pub struct Stat {
    pub label: &'static str,
    pub value: &'static str,
    pub tone: &'static str,
}

/// An inventory table row.
#[derive(Clone, Debug)]
pub struct InventoryRow {
    pub product: &'static str,
    pub status: &'static str,
    pub price: String,
}

/// A sidebar link.
#[derive(Clone, Debug)]
pub struct TabLink {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Chart geometry in view box coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartPaths {
    /// Stroke along the data points
    pub line: String,
    /// Closed shape between the line and the baseline
    pub area: String,
}

pub static STATS: [Stat; 3] = [
    Stat {
        label: "Conversion",
        value: "4.8%",
        tone: "indigo",
    },
    Stat {
        label: "Active Carts",
        value: "842",
        tone: "blue",
    },
    Stat {
        label: "Uptime",
        value: "99.9%",
        tone: "emerald",
    },
];

fn inventory() -> Vec<InventoryRow> {
    vec![
        InventoryRow {
            product: "Nebula Core",
            status: "In Transit",
            price: whole_dollars(Price::from_dollars(4200)),
        },
        InventoryRow {
            product: "Void Visor",
            status: "Stocked",
            price: whole_dollars(Price::from_dollars(899)),
        },
    ]
}

/// Compute line and area paths for `values`, scaled so the largest value
/// touches the top of a `width` x `height` box and zero sits on the bottom.
#[must_use]
pub fn area_chart_paths(values: &[u32], width: f64, height: f64) -> ChartPaths {
    let Some(&max) = values.iter().max() else {
        return ChartPaths::default();
    };

    let gaps = u32::try_from(values.len().saturating_sub(1)).unwrap_or(u32::MAX);
    let step = if gaps == 0 { 0.0 } else { width / f64::from(gaps) };
    let scale = if max == 0 { 0.0 } else { height / f64::from(max) };

    let line = values
        .iter()
        .zip(0_u32..)
        .map(|(&value, i)| {
            let x = step * f64::from(i);
            let y = f64::from(value).mul_add(-scale, height).clamp(0.0, height);
            let command = if i == 0 { 'M' } else { 'L' };
            format!("{command}{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ");

    let last_x = step * f64::from(gaps);
    let area = format!(
        "M0.0,{height:.1} {} L{last_x:.1},{height:.1} Z",
        line.replacen('M', "L", 1)
    );

    ChartPaths { line, area }
}

/// Dashboard query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub chrome: Chrome,
    pub identity: Option<String>,
    pub tab: Tab,
    pub tabs: Vec<TabLink>,
    pub total_revenue: String,
    pub stats: &'static [Stat],
    pub chart: ChartPaths,
    pub months: Vec<&'static str>,
    pub inventory: Vec<InventoryRow>,
}

/// Display the dashboard.
///
/// Not gated on login; shows the signed-in identity when there is one.
#[instrument(skip(session, user))]
pub async fn dashboard(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<DashboardQuery>,
) -> Result<DashboardTemplate> {
    let tab = Tab::from_query(query.tab.as_deref());
    let values: Vec<u32> = REVENUE.iter().map(|&(_, value)| value).collect();

    Ok(DashboardTemplate {
        chrome: Chrome::load(&session, Section::Dashboard, "/dashboard").await?,
        identity: user.map(|u| u.id),
        tab,
        tabs: Tab::ALL
            .iter()
            .map(|&t| TabLink {
                slug: t.slug(),
                label: t.label(),
                active: t == tab,
            })
            .collect(),
        total_revenue: whole_dollars(Price::from_dollars(TOTAL_REVENUE_DOLLARS)),
        stats: &STATS,
        chart: area_chart_paths(&values, CHART_WIDTH, CHART_HEIGHT),
        months: REVENUE.iter().map(|&(month, _)| month).collect(),
        inventory: inventory(),
    })
}
