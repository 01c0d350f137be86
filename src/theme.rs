//! Report categories and their chart color palettes.
//!
//! Every report belongs to a fixed category which determines the fields used
//! for aggregation (see [crate::report::schema]) and the colors used for its
//! charts. Parsing a category from a request string is the only fallible
//! operation here; everything keyed on the enum itself is total.

use std::fmt;

/// Which report dashboard a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// The marketplace admin dashboard.
    Admin,
    /// The per-artisan dashboard.
    Artisan,
}

impl ReportScope {
    /// Parse a scope from a request string. Returns `None` for anything
    /// unrecognized so callers can degrade instead of erroring.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "admin" => Some(Self::Admin),
            "artisan" => Some(Self::Artisan),
            _ => None,
        }
    }

    /// The categories available from this scope's report page, in menu order.
    pub fn categories(self) -> &'static [ReportCategory] {
        match self {
            Self::Admin => &[
                ReportCategory::Sales,
                ReportCategory::Products,
                ReportCategory::Customers,
                ReportCategory::Artisans,
            ],
            Self::Artisan => &[
                ReportCategory::Orders,
                ReportCategory::Products,
                ReportCategory::Assignments,
                ReportCategory::Inventory,
                ReportCategory::CustomPerformance,
                ReportCategory::Performance,
            ],
        }
    }
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Artisan => write!(f, "artisan"),
        }
    }
}

/// The fixed set of report types across both dashboards.
///
/// `Products` is shared between the admin and artisan scopes; the rest belong
/// to exactly one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportCategory {
    Sales,
    Products,
    Customers,
    Artisans,
    Orders,
    Assignments,
    Inventory,
    CustomPerformance,
    Performance,
}

impl ReportCategory {
    /// Parse a category from a request string.
    ///
    /// Returns `None` for unrecognized strings; the caller renders a
    /// "no chart available" notice rather than an error page.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "sales" => Some(Self::Sales),
            "products" => Some(Self::Products),
            "customers" => Some(Self::Customers),
            "artisans" => Some(Self::Artisans),
            "orders" => Some(Self::Orders),
            "assignments" => Some(Self::Assignments),
            "inventory" => Some(Self::Inventory),
            "custom-performance" => Some(Self::CustomPerformance),
            "performance" => Some(Self::Performance),
            _ => None,
        }
    }

    /// The wire/request name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Artisans => "artisans",
            Self::Orders => "orders",
            Self::Assignments => "assignments",
            Self::Inventory => "inventory",
            Self::CustomPerformance => "custom-performance",
            Self::Performance => "performance",
        }
    }

    /// Human-readable title for page headings and the category menu.
    pub fn title(self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Products => "Products",
            Self::Customers => "Customers",
            Self::Artisans => "Artisans",
            Self::Orders => "Orders",
            Self::Assignments => "Assignments",
            Self::Inventory => "Inventory",
            Self::CustomPerformance => "Custom Performance",
            Self::Performance => "Performance",
        }
    }

    /// Whether this category can be requested from `scope`'s report page.
    pub fn available_in(self, scope: ReportScope) -> bool {
        scope.categories().contains(&self)
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The colors used to render a category's charts and summary accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    /// Segment colors, cycled with `series[index % series.len()]`.
    pub series: &'static [&'static str],
}

impl Palette {
    /// The palette for a report category.
    ///
    /// Total over the enum, so coloring is deterministic for any category and
    /// independent of the data being charted.
    pub fn for_category(category: ReportCategory) -> &'static Palette {
        match category {
            ReportCategory::Sales => &SALES_PALETTE,
            ReportCategory::Products => &PRODUCTS_PALETTE,
            ReportCategory::Customers => &CUSTOMERS_PALETTE,
            ReportCategory::Artisans => &ARTISANS_PALETTE,
            ReportCategory::Orders => &ORDERS_PALETTE,
            ReportCategory::Assignments => &ASSIGNMENTS_PALETTE,
            ReportCategory::Inventory => &INVENTORY_PALETTE,
            ReportCategory::CustomPerformance | ReportCategory::Performance => {
                &PERFORMANCE_PALETTE
            }
        }
    }

    /// The color for the segment at `index`, cycling through the series.
    pub fn color(&self, index: usize) -> &'static str {
        self.series[index % self.series.len()]
    }
}

const SALES_PALETTE: Palette = Palette {
    primary: "#2563eb",
    secondary: "#60a5fa",
    accent: "#1d4ed8",
    series: &[
        "#2563eb", "#60a5fa", "#93c5fd", "#1d4ed8", "#3b82f6", "#bfdbfe",
    ],
};

const PRODUCTS_PALETTE: Palette = Palette {
    primary: "#16a34a",
    secondary: "#4ade80",
    accent: "#15803d",
    series: &[
        "#16a34a", "#4ade80", "#86efac", "#15803d", "#22c55e", "#bbf7d0",
    ],
};

const CUSTOMERS_PALETTE: Palette = Palette {
    primary: "#9333ea",
    secondary: "#c084fc",
    accent: "#7e22ce",
    series: &[
        "#9333ea", "#c084fc", "#d8b4fe", "#7e22ce", "#a855f7", "#ede9fe",
    ],
};

const ARTISANS_PALETTE: Palette = Palette {
    primary: "#ea580c",
    secondary: "#fb923c",
    accent: "#c2410c",
    series: &[
        "#ea580c", "#fb923c", "#fdba74", "#c2410c", "#f97316", "#fed7aa",
    ],
};

const ORDERS_PALETTE: Palette = Palette {
    primary: "#0891b2",
    secondary: "#22d3ee",
    accent: "#0e7490",
    series: &[
        "#0891b2", "#22d3ee", "#67e8f9", "#0e7490", "#06b6d4", "#cffafe",
    ],
};

const ASSIGNMENTS_PALETTE: Palette = Palette {
    primary: "#ca8a04",
    secondary: "#facc15",
    accent: "#a16207",
    series: &[
        "#ca8a04", "#facc15", "#fde047", "#a16207", "#eab308", "#fef9c3",
    ],
};

const INVENTORY_PALETTE: Palette = Palette {
    primary: "#475569",
    secondary: "#94a3b8",
    accent: "#334155",
    series: &[
        "#475569", "#94a3b8", "#cbd5e1", "#334155", "#64748b", "#e2e8f0",
    ],
};

const PERFORMANCE_PALETTE: Palette = Palette {
    primary: "#dc2626",
    secondary: "#f87171",
    accent: "#b91c1c",
    series: &[
        "#dc2626", "#f87171", "#fca5a5", "#b91c1c", "#ef4444", "#fee2e2",
    ],
};
