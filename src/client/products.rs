/// Batch-endpoint products, one per client accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    KeyStats,
    AdvancedStats,
    BalanceSheet,
    CashFlow,
    Earnings,
    Financials,
    IncomeStatement,
    Company,
    Dividends,
    Estimates,
    FundOwnership,
    InsiderRoster,
    InsiderSummary,
    InsiderTransactions,
    InstitutionalOwnership,
    HistoricalPrices,
    RecommendationTrends,
    News,
    PreviousDayPrices,
    Book,
    Price,
    PriceTarget,
    Peers,
    Quote,
    VolumeByVenue,
}

/// Products gathered by [`IexClient::base`](super::IexClient::base), in order.
pub const BASE_PRODUCTS: &[Product] = &[
    Product::KeyStats,
    Product::AdvancedStats,
    Product::BalanceSheet,
    Product::CashFlow,
    Product::Earnings,
    Product::Financials,
    Product::IncomeStatement,
    Product::Company,
    Product::Dividends,
    Product::Estimates,
    Product::FundOwnership,
    Product::InsiderRoster,
    Product::InsiderSummary,
    Product::InsiderTransactions,
    Product::InstitutionalOwnership,
];

pub const ALL_PRODUCTS: &[Product] = &[
    Product::KeyStats,
    Product::AdvancedStats,
    Product::BalanceSheet,
    Product::CashFlow,
    Product::Earnings,
    Product::Financials,
    Product::IncomeStatement,
    Product::Company,
    Product::Dividends,
    Product::Estimates,
    Product::FundOwnership,
    Product::InsiderRoster,
    Product::InsiderSummary,
    Product::InsiderTransactions,
    Product::InstitutionalOwnership,
    Product::HistoricalPrices,
    Product::RecommendationTrends,
    Product::News,
    Product::PreviousDayPrices,
    Product::Book,
    Product::Price,
    Product::PriceTarget,
    Product::Peers,
    Product::Quote,
    Product::VolumeByVenue,
];

impl Product {
    pub fn name(&self) -> &'static str {
        match self {
            Product::KeyStats => "key_stats",
            Product::AdvancedStats => "advanced_stats",
            Product::BalanceSheet => "balance_sheet",
            Product::CashFlow => "cash_flow",
            Product::Earnings => "earnings",
            Product::Financials => "financials",
            Product::IncomeStatement => "income_statement",
            Product::Company => "company",
            Product::Dividends => "dividends",
            Product::Estimates => "estimates",
            Product::FundOwnership => "fund_ownership",
            Product::InsiderRoster => "insider_roster",
            Product::InsiderSummary => "insider_summary",
            Product::InsiderTransactions => "insider_transactions",
            Product::InstitutionalOwnership => "institutional_ownership",
            Product::HistoricalPrices => "historical_prices",
            Product::RecommendationTrends => "recommendation_trends",
            Product::News => "news",
            Product::PreviousDayPrices => "previous_day_prices",
            Product::Book => "book",
            Product::Price => "price",
            Product::PriceTarget => "price_target",
            Product::Peers => "peers",
            Product::Quote => "quote",
            Product::VolumeByVenue => "volume_by_venue",
        }
    }

    /// The provider's `types` value.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Product::KeyStats => "stats",
            Product::AdvancedStats => "advanced-stats",
            Product::BalanceSheet => "balance-sheet",
            Product::CashFlow => "cash-flow",
            Product::Earnings => "earnings",
            Product::Financials => "financials",
            Product::IncomeStatement => "income",
            Product::Company => "company",
            Product::Dividends => "dividends",
            Product::Estimates => "estimates",
            Product::FundOwnership => "fund-ownership",
            Product::InsiderRoster => "insider-roster",
            Product::InsiderSummary => "insider-summary",
            Product::InsiderTransactions => "insider-transactions",
            Product::InstitutionalOwnership => "institutional-ownership",
            Product::HistoricalPrices => "chart",
            Product::RecommendationTrends => "recommendation-trends",
            Product::News => "news",
            Product::PreviousDayPrices => "previous",
            Product::Book => "book",
            Product::Price => "price",
            Product::PriceTarget => "price-target",
            Product::Peers => "peers",
            Product::Quote => "quote",
            Product::VolumeByVenue => "volume-by-venue",
        }
    }

    /// Whether the accessor forwards caller parameters to the provider.
    pub fn accepts_params(&self) -> bool {
        matches!(
            self,
            Product::KeyStats
                | Product::AdvancedStats
                | Product::BalanceSheet
                | Product::CashFlow
                | Product::Earnings
                | Product::Financials
                | Product::IncomeStatement
                | Product::Company
                | Product::Dividends
                | Product::HistoricalPrices
                | Product::News
                | Product::Quote
        )
    }

    /// Resolve a product by name; dashes and underscores are interchangeable.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        ALL_PRODUCTS
            .iter()
            .find(|product| product.name() == normalized)
            .copied()
    }
}
