//! Static field allowlists and series catalogs.

/// Fields kept from the `company` payload.
pub const COMPANY: &[&str] = &["exchange", "industry", "sector", "tags"];

pub const ADVANCED_STATS: &[&str] = &[
    "revenuePerShare",
    "revenuePerEmployee",
    "debtToEquity",
    "profitMargin",
    "enterpriseValue",
    "enterpriseValueToRevenue",
    "priceToSales",
    "priceToBook",
    "forwardPERatio",
    "pegRatio",
    "peRatio",
    "peHigh",
    "peLow",
];

pub const KEY_STATS: &[&str] = &[
    "marketcap",
    "employees",
    "float",
    "ttmEPS",
    "ttmDividendRate",
    "companyName",
    "sharesOutstanding",
    "nextDividendDate",
    "dividendYield",
    "nextEarningsDate",
    "exDividendDate",
    "beta",
];

pub const BALANCE_SHEET: &[&str] = &[
    "accountsPayable",
    "capitalSurplus",
    "commonStock",
    "currentAssets",
    "currentCash",
    "currentLongTermDebt",
    "goodwill",
    "intangibleAssets",
    "inventory",
    "longTermDebt",
    "longTermInvestments",
    "minorityInterest",
    "netTangibleAssets",
    "otherAssets",
    "otherCurrentAssets",
    "otherCurrentLiabilities",
    "otherLiabilities",
    "propertyPlantEquipment",
    "receivables",
    "reportDate",
    "retainedEarnings",
    "shareholderEquity",
    "shortTermInvestments",
    "totalAssets",
    "totalCurrentLiabilities",
    "totalLiabilities",
    "treasuryStock",
];

pub const INCOME_STATEMENT: &[&str] = &[
    "costOfRevenue",
    "ebit",
    "grossProfit",
    "incomeTax",
    "interestIncome",
    "netIncome",
    "netIncomeBasic",
    "operatingExpense",
    "operatingIncome",
    "otherIncomeExpenseNet",
    "pretaxIncome",
    "reportDate",
    "researchAndDevelopment",
    "sellingGeneralAndAdmin",
    "totalRevenue",
];

pub const CASH_FLOW: &[&str] = &[
    "capitalExpenditures",
    "cashChange",
    "cashFlow",
    "cashFlowFinancing",
    "changesInInventories",
    "changesInReceivables",
    "depreciation",
    "dividendsPaid",
    "exchangeRateEffect",
    "investingActivityOther",
    "investments",
    "netBorrowings",
    "otherFinancingCashFlows",
    "reportDate",
    "totalInvestingCashFlows",
];

pub const FINANCIALS: &[&str] = &[
    "currentDebt",
    "operatingRevenue",
    "reportDate",
    "shortTermDebt",
    "totalCash",
    "totalDebt",
];

pub const DIVIDENDS: &[&str] = &[
    "exDate",
    "paymentDate",
    "recordDate",
    "declaredDate",
    "amount",
    "flag",
    "currency",
    "description",
    "frequency",
];

pub const NEWS: &[&str] = &[
    "datetime",
    "hasPaywall",
    "headline",
    "related",
    "source",
    "summary",
    "url",
];

pub const OWNERSHIP: &[&str] = &["entityProperName", "adjHolding", "adjMv", "reportDate"];

pub const MINUTE: &[&str] = &["date", "minute", "open", "high", "low", "close", "volume"];

pub const DAILY: &[&str] = &[
    "date",
    "open",
    "high",
    "low",
    "close",
    "change",
    "changePercent",
    "volume",
];

/// Fractional fields reported as percentages after normalization.
pub const ADVANCED_STATS_PERCENT: &[&str] = &["profitMargin"];
