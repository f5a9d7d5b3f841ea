use std::borrow::Cow;

/// A macro or commodity series served by the market data-point endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketSeries {
    /// WTI crude, or Brent when `brent` is set.
    Oil { brent: bool },
    NaturalGas,
    HeatingOil,
    JetFuel,
    Diesel,
    Gas,
    Propane,
    /// Constant-maturity treasury yield for a tenor in years.
    TreasuryRate { tenor: u32 },
    Cpi,
    CreditCardInterestRate,
    FedFundRate,
    RealGdp,
    InstitutionalMoneyFunds,
    InitialClaims,
    IndustrialProduction,
    /// 30 and 15 year fixed; any other term selects the 5/1 ARM rate.
    MortgageRate { term: u32 },
    HousingStarts,
    TotalPayrolls,
    VehicleSales,
    RetailMoneyFunds,
    UnemploymentRate,
    RecessionProbability,
}

/// Commodities in aggregation order, with default variants.
pub const COMMODITIES: &[MarketSeries] = &[
    MarketSeries::Oil { brent: false },
    MarketSeries::NaturalGas,
    MarketSeries::HeatingOil,
    MarketSeries::JetFuel,
    MarketSeries::Diesel,
    MarketSeries::Gas,
    MarketSeries::Propane,
];

/// Economic indicators in aggregation order, with default tenors.
pub const ECONOMIC_DATA: &[MarketSeries] = &[
    MarketSeries::TreasuryRate { tenor: 30 },
    MarketSeries::Cpi,
    MarketSeries::CreditCardInterestRate,
    MarketSeries::FedFundRate,
    MarketSeries::RealGdp,
    MarketSeries::InstitutionalMoneyFunds,
    MarketSeries::InitialClaims,
    MarketSeries::IndustrialProduction,
    MarketSeries::MortgageRate { term: 30 },
    MarketSeries::HousingStarts,
    MarketSeries::TotalPayrolls,
    MarketSeries::VehicleSales,
    MarketSeries::RetailMoneyFunds,
    MarketSeries::UnemploymentRate,
    MarketSeries::RecessionProbability,
];

impl MarketSeries {
    /// Provider series code.
    pub fn code(&self) -> Cow<'static, str> {
        let code = match self {
            MarketSeries::Oil { brent: false } => "DCOILWTICO",
            MarketSeries::Oil { brent: true } => "DCOILBRENTEU",
            MarketSeries::NaturalGas => "DHHNGSP",
            MarketSeries::HeatingOil => "DHOILNYH",
            MarketSeries::JetFuel => "DJFUELUSGULF",
            MarketSeries::Diesel => "GASDESW",
            MarketSeries::Gas => "GASREGCOVW",
            MarketSeries::Propane => "DPROPANEMBTX",
            MarketSeries::TreasuryRate { tenor } => return Cow::Owned(format!("DGS{tenor}")),
            MarketSeries::Cpi => "CPIAUCSL",
            MarketSeries::CreditCardInterestRate => "TERMCBCCALLNS",
            MarketSeries::FedFundRate => "FEDFUNDS",
            MarketSeries::RealGdp => "A191RL1Q225SBEA",
            MarketSeries::InstitutionalMoneyFunds => "WIMFSL",
            MarketSeries::InitialClaims => "IC4WSA",
            MarketSeries::IndustrialProduction => "INDPRO",
            MarketSeries::MortgageRate { term: 30 } => "MORTGAGE30US",
            MarketSeries::MortgageRate { term: 15 } => "MORTGAGE15US",
            MarketSeries::MortgageRate { .. } => "MORTGAGE5US",
            MarketSeries::HousingStarts => "HOUST",
            MarketSeries::TotalPayrolls => "PAYEMS",
            MarketSeries::VehicleSales => "TOTALSA",
            MarketSeries::RetailMoneyFunds => "WRMFSL",
            MarketSeries::UnemploymentRate => "UNRATE",
            MarketSeries::RecessionProbability => "RECPROUSM156N",
        };
        Cow::Borrowed(code)
    }

    /// Row label used by the aggregate tables.
    pub fn label(&self) -> &'static str {
        match self {
            MarketSeries::Oil { .. } => "oil",
            MarketSeries::NaturalGas => "natural_gas",
            MarketSeries::HeatingOil => "heating_oil",
            MarketSeries::JetFuel => "jet_fuel",
            MarketSeries::Diesel => "diesel",
            MarketSeries::Gas => "gas",
            MarketSeries::Propane => "propane",
            MarketSeries::TreasuryRate { .. } => "daily_treasury_rates",
            MarketSeries::Cpi => "cpi",
            MarketSeries::CreditCardInterestRate => "cc_interest_rates",
            MarketSeries::FedFundRate => "fed_fund_rate",
            MarketSeries::RealGdp => "real_gdp",
            MarketSeries::InstitutionalMoneyFunds => "imf",
            MarketSeries::InitialClaims => "initial_claims",
            MarketSeries::IndustrialProduction => "industrial_production_interest",
            MarketSeries::MortgageRate { .. } => "mortgage_rates",
            MarketSeries::HousingStarts => "total_housing_starts",
            MarketSeries::TotalPayrolls => "total_payrolls",
            MarketSeries::VehicleSales => "total_vehicle_sales",
            MarketSeries::RetailMoneyFunds => "retail_money_funds",
            MarketSeries::UnemploymentRate => "unemployment_rate",
            MarketSeries::RecessionProbability => "recession_probability",
        }
    }

    /// Look up a catalog entry by its label, using default tenors.
    pub fn from_label(label: &str) -> Option<Self> {
        COMMODITIES
            .iter()
            .chain(ECONOMIC_DATA)
            .find(|series| series.label() == label)
            .copied()
    }
}
